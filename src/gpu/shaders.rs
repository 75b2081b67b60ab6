//! WGSL sources for the viewer.

/// Instanced 2D shapes drawn into the canvas texture.
///
/// Every instance is a quad around `center`. `kind` selects the coverage
/// function: a solid rectangle, an anti-aliased disc of radius
/// `half_extent.x`, or a rectangle stroke `thickness` pixels wide.
pub const SHAPE_SHADER: &str = r#"
const KIND_FILL: u32 = 0u;
const KIND_CIRCLE: u32 = 1u;
const KIND_OUTLINE: u32 = 2u;

struct Viewport {
    size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> viewport: Viewport;

struct VertexOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) half_extent: vec2<f32>,
    @location(2) color: vec4<f32>,
    @location(3) @interpolate(flat) kind: u32,
    @location(4) thickness: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) half_extent: vec2<f32>,
    @location(2) color: vec4<f32>,
    @location(3) kind: u32,
    @location(4) thickness: f32,
) -> VertexOut {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );

    // Room for the anti-aliased edge and the stroke.
    let pad = select(thickness + 1.0, 0.0, kind == KIND_FILL);
    let local = corners[vertex_index] * (half_extent + vec2<f32>(pad));
    let pixel = center + local;
    let ndc = vec2<f32>(
        pixel.x / viewport.size.x * 2.0 - 1.0,
        1.0 - pixel.y / viewport.size.y * 2.0,
    );

    var out: VertexOut;
    out.clip = vec4<f32>(ndc, 0.0, 1.0);
    out.local = local;
    out.half_extent = half_extent;
    out.color = color;
    out.kind = kind;
    out.thickness = thickness;
    return out;
}

@fragment
fn fs_main(in: VertexOut) -> @location(0) vec4<f32> {
    var coverage = 1.0;
    if in.kind == KIND_CIRCLE {
        let d = length(in.local) - in.half_extent.x;
        coverage = clamp(0.5 - d, 0.0, 1.0);
    } else if in.kind == KIND_OUTLINE {
        let edge = abs(in.local) - in.half_extent;
        let d = max(edge.x, edge.y);
        coverage = clamp(in.thickness * 0.5 + 0.5 - abs(d), 0.0, 1.0);
    }
    if coverage <= 0.0 {
        discard;
    }
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}
"#;

/// Copies the canvas texture to the window with a fullscreen triangle.
pub const PRESENT_SHADER: &str = r#"
@group(0) @binding(0)
var canvas: texture_2d<f32>;
@group(0) @binding(1)
var canvas_sampler: sampler;

struct VertexOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOut {
    let uv = vec2<f32>(f32((vertex_index << 1u) & 2u), f32(vertex_index & 2u));
    var out: VertexOut;
    out.clip = vec4<f32>(uv * vec2<f32>(2.0, -2.0) + vec2<f32>(-1.0, 1.0), 0.0, 1.0);
    out.uv = uv;
    return out;
}

@fragment
fn fs_main(in: VertexOut) -> @location(0) vec4<f32> {
    return textureSample(canvas, canvas_sampler, in.uv);
}
"#;
