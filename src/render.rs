//! Drawing the simulation.
//!
//! The engine does not draw anything itself. After a tick, [`draw_frame`]
//! walks the particles and issues primitive calls on a [`RenderTarget`]:
//! a translucent clear, one circle per particle, and the container outline.
//! The window viewer implements [`RenderTarget`] on the GPU; [`ShapeBatch`]
//! records the calls on the CPU.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::group::{Group, Species};
use crate::simulator::Simulator;

/// Fallback colors for species without a configured color.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#FF18C8", "#1BEAFF", "#7BFF00", "#FFB000", "#8A5CFF", "#FF4A3D", "#00E0A0", "#F2F2F2",
];

/// Drawing primitives the simulation needs.
pub trait RenderTarget {
    /// Canvas width in pixels.
    fn width(&self) -> u32;

    /// Canvas height in pixels.
    fn height(&self) -> u32;

    /// Cover the canvas with `color` at `opacity`. Values below 1 leave trails.
    fn clear(&mut self, color: Vec3, opacity: f32);

    /// A filled circle.
    fn circle(&mut self, center: Vec2, radius: f32, color: Vec3);

    /// An unfilled rectangle with its top-left corner at `origin`.
    fn outline(&mut self, origin: Vec2, size: Vec2, color: Vec3);
}

/// Display colors for the real groups.
///
/// Only the renderer reads this; the physics never does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorTheme {
    pub background: Vec3,
    pub outline: Vec3,
    /// Indexed by species.
    pub groups: Vec<Vec3>,
}

impl ColorTheme {
    /// Theme with the first `len` palette colors.
    pub fn with_palette(len: usize) -> Self {
        Self {
            background: Vec3::ZERO,
            outline: Vec3::ONE,
            groups: (0..len).map(palette_color).collect(),
        }
    }

    /// Theme using each variant's `#[species(color = ...)]`, falling back
    /// to the palette.
    pub fn for_species<S: Species>() -> Self {
        let mut theme = Self::with_palette(S::NAMES.len());
        for (i, color) in S::COLORS.iter().enumerate() {
            if let Some(color) = color.and_then(parse_hex) {
                theme.groups[i] = color;
            }
        }
        theme
    }

    /// Color of a real group. Pseudo groups are never drawn.
    pub fn color(&self, group: Group) -> Option<Vec3> {
        let index = group.species()? as usize;
        Some(
            self.groups
                .get(index)
                .copied()
                .unwrap_or_else(|| palette_color(index)),
        )
    }

    /// Set the color of a real group, growing the table if needed.
    pub fn set_color(&mut self, group: Group, color: Vec3) {
        if let Some(index) = group.species().map(|i| i as usize) {
            while self.groups.len() <= index {
                let next = self.groups.len();
                self.groups.push(palette_color(next));
            }
            self.groups[index] = color;
        }
    }
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self::with_palette(3)
    }
}

fn palette_color(index: usize) -> Vec3 {
    parse_hex(DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]).unwrap_or(Vec3::ONE)
}

/// Parse `#RRGGBB` (leading `#` optional) into RGB in `0.0..=1.0`.
pub fn parse_hex(hex: &str) -> Option<Vec3> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Vec3::new(
        channel(0)? as f32 / 255.0,
        channel(2)? as f32 / 255.0,
        channel(4)? as f32 / 255.0,
    ))
}

/// Format RGB in `0.0..=1.0` as `#RRGGBB`.
pub fn to_hex(color: Vec3) -> String {
    let [r, g, b] = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round().to_array();
    format!("#{:02X}{:02X}{:02X}", r as u8, g as u8, b as u8)
}

/// Draw one frame: clear, particles, container outline.
pub fn draw_frame<T: RenderTarget + ?Sized>(sim: &Simulator, theme: &ColorTheme, target: &mut T) {
    let params = sim.params();
    let radius = params.particle_radius;

    target.clear(theme.background, params.background_opacity);

    for particle in sim.particles() {
        if let Some(color) = theme.color(particle.group) {
            target.circle(particle.position, radius, color);
        }
    }

    let bounds = sim.bounds();
    target.outline(
        bounds.min - Vec2::splat(radius),
        bounds.size() + Vec2::splat(radius * 2.0),
        theme.outline,
    );
}

/// One recorded drawing call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Clear { color: Vec3, opacity: f32 },
    Circle { center: Vec2, radius: f32, color: Vec3 },
    Outline { origin: Vec2, size: Vec2, color: Vec3 },
}

/// A [`RenderTarget`] that records calls for later replay.
#[derive(Clone, Debug, Default)]
pub struct ShapeBatch {
    width: u32,
    height: u32,
    shapes: Vec<Shape>,
}

impl ShapeBatch {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    /// Forget recorded shapes, keeping the allocation.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.shapes.clear();
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}

impl RenderTarget for ShapeBatch {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Vec3, opacity: f32) {
        self.shapes.push(Shape::Clear { color, opacity });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Vec3) {
        self.shapes.push(Shape::Circle {
            center,
            radius,
            color,
        });
    }

    fn outline(&mut self, origin: Vec2, size: Vec2, color: Vec3) {
        self.shapes.push(Shape::Outline {
            origin,
            size,
            color,
        });
    }
}
