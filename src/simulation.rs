//! Simulation builder and windowed runner.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

#[cfg(feature = "egui")]
use crate::gpu::egui_integration::EguiIntegration;
use crate::bounds::BoundaryMode;
use crate::config::SimConfig;
use crate::error::{ConfigError, SimulationError};
use crate::gpu::GpuState;
use crate::group::{Group, Groups, Species};
use crate::input::{PointerEvent, Shortcut};
use crate::jitter::{NoJitter, RandomJitter};
#[cfg(feature = "egui")]
use crate::panel::ControlPanel;
use crate::params::GlobalParams;
use crate::randomizer::RuleRandomizer;
use crate::render::{draw_frame, parse_hex, ColorTheme, ShapeBatch};
use crate::rules::{Rule, RuleTable};
use crate::simulator::Simulator;

#[cfg(feature = "egui")]
type UiCallback = Box<dyn FnMut(&egui::Context, &mut Simulator)>;

/// A particle life simulation builder.
///
/// Use method chaining to configure, then call `.run()` to open a window
/// or `.build()` for a headless [`Simulator`].
///
/// ```ignore
/// Simulation::new()
///     .with_size(1600.0, 900.0)
///     .with_rule(Rule::new(Group::Species(0), Group::Species(0), 80.0, -0.2))
///     .run()?;
/// ```
pub struct Simulation {
    title: String,
    width: f32,
    height: f32,
    groups: Groups,
    /// Still the three stock groups: the first `with_group` replaces them.
    default_groups: bool,
    theme: ColorTheme,
    params: GlobalParams,
    table: Option<RuleTable>,
    rules: Vec<Rule>,
    seed: Option<u64>,
    jitter: bool,
    #[cfg(feature = "egui")]
    panel: bool,
    #[cfg(feature = "egui")]
    ui: Option<UiCallback>,
}

impl Simulation {
    /// Three groups of 300 particles on a 1280x720 canvas, stock rules.
    pub fn new() -> Self {
        Self {
            title: "Particle Life".into(),
            width: 1280.0,
            height: 720.0,
            groups: Groups::default(),
            default_groups: true,
            theme: ColorTheme::default(),
            params: GlobalParams::default(),
            table: None,
            rules: Vec::new(),
            seed: None,
            jitter: true,
            #[cfg(feature = "egui")]
            panel: true,
            #[cfg(feature = "egui")]
            ui: None,
        }
    }

    /// Build from a config file's contents.
    pub fn from_config(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut sim = Self::new()
            .with_title(config.name.clone())
            .with_size(config.width, config.height)
            .with_groups(config.groups())
            .with_theme(config.theme())
            .with_params(config.params.clone());
        if config.rules.is_some() {
            sim.table = Some(config.rule_table()?);
        }
        sim.seed = config.seed;
        Ok(sim)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Canvas size in logical pixels. The window uses its physical size
    /// once it opens.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replace the groups. Colors fall back to the default palette.
    pub fn with_groups(mut self, groups: Groups) -> Self {
        self.theme = ColorTheme::with_palette(groups.len());
        self.groups = groups;
        self.default_groups = false;
        self
    }

    /// One group of `count` particles per variant of a `#[derive(Species)]` enum.
    pub fn with_species<S: Species>(mut self, count: u32) -> Self {
        self.groups = Groups::from_species::<S>(count);
        self.theme = ColorTheme::for_species::<S>();
        self.default_groups = false;
        self
    }

    /// Append a group. A malformed `color` falls back to the palette.
    ///
    /// The first call replaces the three default groups.
    pub fn with_group(mut self, name: impl Into<String>, count: u32, color: &str) -> Self {
        if self.default_groups {
            self.groups = Groups::new();
            self.theme = ColorTheme::with_palette(0);
            self.default_groups = false;
        }
        let group = self.groups.add(name, count);
        let index = self.theme.groups.len();
        let fallback = ColorTheme::with_palette(index + 1).groups[index];
        self.theme
            .set_color(group, parse_hex(color).unwrap_or(fallback));
        self
    }

    pub fn with_theme(mut self, theme: ColorTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_params(mut self, params: GlobalParams) -> Self {
        self.params = params;
        self
    }

    /// Start ticking as soon as the simulation is built.
    pub fn running(mut self) -> Self {
        self.params.running = true;
        self
    }

    /// Start from this rule table instead of the stock rules.
    pub fn with_rule_table(mut self, table: RuleTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Set one rule on top of the stock (or given) table.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Seed spawning, collision jitter and rule randomization.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Turn off collision jitter and gravity wobble entirely.
    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Show or hide the built-in control panel. Shown by default.
    #[cfg(feature = "egui")]
    pub fn with_panel(mut self, panel: bool) -> Self {
        self.panel = panel;
        self
    }

    /// Extra egui UI, drawn every frame after the control panel.
    #[cfg(feature = "egui")]
    pub fn with_ui<F>(mut self, ui: F) -> Self
    where
        F: FnMut(&egui::Context, &mut Simulator) + 'static,
    {
        self.ui = Some(Box::new(ui));
        self
    }

    /// Build a headless simulator at the configured size.
    pub fn build(self) -> Simulator {
        self.build_with_theme().0
    }

    /// Build a headless simulator and its color theme.
    pub fn build_with_theme(self) -> (Simulator, ColorTheme) {
        let (width, height) = (self.width, self.height);
        let (sim, theme, _) = self.spawn(width, height);
        (sim, theme)
    }

    fn spawn(self, width: f32, height: f32) -> (Simulator, ColorTheme, StdRng) {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let species = self.groups.len() as u32;
        let mut table = self
            .table
            .unwrap_or_else(|| RuleTable::with_defaults(species));
        for rule in self.rules {
            table.set(rule);
        }

        let mut sim = Simulator::spawn(self.groups, width, height, &mut rng)
            .with_rules(table)
            .with_params(self.params);
        match (self.jitter, self.seed) {
            (false, _) => sim.set_jitter(NoJitter),
            (true, Some(seed)) => sim.set_jitter(RandomJitter::seeded(seed)),
            (true, None) => {}
        }

        (sim, self.theme, rng)
    }

    /// Open a window and run until it is closed.
    pub fn run(self) -> Result<(), SimulationError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            pending: Some(self),
            viewer: None,
            error: None,
        };
        event_loop.run_app(&mut app)?;

        match app.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    pending: Option<Simulation>,
    viewer: Option<Viewer>,
    error: Option<SimulationError>,
}

/// Everything that exists once the window is open.
struct Viewer {
    window: Arc<Window>,
    gpu: GpuState,
    sim: Simulator,
    theme: ColorTheme,
    randomizer: RuleRandomizer,
    rng: StdRng,
    batch: ShapeBatch,
    #[cfg(feature = "egui")]
    egui: EguiIntegration,
    #[cfg(feature = "egui")]
    panel: Option<ControlPanel>,
    #[cfg(feature = "egui")]
    ui: Option<UiCallback>,
}

impl Viewer {
    fn new(
        event_loop: &ActiveEventLoop,
        #[cfg_attr(not(feature = "egui"), allow(unused_mut))] mut setup: Simulation,
    ) -> Result<Self, SimulationError> {
        let window_attrs = Window::default_attributes()
            .with_title(setup.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(setup.width, setup.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = pollster::block_on(GpuState::new(window.clone()))?;

        #[cfg(feature = "egui")]
        let egui = EguiIntegration::new(gpu.device(), gpu.format(), &window);
        #[cfg(feature = "egui")]
        let panel = setup.panel.then(|| ControlPanel::new(setup.title.clone()));
        #[cfg(feature = "egui")]
        let ui = setup.ui.take();

        let size = window.inner_size();
        let (sim, theme, rng) = setup.spawn(size.width.max(1) as f32, size.height.max(1) as f32);

        let mut randomizer = RuleRandomizer::new();
        let redraw = window.clone();
        randomizer.subscribe(move |_| redraw.request_redraw());

        Ok(Self {
            window,
            gpu,
            sim,
            theme,
            randomizer,
            rng,
            batch: ShapeBatch::default(),
            #[cfg(feature = "egui")]
            egui,
            #[cfg(feature = "egui")]
            panel,
            #[cfg(feature = "egui")]
            ui,
        })
    }

    fn shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::ToggleRunning => {
                let running = !self.sim.is_running();
                self.sim.set_running(running);
                log::info!("{}", if running { "Running" } else { "Paused" });
            }
            Shortcut::RandomizeRules => self.randomize(),
            Shortcut::ToggleGravity => {
                let params = self.sim.params_mut();
                params.gravity_enabled = !params.gravity_enabled;
                log::info!("Gravity {}", if params.gravity_enabled { "on" } else { "off" });
            }
            Shortcut::ToggleBoundary => {
                let params = self.sim.params_mut();
                params.boundary = match params.boundary {
                    BoundaryMode::Bounce => BoundaryMode::Wrap,
                    BoundaryMode::Wrap => BoundaryMode::Bounce,
                };
                log::info!("Walls: {:?}", params.boundary);
            }
        }
    }

    fn randomize(&mut self) {
        self.randomizer
            .randomize(self.sim.rules_mut(), &mut self.rng);
        let groups = self.sim.groups();
        for rule in self.sim.rules().iter().filter(|r| r.target != Group::Gravity) {
            log::trace!(
                "{} -> {}: distance {}, attraction {:?}",
                groups.name(rule.source),
                groups.name(rule.target),
                rule.distance,
                rule.attraction
            );
        }
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.gpu.resize(size);
        if size.width > 0 && size.height > 0 {
            self.sim.resize(size.width as f32, size.height as f32);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.sim.tick();

        let size = self.sim.canvas_size();
        self.batch.reset(size.x as u32, size.y as u32);
        draw_frame(&self.sim, &self.theme, &mut self.batch);

        #[cfg(feature = "egui")]
        let egui_output = {
            let Viewer {
                window,
                sim,
                theme,
                egui,
                panel,
                ui,
                ..
            } = self;
            let mut randomize = false;
            let output = egui.run(window, |ctx| {
                if let Some(panel) = panel.as_mut() {
                    randomize |= panel.show(ctx, sim, theme).randomize;
                }
                if let Some(ui) = ui.as_mut() {
                    ui(ctx, sim);
                }
            });
            if randomize {
                self.randomize();
            }
            output
        };

        #[cfg(feature = "egui")]
        let result = {
            let egui = &mut self.egui;
            self.gpu
                .render(&self.batch, |overlay| egui.paint(overlay, &egui_output))
        };
        #[cfg(not(feature = "egui"))]
        let result = self.gpu.render(&self.batch, |_| {});

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        self.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(setup) = self.pending.take() else {
            return;
        };
        match Viewer::new(event_loop, setup) {
            Ok(viewer) => {
                viewer.window.request_redraw();
                self.viewer = Some(viewer);
            }
            Err(err) => {
                log::error!("{}", err);
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        #[cfg(feature = "egui")]
        let consumed = viewer.egui.on_window_event(&viewer.window, &event);
        #[cfg(not(feature = "egui"))]
        let consumed = false;

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                viewer.resize(physical_size);
            }
            WindowEvent::RedrawRequested => {
                viewer.redraw(event_loop);
            }
            _ if consumed => {}
            event => {
                if let Some(pointer) = PointerEvent::from_window_event(&event) {
                    viewer.sim.handle_pointer(pointer);
                } else if let Some(shortcut) = Shortcut::from_window_event(&event) {
                    viewer.shortcut(shortcut);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Attraction;

    #[derive(crate::Species, Clone, Copy, PartialEq, Debug)]
    enum Swarm {
        #[species(color = "#FF0000")]
        Hunter,
        Prey,
    }

    #[test]
    fn test_build_defaults() {
        let sim = Simulation::new().with_seed(1).build();
        assert_eq!(sim.particles().len(), 900);
        assert_eq!(sim.canvas_size(), glam::Vec2::new(1280.0, 720.0));
        assert!(!sim.is_running());
        assert_eq!(sim.rules().len(), 15);
    }

    #[test]
    fn test_with_group_replaces_defaults() {
        let (sim, theme) = Simulation::new()
            .with_group("red", 10, "#FF0000")
            .with_group("green", 20, "not a color")
            .build_with_theme();

        assert_eq!(sim.groups().len(), 2);
        assert_eq!(sim.particles().len(), 30);
        assert_eq!(theme.color(Group::Species(0)), Some(glam::Vec3::X));
        assert_eq!(theme.color(Group::Species(1)), parse_hex("#1BEAFF"));
    }

    #[test]
    fn test_with_group_keeps_explicit_groups() {
        let sim = Simulation::new()
            .with_groups(Groups::default())
            .with_group("extra", 7, "#FFFFFF")
            .with_seed(5)
            .build();

        assert_eq!(sim.groups().len(), 4);
        assert_eq!(sim.groups().name(Group::Species(3)), "extra");
        assert_eq!(sim.particles().len(), 907);
    }

    #[test]
    fn test_with_species() {
        let (sim, theme) = Simulation::new()
            .with_species::<Swarm>(5)
            .with_rule(Rule::new(Swarm::Hunter.into(), Swarm::Prey.into(), 300.0, 0.8))
            .build_with_theme();

        assert_eq!(sim.groups().name(Swarm::Prey.into()), "Prey");
        assert_eq!(theme.color(Swarm::Hunter.into()), Some(glam::Vec3::X));
        let rule = sim.rules().lookup(Swarm::Hunter.into(), Swarm::Prey.into()).unwrap();
        assert_eq!(rule.attraction, Attraction::Constant(0.8));
        // Untouched pairs keep the stock rule.
        let rule = sim.rules().lookup(Swarm::Prey.into(), Swarm::Hunter.into()).unwrap();
        assert_eq!(rule.distance, 100.0);
    }

    #[test]
    fn test_seeded_builds_match() {
        let build = || Simulation::new().with_seed(99).running().build();
        let (mut a, mut b) = (build(), build());
        assert_eq!(a.particles(), b.particles());
        a.rules_mut().set_all(200.0, 0.5);
        b.rules_mut().set_all(200.0, 0.5);
        for _ in 0..3 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_from_config_with_explicit_rules() {
        let config = SimConfig {
            rules: Some(vec![Rule::new(Group::Species(0), Group::Pointer, 50.0, 1.0)]),
            ..Default::default()
        };
        let sim = Simulation::from_config(config).unwrap().build();
        assert_eq!(sim.rules().len(), 1);
        assert!(sim.rules().lookup(Group::Species(0), Group::Species(0)).is_none());
    }
}
