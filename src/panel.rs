//! Built-in egui control panel.
//!
//! Edits [`GlobalParams`](crate::GlobalParams), group colors and every
//! species and pointer rule of a running simulation. Only compiled with the
//! `egui` feature.

use crate::bounds::BoundaryMode;
use crate::group::Group;
use crate::render::ColorTheme;
use crate::rules::{Attraction, Rule, MAX_RULE_DISTANCE};
use crate::simulator::Simulator;

/// What the user asked for this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelResponse {
    /// The "Randomize rules" button was clicked.
    pub randomize: bool,
}

/// Parameter and rule editor window.
#[derive(Debug)]
pub struct ControlPanel {
    title: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new("Particle Life")
    }
}

impl ControlPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Draw the panel. Values are re-read every frame, so randomized rules
    /// show up without any extra refresh step.
    pub fn show(&mut self, ctx: &egui::Context, sim: &mut Simulator, theme: &mut ColorTheme) -> PanelResponse {
        let mut response = PanelResponse::default();

        egui::Window::new(self.title.as_str())
            .default_pos([10.0, 10.0])
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::CollapsingHeader::new("Global settings")
                    .default_open(true)
                    .show(ui, |ui| {
                        response.randomize |= global_settings(ui, sim);
                    });

                egui::CollapsingHeader::new("Rules")
                    .default_open(false)
                    .show(ui, |ui| {
                        rules(ui, sim, theme);
                    });

                ui.separator();
                ui.label("Space: run/pause  R: randomize");
                ui.label("G: gravity  W: wrap walls");
                ui.label("Hold left mouse to attract");
            });

        response
    }
}

fn global_settings(ui: &mut egui::Ui, sim: &mut Simulator) -> bool {
    let params = sim.params_mut();

    ui.checkbox(&mut params.running, "Is running");
    ui.add(egui::Slider::new(&mut params.particle_radius, 1.0..=5.0).text("Particle radius"));
    ui.add(
        egui::Slider::new(&mut params.edge_damping, 0.0..=1.0)
            .step_by(0.01)
            .text("Edge damping"),
    );
    ui.add(
        egui::Slider::new(&mut params.friction, 0.0..=1000.0)
            .step_by(0.1)
            .text("Friction"),
    );
    ui.add(
        egui::Slider::new(&mut params.nucleus_repulsion, 0.0..=1.0)
            .step_by(0.01)
            .text("Nucleus repulsion"),
    );
    ui.add(
        egui::Slider::new(&mut params.margin_percent, 0.0..=100.0)
            .step_by(1.0)
            .text("Margin"),
    );
    ui.checkbox(&mut params.pointer_interaction, "Mouse interaction");
    ui.checkbox(&mut params.gravity_enabled, "Gravity");
    ui.add_enabled(
        params.gravity_enabled,
        egui::Slider::new(&mut params.gravity_force, 0.0..=1.0)
            .step_by(0.01)
            .text("Gravity force"),
    );
    ui.add(
        egui::Slider::new(&mut params.background_opacity, 0.0..=1.0)
            .step_by(0.01)
            .text("Background opacity"),
    );
    ui.horizontal(|ui| {
        ui.label("Walls");
        ui.radio_value(&mut params.boundary, BoundaryMode::Bounce, "Bounce");
        ui.radio_value(&mut params.boundary, BoundaryMode::Wrap, "Wrap");
    });

    ui.button("Randomize rules").clicked()
}

fn rules(ui: &mut egui::Ui, sim: &mut Simulator, theme: &mut ColorTheme) {
    let names: Vec<(Group, String)> = sim
        .groups()
        .iter()
        .map(|(group, info)| (group, info.name.clone()))
        .collect();
    let mut targets: Vec<(Group, String)> = names.clone();
    targets.push((Group::Pointer, sim.groups().name(Group::Pointer).to_string()));

    for (source, name) in &names {
        egui::CollapsingHeader::new(name.as_str())
            .id_salt(("rules", *source))
            .show(ui, |ui| {
                if let Some(color) = theme.color(*source) {
                    let mut rgb = color.to_array();
                    ui.horizontal(|ui| {
                        ui.label("Color");
                        if ui.color_edit_button_rgb(&mut rgb).changed() {
                            theme.set_color(*source, rgb.into());
                        }
                    });
                }

                for (target, target_name) in &targets {
                    let Some(rule) = sim.rules_mut().get_mut(*source, *target) else {
                        continue;
                    };
                    egui::CollapsingHeader::new(target_name.as_str())
                        .id_salt(("rule", *source, *target))
                        .show(ui, |ui| rule_sliders(ui, rule));
                }
            });
    }
}

/// Distance and attraction of one rule. Values loaded from a config may lie
/// outside the slider ranges and are left as they are until dragged.
fn rule_sliders(ui: &mut egui::Ui, rule: &mut Rule) {
    ui.add(
        egui::Slider::new(&mut rule.distance, 0.0..=MAX_RULE_DISTANCE)
            .clamping(egui::SliderClamping::Never)
            .text("Distance"),
    );
    match &mut rule.attraction {
        Attraction::Constant(value) => {
            ui.add(
                egui::Slider::new(value, -1.0..=1.0)
                    .clamping(egui::SliderClamping::Never)
                    .step_by(0.01)
                    .text("Attraction"),
            );
        }
        Attraction::Live(param) => {
            ui.label(format!("Attraction follows {:?}", param));
        }
    }
}
