//! # Interactive Particle Life
//!
//! The built-in control panel plus a small extra window drawn through
//! `with_ui`: live statistics and a button that makes every rule pair
//! symmetric.
//!
//! Run with: `cargo run --example particle_life_interactive --features egui`

use plife::prelude::*;

fn mean_speed(sim: &Simulator) -> f32 {
    let particles = sim.particles();
    if particles.is_empty() {
        return 0.0;
    }
    particles.iter().map(|p| p.velocity.length()).sum::<f32>() / particles.len() as f32
}

/// Copy every `a -> b` rule onto `b -> a`, for `a < b`.
fn symmetrize(sim: &mut Simulator) {
    let species = sim.rules().species_count();
    for a in 0..species {
        for b in (a + 1)..species {
            let (source, target) = (Group::Species(a), Group::Species(b));
            let Some(rule) = sim.rules().lookup(source, target).copied() else {
                continue;
            };
            sim.rules_mut()
                .set(Rule::new(target, source, rule.distance, rule.attraction));
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    Simulation::new()
        .with_title("Particle Life - Interactive")
        .with_groups(Groups::numbered(4, 250))
        .with_seed(2024)
        .running()
        .with_ui(|ctx, sim| {
            egui::Window::new("Stats")
                .default_pos([10.0, 520.0])
                .show(ctx, |ui| {
                    ui.label(format!("Frame: {}", sim.frame()));
                    ui.label(format!("Particles: {}", sim.particles().len()));
                    ui.label(format!("Mean speed: {:.3}", mean_speed(sim)));
                    ui.label(format!("Rules: {}", sim.rules().len()));
                    if ui.button("Make rules symmetric").clicked() {
                        symmetrize(sim);
                        log::info!("Rules made symmetric");
                    }
                });
        })
        .run()?;

    Ok(())
}
