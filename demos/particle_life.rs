//! # Particle Life
//!
//! Three groups with a hand-picked rule set: yellow chases red, red flees
//! green, green clumps together. The classic starting point.
//!
//! ## Controls
//!
//! - **Space**: pause and resume
//! - **R**: randomize every rule
//! - **G**: toggle the gravity well
//! - **W**: toggle bouncing and wrapping walls
//! - **Left mouse**: attract particles toward the pointer
//!
//! Run with: `cargo run --example particle_life`

use plife::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    let red = Group::Species(0);
    let green = Group::Species(1);
    let yellow = Group::Species(2);

    Simulation::new()
        .with_title("Particle Life")
        .with_group("Red", 400, "#FF3030")
        .with_group("Green", 400, "#30FF60")
        .with_group("Yellow", 400, "#FFE030")
        .with_rule(Rule::new(yellow, red, 300.0, 0.15))
        .with_rule(Rule::new(red, yellow, 200.0, -0.2))
        .with_rule(Rule::new(red, green, 250.0, -0.34))
        .with_rule(Rule::new(green, green, 150.0, 0.32))
        .with_rule(Rule::new(green, red, 200.0, 0.17))
        .with_rule(Rule::new(red, red, 100.0, 0.1))
        .with_rule(Rule::new(yellow, yellow, 80.0, -0.05))
        .running()
        .run()?;

    Ok(())
}
