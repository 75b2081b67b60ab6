//! # Headless Run
//!
//! Runs a simulation without a window and logs how the groups drift.
//!
//! ```text
//! cargo run --example headless -- [config.json] [ticks] [out.json]
//! ```
//!
//! Without a config the default three groups are used with a fixed seed
//! and randomized rules. With an output path the final parameters and
//! rules are written back as a config that `SimConfig::load` accepts.

use plife::prelude::*;
use plife::RuleRandomizer;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn centroid(sim: &Simulator, group: Group) -> Option<Vec2> {
    let mut sum = Vec2::ZERO;
    let mut count = 0;
    for p in sim.particles().iter().filter(|p| p.group == group) {
        sum += p.position;
        count += 1;
    }
    (count > 0).then(|| sum / count as f32)
}

fn report(sim: &Simulator) {
    for (group, info) in sim.groups().iter() {
        if let Some(c) = centroid(sim, group) {
            log::info!(
                "frame {:>5}  {:<10} centroid ({:7.1}, {:7.1})",
                sim.frame(),
                info.name,
                c.x,
                c.y
            );
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig {
            seed: Some(42),
            ..Default::default()
        },
    };
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(500);
    let output = args.next();

    let randomize = config.rules.is_none();
    let seed = config.seed.unwrap_or(0);
    let (mut sim, theme) = config.into_simulator()?;
    if randomize {
        let mut rng = StdRng::seed_from_u64(seed);
        RuleRandomizer::new().randomize(sim.rules_mut(), &mut rng);
    }
    sim.set_running(true);

    log::info!(
        "Running {} particles in {} groups for {} ticks",
        sim.particles().len(),
        sim.groups().len(),
        ticks
    );
    report(&sim);
    for _ in 0..ticks {
        sim.tick();
        if sim.frame() % 100 == 0 {
            report(&sim);
        }
    }

    if let Some(path) = output {
        SimConfig::capture(&sim, &theme).save(path)?;
    }

    Ok(())
}
