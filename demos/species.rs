//! # Species
//!
//! Names the groups with a `#[derive(Species)]` enum so rules read like
//! prose, and takes colors from the variant attributes.
//!
//! Run with: `cargo run --example species`

use plife::prelude::*;

#[derive(Species, Clone, Copy, PartialEq, Debug)]
enum Pond {
    #[species(color = "#3CB4FF")]
    Algae,
    #[species(color = "#FFB43C")]
    Grazer,
    #[species(name = "Pike", color = "#FF3C78")]
    Hunter,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;
    use Pond::*;

    let mut table = RuleTable::with_defaults(Pond::count());
    table.set(Rule::new(Algae.into(), Algae.into(), 60.0, 0.2));
    table.set(Rule::new(Grazer.into(), Algae.into(), 350.0, 0.3));
    table.set(Rule::new(Algae.into(), Grazer.into(), 120.0, -0.25));
    table.set(Rule::new(Hunter.into(), Grazer.into(), 500.0, 0.4));
    table.set(Rule::new(Grazer.into(), Hunter.into(), 200.0, -0.6));
    table.set(Rule::new(Hunter.into(), Hunter.into(), 90.0, -0.3));

    Simulation::new()
        .with_title("Pond")
        .with_species::<Pond>(350)
        .with_rule_table(table)
        .with_params(GlobalParams {
            running: true,
            friction: 80.0,
            ..Default::default()
        })
        .run()?;

    Ok(())
}
