//! Integration tests for the derive macro.
//!
//! These tests verify that `#[derive(Species)]` generates correct code by
//! actually using the derived implementations.

use plife::{ColorTheme, Group, Groups, Rule, RuleTable, Simulation, Species, Vec3};

#[derive(Species, Clone, Copy, PartialEq, Debug)]
enum Ecosystem {
    Prey,
    Predator,
    Plant,
}

#[test]
fn test_species_into_u32() {
    let prey: u32 = Ecosystem::Prey.into();
    let predator: u32 = Ecosystem::Predator.into();
    let plant: u32 = Ecosystem::Plant.into();

    assert_eq!(prey, 0);
    assert_eq!(predator, 1);
    assert_eq!(plant, 2);
}

#[test]
fn test_species_from_u32() {
    let prey: Ecosystem = 0u32.into();
    let predator: Ecosystem = 1u32.into();
    let plant: Ecosystem = 2u32.into();

    assert_eq!(prey, Ecosystem::Prey);
    assert_eq!(predator, Ecosystem::Predator);
    assert_eq!(plant, Ecosystem::Plant);
}

#[test]
fn test_species_invalid_u32_defaults_to_first() {
    let invalid: Ecosystem = 99u32.into();
    assert_eq!(invalid, Ecosystem::Prey);
    assert_eq!(Ecosystem::from_index(99), None);
}

#[test]
fn test_species_count_and_names() {
    assert_eq!(Ecosystem::count(), 3);
    assert_eq!(Ecosystem::NAMES, &["Prey", "Predator", "Plant"]);
    assert_eq!(Ecosystem::COLORS, &[None::<&str>, None, None]);
}

#[test]
fn test_species_into_group() {
    let group: Group = Ecosystem::Plant.into();
    assert_eq!(group, Group::Species(2));
}

#[derive(Species, Clone, Copy, PartialEq, Debug)]
enum SingleVariant {
    Only,
}

#[test]
fn test_single_variant_species() {
    assert_eq!(SingleVariant::count(), 1);
    let only: u32 = SingleVariant::Only.into();
    assert_eq!(only, 0);
}

#[derive(Species, Clone, Copy, PartialEq, Debug)]
enum Painted {
    #[species(name = "Hot Pink", color = "#FF18C8")]
    Pink,
    #[species(color = "#00FF00")]
    Green,
    Plain,
}

#[test]
fn test_species_attributes() {
    assert_eq!(Painted::NAMES, &["Hot Pink", "Green", "Plain"]);
    assert_eq!(Painted::COLORS, &[Some("#FF18C8"), Some("#00FF00"), None]);

    let groups = Groups::from_species::<Painted>(10);
    assert_eq!(groups.name(Painted::Pink.into()), "Hot Pink");
    assert_eq!(groups.total_particles(), 30);

    let theme = ColorTheme::for_species::<Painted>();
    assert_eq!(theme.color(Painted::Green.into()), Some(Vec3::Y));
    // No color attribute: third palette entry.
    assert_eq!(theme.color(Painted::Plain.into()), ColorTheme::default().color(Group::Species(2)));
}

#[test]
fn test_species_in_rules() {
    let mut table = RuleTable::with_defaults(Ecosystem::count());
    table.set(Rule::new(Ecosystem::Predator.into(), Ecosystem::Prey.into(), 400.0, 0.9));
    table.set(Rule::new(Ecosystem::Prey.into(), Ecosystem::Predator.into(), 250.0, -0.7));

    let chase = table
        .lookup(Ecosystem::Predator.into(), Ecosystem::Prey.into())
        .unwrap();
    assert_eq!(chase.distance, 400.0);

    let sim = Simulation::new()
        .with_species::<Ecosystem>(20)
        .with_rule_table(table)
        .build();
    assert_eq!(sim.particles().len(), 60);
    assert!(sim
        .particles()
        .iter()
        .all(|p| Ecosystem::from_index(p.group.species().unwrap()).is_some()));
}
