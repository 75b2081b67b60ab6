//! Rule randomization with change notification.
//!
//! ```ignore
//! let mut randomizer = RuleRandomizer::new();
//! randomizer.subscribe(|table| log::info!("{} rules changed", table.len()));
//! randomizer.randomize(sim.rules_mut(), &mut rand::thread_rng());
//! ```

use rand::Rng;

use crate::rules::RuleTable;

type Listener = Box<dyn FnMut(&RuleTable)>;

/// Reassigns every rule at random, then tells listeners to refresh.
#[derive(Default)]
pub struct RuleRandomizer {
    listeners: Vec<Listener>,
}

impl RuleRandomizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback run after every randomization, e.g. to refresh
    /// a control panel's displayed values.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&RuleTable) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Randomize every rule in `table`, then notify listeners.
    pub fn randomize<R: Rng + ?Sized>(&mut self, table: &mut RuleTable, rng: &mut R) {
        table.randomize_all(rng);
        log::debug!("Randomized {} rules", table.len());
        for listener in &mut self.listeners {
            listener(table);
        }
    }
}

impl std::fmt::Debug for RuleRandomizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRandomizer")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Attraction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_listeners_notified_each_time() {
        let calls = Rc::new(Cell::new(0));
        let sizes = Rc::new(Cell::new(0));
        let (seen, seen_size) = (calls.clone(), sizes.clone());

        let mut randomizer = RuleRandomizer::new();
        randomizer.subscribe(move |table| {
            seen_size.set(table.len());
            seen.set(seen.get() + 1);
        });

        let mut table = RuleTable::with_defaults(2);
        let mut rng = StdRng::seed_from_u64(1);
        randomizer.randomize(&mut table, &mut rng);
        randomizer.randomize(&mut table, &mut rng);

        assert_eq!(calls.get(), 2);
        // 2 species x (2 species + pointer + gravity)
        assert_eq!(sizes.get(), 8);
    }

    #[test]
    fn test_consecutive_randomizations_differ() {
        let mut randomizer = RuleRandomizer::new();
        let mut table = RuleTable::with_defaults(3);
        let mut rng = StdRng::seed_from_u64(2024);

        randomizer.randomize(&mut table, &mut rng);
        let first: Vec<_> = table.iter().copied().collect();
        randomizer.randomize(&mut table, &mut rng);
        let second: Vec<_> = table.iter().copied().collect();

        assert_ne!(first, second);
        assert!(table
            .iter()
            .all(|r| matches!(r.attraction, Attraction::Constant(a) if (-1.0..=1.0).contains(&a))));
    }
}
