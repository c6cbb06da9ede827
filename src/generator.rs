//! Workout plan generation for newly enrolled athletes
//!
//! The generator draws a plan size uniformly from `1..=catalog.len()` and then samples that
//! many catalog entries uniformly with replacement, so repeated workouts are expected. The
//! athlete is accepted but not consulted: plans do not depend on sport, skill or any other
//! attribute.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::models::{Athlete, Workout};

/// Random workout plan generator
#[derive(Debug, Clone)]
pub struct WorkoutGenerator<R: Rng = StdRng> {
    rng: R,
}

impl WorkoutGenerator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic generator, mainly for tests and reproducible demos
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for WorkoutGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> WorkoutGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Pick a plan for `athlete` from `catalog`
    ///
    /// Returns between 1 and `catalog.len()` workouts, or none when the catalog is empty.
    pub fn generate(&mut self, athlete: &Athlete, catalog: &[Workout]) -> Vec<Workout> {
        if catalog.is_empty() {
            debug!(athlete = athlete.id(), "Empty catalog, no workouts generated");
            return Vec::new();
        }

        let count = self.rng.gen_range(1..=catalog.len());
        let plan: Vec<Workout> = (0..count)
            .map(|_| catalog[self.rng.gen_range(0..catalog.len())].clone())
            .collect();

        debug!(
            athlete = athlete.id(),
            catalog_size = catalog.len(),
            generated = plan.len(),
            "Generated workout plan"
        );
        plan
    }

    /// Generate a plan and append its workout ids to the athlete
    ///
    /// Returns the number of ids appended.
    pub fn assign(&mut self, athlete: &mut Athlete, catalog: &[Workout]) -> usize {
        let plan = self.generate(athlete, catalog);
        athlete
            .workouts
            .extend(plan.iter().map(|workout| workout.id().to_string()));
        plan.len()
    }
}
