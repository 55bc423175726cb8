//! Common interface of the rule models

use crate::{Bounds, FrameTime};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// One running model with its entity store
///
/// `step` never fails: numeric edge cases are skipped for the tick, and a
/// particle-count change requested through [`params_mut`](Self::params_mut)
/// is reconciled at the start of the next step.
pub trait Simulation {
    type Entity;
    type Params;

    /// Short name for logs and the UI
    fn name(&self) -> &'static str;

    /// Advance by one reference tick
    fn step(&mut self, time: &FrameTime);

    /// New drawing-surface size in logical pixels
    fn resize(&mut self, bounds: Bounds);

    /// Hard reset: discard every entity and initialize afresh
    fn reset(&mut self);

    fn bounds(&self) -> Bounds;

    fn entities(&self) -> &[Self::Entity];

    fn params(&self) -> &Self::Params;

    fn params_mut(&mut self) -> &mut Self::Params;

    fn len(&self) -> usize {
        self.entities().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Generator for a new simulation: seeded when `seed` is given, from OS entropy otherwise
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Whether the store should be rebuilt for a new requested count
///
/// Small changes are ignored so a dragged slider does not rebuild every tick.
pub fn count_changed(current: usize, requested: usize) -> bool {
    current.abs_diff(requested) > particle_physics::COUNT_HYSTERESIS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_hysteresis() {
        assert!(!count_changed(600, 600));
        assert!(!count_changed(600, 610));
        assert!(count_changed(600, 611));
        assert!(count_changed(600, 589));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng;
        let a: f32 = make_rng(Some(9)).random();
        let b: f32 = make_rng(Some(9)).random();
        assert_eq!(a, b);
    }
}
