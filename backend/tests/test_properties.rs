//! Property tests over arbitrary configurations and seeds
//!
//! Whatever the probabilities, seed and run length, the structural
//! invariants of the driver must hold: the visit table accounts for every
//! recorded state, probabilities normalize, and no unit leaves the system
//! that never entered it.

use proptest::prelude::*;
use queuing_simulator_core_rs::{OccupancyState, Simulation, SimulationConfig, XorShiftRng};

proptest! {
    #[test]
    fn invariants_hold_for_arbitrary_runs(
        seed in any::<u64>(),
        source_idle_prob in 0.0f64..=1.0,
        stage1_fail_prob in 0.0f64..=1.0,
        stage2_fail_prob in 0.0f64..=1.0,
        n in 1u64..300,
    ) {
        let config = SimulationConfig {
            source_idle_prob,
            stage1_fail_prob,
            stage2_fail_prob,
        };
        let mut sim = Simulation::new(config, XorShiftRng::new(seed)).unwrap();
        sim.run(n).unwrap();

        // History holds the initial state plus one entry per tick.
        prop_assert_eq!(sim.history().len() as u64, n + 1);
        prop_assert_eq!(sim.visit_counts().iter().sum::<u64>(), n + 1);
        prop_assert_eq!(*sim.history().last().unwrap(), sim.current_state());

        // Conservation: nothing completes that was never admitted, and the
        // loss correction can only shrink the elapsed-tick total.
        prop_assert!(sim.inputs() >= sim.outputs());
        prop_assert!(sim.outputs() <= n);
        prop_assert!(sim.ticks() <= n);

        let total: f64 = OccupancyState::ALL
            .iter()
            .map(|&s| sim.state_probability(s))
            .sum();
        prop_assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn extreme_probabilities_still_run(seed in any::<u64>()) {
        // Source always idle: the system never leaves 000.
        let config = SimulationConfig {
            source_idle_prob: 1.0,
            stage1_fail_prob: 0.0,
            stage2_fail_prob: 0.0,
        };
        let mut sim = Simulation::new(config, XorShiftRng::new(seed)).unwrap();
        sim.run(50).unwrap();

        prop_assert_eq!(sim.inputs(), 0);
        prop_assert_eq!(sim.outputs(), 0);
        prop_assert_eq!(sim.current_state(), OccupancyState::S000);
        prop_assert_eq!(sim.state_probability(OccupancyState::S000), 1.0);
    }
}
