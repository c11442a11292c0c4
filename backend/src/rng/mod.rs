//! Deterministic random number generation
//!
//! The simulation driver consumes uniform variates through the
//! [`UniformSource`] trait so that the generator can be swapped for a
//! scripted sequence in tests. The production implementation is the
//! xorshift64* generator in [`XorShiftRng`].
//!
//! CRITICAL: All randomness in the simulator MUST go through this module.

mod xorshift;

pub use xorshift::XorShiftRng;

/// A source of uniform random variates in `[0.0, 1.0)`.
///
/// The driver draws three variates per tick and compares them against the
/// configured probabilities. The contract is minimal on purpose: any type
/// that can produce an unbounded, statistically independent uniform sequence
/// qualifies. Seeding and reproducibility are the implementor's concern.
pub trait UniformSource {
    /// Produce the next variate in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}
