//! Queuing Simulator Core - Rust Engine
//!
//! Discrete-time Monte Carlo simulator for a two-stage tandem queuing
//! network with a finite intermediate buffer and loss. One first-stage
//! channel feeds a capacity-2 buffer in front of one second-stage channel;
//! a unit that finishes stage 1 while the buffer is full and stage 2 is
//! stuck is discarded.
//!
//! # Architecture
//!
//! - **models**: occupancy state and the per-tick transition rule table
//! - **orchestrator**: the simulation driver and statistics accumulator
//! - **rng**: deterministic uniform variate generation
//!
//! # Critical Invariants
//!
//! 1. Only the 8 reachable occupancy states are representable
//! 2. All randomness is deterministic (seeded RNG behind [`UniformSource`])
//! 3. An unmatched transition aborts the run; it is never papered over

// Module declarations
pub mod models;
pub mod orchestrator;
pub mod rng;

// Re-exports for convenience
pub use models::{
    state::{OccupancyState, StateError},
    transitions::{TickOutcome, TransitionError},
};
pub use orchestrator::{
    Simulation, SimulationConfig, SimulationError, SimulationReport, StateProbability, TickResult,
};
pub use rng::{UniformSource, XorShiftRng};
