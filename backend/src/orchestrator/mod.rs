//! Simulation driver - the main tick loop
//!
//! See `engine.rs` for the full implementation.

pub mod engine;

pub use engine::{
    Simulation, SimulationConfig, SimulationError, SimulationReport, StateProbability, TickResult,
};
