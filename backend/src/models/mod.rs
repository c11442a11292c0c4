//! Domain types of the tandem queuing network
//!
//! - `state`: the 8 reachable occupancy configurations
//! - `transitions`: the per-tick transition rule table

pub mod state;
pub mod transitions;

pub use state::{OccupancyState, StateError};
pub use transitions::{TickOutcome, TransitionError};
