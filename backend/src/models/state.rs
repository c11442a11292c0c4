//! Occupancy state of the tandem network
//!
//! The network is a fixed topology: one first-stage channel, a buffer of
//! capacity 2 between the stages, and one second-stage channel. An occupancy
//! state says how many units sit in each part, written as three digits
//! `<stage1><buffer><stage2>`.
//!
//! Of the 2 × 3 × 2 = 12 arithmetically possible triples only 8 are
//! reachable from the empty system: the buffer can hold units only while the
//! second stage is busy, so `010`, `020`, `110` and `120` never occur.
//! Representing the state as a closed enum makes the illegal triples
//! unrepresentable; anything else is rejected at construction.
//!
//! States are immutable values. A tick produces a *new* state via
//! [`OccupancyState::transition`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transitions::{self, TickOutcome, TransitionError};

/// Errors raised when constructing an occupancy state from raw parts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("first stage occupancy {0} should be either 0 or 1")]
    InvalidStage1(u8),

    #[error("buffer occupancy {0} should be 0, 1 or 2")]
    InvalidBuffer(u8),

    #[error("second stage occupancy {0} should be either 0 or 1")]
    InvalidStage2(u8),

    #[error("occupancy {stage1}{buffer}{stage2} is not reachable in this network")]
    UnreachableOccupancy { stage1: u8, buffer: u8, stage2: u8 },

    #[error("state index {0} is out of range (valid: 0-7)")]
    InvalidIndex(usize),

    #[error("'{0}' is not a valid state label")]
    InvalidLabel(String),
}

/// The 8 reachable occupancy configurations, in canonical index order.
///
/// Variant names are the occupancy digits: first stage, buffer, second
/// stage. The discriminant doubles as the stable state index used by the
/// visit-count table.
///
/// # Example
/// ```
/// use queuing_simulator_core_rs::OccupancyState;
///
/// let state = OccupancyState::from_label("101").unwrap();
/// assert_eq!(state.index(), 3);
/// assert_eq!(state.stage1(), 1);
/// assert_eq!(state.buffer(), 0);
/// assert_eq!(state.stage2(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccupancyState {
    /// Empty system
    S000 = 0,
    /// One unit in service at stage 1
    S100 = 1,
    /// One unit in service at stage 2
    S001 = 2,
    /// Both stages busy, buffer empty
    S101 = 3,
    /// Stage 2 busy with one unit queued behind it
    S011 = 4,
    /// Both stages busy, one unit queued
    S111 = 5,
    /// Stage 2 busy, buffer full
    S021 = 6,
    /// Saturated: both stages busy, buffer full
    S121 = 7,
}

impl OccupancyState {
    /// Number of distinct states.
    pub const COUNT: usize = 8;

    /// All states in index order, for enumeration and reporting.
    pub const ALL: [OccupancyState; Self::COUNT] = [
        OccupancyState::S000,
        OccupancyState::S100,
        OccupancyState::S001,
        OccupancyState::S101,
        OccupancyState::S011,
        OccupancyState::S111,
        OccupancyState::S021,
        OccupancyState::S121,
    ];

    /// Build a state from raw occupancy counts.
    ///
    /// Each field is range-checked first; a triple that is in range but not
    /// one of the 8 reachable configurations is rejected as
    /// [`StateError::UnreachableOccupancy`].
    pub fn from_parts(stage1: u8, buffer: u8, stage2: u8) -> Result<Self, StateError> {
        if stage1 > 1 {
            return Err(StateError::InvalidStage1(stage1));
        }
        if buffer > 2 {
            return Err(StateError::InvalidBuffer(buffer));
        }
        if stage2 > 1 {
            return Err(StateError::InvalidStage2(stage2));
        }

        match (stage1, buffer, stage2) {
            (0, 0, 0) => Ok(OccupancyState::S000),
            (1, 0, 0) => Ok(OccupancyState::S100),
            (0, 0, 1) => Ok(OccupancyState::S001),
            (1, 0, 1) => Ok(OccupancyState::S101),
            (0, 1, 1) => Ok(OccupancyState::S011),
            (1, 1, 1) => Ok(OccupancyState::S111),
            (0, 2, 1) => Ok(OccupancyState::S021),
            (1, 2, 1) => Ok(OccupancyState::S121),
            _ => Err(StateError::UnreachableOccupancy {
                stage1,
                buffer,
                stage2,
            }),
        }
    }

    /// Stable index of this state, 0-7.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index).
    pub fn from_index(index: usize) -> Result<Self, StateError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(StateError::InvalidIndex(index))
    }

    /// Three-digit occupancy label, e.g. `"101"`.
    pub fn label(self) -> &'static str {
        match self {
            OccupancyState::S000 => "000",
            OccupancyState::S100 => "100",
            OccupancyState::S001 => "001",
            OccupancyState::S101 => "101",
            OccupancyState::S011 => "011",
            OccupancyState::S111 => "111",
            OccupancyState::S021 => "021",
            OccupancyState::S121 => "121",
        }
    }

    /// Inverse of [`label`](Self::label).
    pub fn from_label(label: &str) -> Result<Self, StateError> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.label() == label)
            .ok_or_else(|| StateError::InvalidLabel(label.to_string()))
    }

    /// Units in the first-stage channel (0 or 1).
    pub fn stage1(self) -> u8 {
        match self {
            OccupancyState::S100
            | OccupancyState::S101
            | OccupancyState::S111
            | OccupancyState::S121 => 1,
            _ => 0,
        }
    }

    /// Units waiting in the buffer (0, 1 or 2).
    pub fn buffer(self) -> u8 {
        match self {
            OccupancyState::S011 | OccupancyState::S111 => 1,
            OccupancyState::S021 | OccupancyState::S121 => 2,
            _ => 0,
        }
    }

    /// Units in the second-stage channel (0 or 1).
    pub fn stage2(self) -> u8 {
        match self {
            OccupancyState::S001
            | OccupancyState::S101
            | OccupancyState::S011
            | OccupancyState::S111
            | OccupancyState::S021
            | OccupancyState::S121 => 1,
            _ => 0,
        }
    }

    /// Total units currently in the system.
    pub fn occupancy(self) -> u8 {
        self.stage1() + self.buffer() + self.stage2()
    }

    /// Compute the state one tick later, given the tick's three Bernoulli
    /// outcomes. Delegates to the transition rule table.
    pub fn transition(self, outcome: &TickOutcome) -> Result<Self, TransitionError> {
        transitions::next_state(self, outcome)
    }
}

impl std::fmt::Display for OccupancyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
