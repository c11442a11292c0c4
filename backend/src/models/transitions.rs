//! Transition rule table of the tandem network
//!
//! One tick is governed by three independent Bernoulli outcomes: whether the
//! source stayed idle, and whether each stage failed to finish its unit. The
//! next occupancy is a deterministic function of the current state and those
//! three booleans.
//!
//! The physics is encoded as an explicit table: for every state, an ordered
//! list of `(predicate, next_state)` rules with first-match-wins semantics.
//! Probability mass is assigned by that ordering, so the rule order within a
//! state must never be rearranged.
//!
//! Every state's rule list covers all 8 boolean combinations (the table is
//! total). A combination that matches no rule would mean the model itself is
//! wrong; it surfaces as [`TransitionError::Unmatched`] rather than silently
//! substituting a state, because a wrong state would corrupt every
//! statistic computed downstream.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::OccupancyState;

/// The three Bernoulli outcomes of one tick.
///
/// All three flags are "negative" events, matching how the configuration
/// probabilities are phrased:
/// - `source_idle`: no new unit arrived this tick
/// - `stage1_fail`: the first stage did not finish its unit
/// - `stage2_fail`: the second stage did not finish its unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    pub source_idle: bool,
    pub stage1_fail: bool,
    pub stage2_fail: bool,
}

impl TickOutcome {
    pub fn new(source_idle: bool, stage1_fail: bool, stage2_fail: bool) -> Self {
        Self {
            source_idle,
            stage1_fail,
            stage2_fail,
        }
    }
}

/// Error raised when no rule matches a state/outcome combination.
///
/// This is a defensive guard: the table is total, so hitting this means a
/// modeling defect, and the run must abort.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error(
        "no transition rule for state {from} with source_idle={}, stage1_fail={}, stage2_fail={}",
        outcome.source_idle,
        outcome.stage1_fail,
        outcome.stage2_fail
    )]
    Unmatched {
        from: OccupancyState,
        outcome: TickOutcome,
    },
}

type Predicate = fn(&TickOutcome) -> bool;
type Rule = (Predicate, OccupancyState);

// Rule lists per state. Shorthand in the comments: idle = source_idle,
// fail1/fail2 = the stage failure flags; ¬idle means a unit arrived.

/// Empty system: an arrival occupies stage 1, otherwise nothing happens.
const RULES_000: &[Rule] = &[
    (|o| o.source_idle, OccupancyState::S000),
    (|o| !o.source_idle, OccupancyState::S100),
];

/// Stage 1 busy. While it holds its unit no arrival can be admitted; on
/// completion the unit moves to the free stage 2 and an arrival may refill
/// stage 1.
const RULES_100: &[Rule] = &[
    (|o| o.stage1_fail, OccupancyState::S100),
    (|o| !o.source_idle && !o.stage1_fail, OccupancyState::S101),
    (|o| o.source_idle && !o.stage1_fail, OccupancyState::S001),
];

/// Stage 2 busy only.
const RULES_001: &[Rule] = &[
    (|o| o.source_idle && o.stage2_fail, OccupancyState::S001),
    (|o| !o.source_idle && !o.stage2_fail, OccupancyState::S100),
    (|o| !o.source_idle && o.stage2_fail, OccupancyState::S101),
    (|o| o.source_idle && !o.stage2_fail, OccupancyState::S000),
];

/// Both stages busy, buffer empty. A stage-1 completion goes to stage 2 if
/// it frees up this tick, otherwise into the buffer.
const RULES_101: &[Rule] = &[
    (
        |o| (o.stage1_fail && o.stage2_fail) || (!o.source_idle && !o.stage1_fail && !o.stage2_fail),
        OccupancyState::S101,
    ),
    (|o| o.stage1_fail && !o.stage2_fail, OccupancyState::S100),
    (
        |o| o.source_idle && !o.stage1_fail && !o.stage2_fail,
        OccupancyState::S001,
    ),
    (
        |o| o.source_idle && !o.stage1_fail && o.stage2_fail,
        OccupancyState::S011,
    ),
    (
        |o| !o.source_idle && !o.stage1_fail && o.stage2_fail,
        OccupancyState::S111,
    ),
];

/// Stage 2 busy with one queued unit. A stage-2 completion pulls the queued
/// unit forward; an arrival occupies the free stage 1.
const RULES_011: &[Rule] = &[
    (|o| o.source_idle && o.stage2_fail, OccupancyState::S011),
    (|o| !o.source_idle && !o.stage2_fail, OccupancyState::S101),
    (|o| !o.source_idle && o.stage2_fail, OccupancyState::S111),
    (|o| o.source_idle && !o.stage2_fail, OccupancyState::S001),
];

/// Both stages busy, one unit queued.
const RULES_111: &[Rule] = &[
    (
        |o| (o.stage1_fail && o.stage2_fail) || (!o.source_idle && !o.stage1_fail && !o.stage2_fail),
        OccupancyState::S111,
    ),
    (|o| o.stage1_fail && !o.stage2_fail, OccupancyState::S101),
    (
        |o| o.source_idle && !o.stage1_fail && !o.stage2_fail,
        OccupancyState::S011,
    ),
    (
        |o| o.source_idle && !o.stage1_fail && o.stage2_fail,
        OccupancyState::S021,
    ),
    (
        |o| !o.source_idle && !o.stage1_fail && o.stage2_fail,
        OccupancyState::S121,
    ),
];

/// Stage 2 busy, buffer full, stage 1 free.
const RULES_021: &[Rule] = &[
    (|o| o.source_idle && o.stage2_fail, OccupancyState::S021),
    (|o| !o.source_idle && !o.stage2_fail, OccupancyState::S111),
    (|o| !o.source_idle && o.stage2_fail, OccupancyState::S121),
    (|o| o.source_idle && !o.stage2_fail, OccupancyState::S011),
];

/// Saturated system. A stage-1 completion that finds the buffer still full
/// is lost (the driver detects and accounts for that case); the occupancy
/// stays saturated whenever an arrival refills stage 1.
const RULES_121: &[Rule] = &[
    (
        |o| (o.stage1_fail && o.stage2_fail) || (!o.source_idle && !o.stage1_fail),
        OccupancyState::S121,
    ),
    (|o| o.stage1_fail && !o.stage2_fail, OccupancyState::S111),
    (|o| o.source_idle && !o.stage1_fail, OccupancyState::S021),
];

/// Ordered rule list for a state.
fn rules(state: OccupancyState) -> &'static [Rule] {
    match state {
        OccupancyState::S000 => RULES_000,
        OccupancyState::S100 => RULES_100,
        OccupancyState::S001 => RULES_001,
        OccupancyState::S101 => RULES_101,
        OccupancyState::S011 => RULES_011,
        OccupancyState::S111 => RULES_111,
        OccupancyState::S021 => RULES_021,
        OccupancyState::S121 => RULES_121,
    }
}

/// Evaluate the rule table for `from` under `outcome`, first match wins.
pub fn next_state(
    from: OccupancyState,
    outcome: &TickOutcome,
) -> Result<OccupancyState, TransitionError> {
    rules(from)
        .iter()
        .find(|(matches, _)| matches(outcome))
        .map(|(_, next)| *next)
        .ok_or(TransitionError::Unmatched {
            from,
            outcome: *outcome,
        })
}
