//! Simulation engine
//!
//! The driver owns the current occupancy state and advances it one tick at a
//! time:
//!
//! ```text
//! For each tick t:
//! 1. Draw three uniform variates from the injected RNG
//! 2. Derive the Bernoulli outcomes (variate <= probability, left-closed)
//! 3. Update admission / completion / dwell counters against the CURRENT state
//! 4. Apply the loss correction if a finished stage-1 unit is discarded
//! 5. Transition to the next state via the rule table
//! 6. Record the new state in the history and visit-count table
//! ```
//!
//! # Loss correction
//!
//! When the system sits saturated at `121` and stage 1 finishes while stage 2
//! does not, the finished unit has nowhere to go and is discarded. The ticks
//! it spent occupying stage 1 were counted into the elapsed-time total, but
//! the unit will never appear in `outputs`; leaving those ticks in place
//! would bias the mean sojourn time upward. The driver therefore tracks how
//! long the current stage-1 occupant has been in place (`stage1_streak`) and
//! subtracts that streak from the elapsed ticks at the moment the unit is
//! lost.
//!
//! # Determinism
//!
//! Everything downstream of the RNG is pure arithmetic, so two drivers fed
//! the identical variate sequence produce bit-for-bit identical histories
//! and statistics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{OccupancyState, TickOutcome, TransitionError};
use crate::rng::UniformSource;

/// The three Bernoulli parameters of the network.
///
/// Each probability describes a "negative" event, mirroring the flags in
/// [`TickOutcome`]: the source staying idle, and each stage failing to
/// finish its unit within the tick.
///
/// # Example
/// ```
/// use queuing_simulator_core_rs::SimulationConfig;
///
/// let config = SimulationConfig::default();
/// assert_eq!(config.source_idle_prob, 0.75);
/// assert_eq!(config.stage1_fail_prob, 0.70);
/// assert_eq!(config.stage2_fail_prob, 0.65);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Probability that the source generates no unit this tick
    pub source_idle_prob: f64,

    /// Probability that stage 1 does not finish its unit this tick
    pub stage1_fail_prob: f64,

    /// Probability that stage 2 does not finish its unit this tick
    pub stage2_fail_prob: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            source_idle_prob: 0.75,
            stage1_fail_prob: 0.70,
            stage2_fail_prob: 0.65,
        }
    }
}

impl SimulationConfig {
    /// Check that every parameter is a probability.
    ///
    /// Values outside `[0.0, 1.0]` are rejected, never clamped.
    pub fn validate(&self) -> Result<(), SimulationError> {
        validate_probability("source_idle_prob", self.source_idle_prob)?;
        validate_probability("stage1_fail_prob", self.stage1_fail_prob)?;
        validate_probability("stage2_fail_prob", self.stage2_fail_prob)?;
        Ok(())
    }
}

fn validate_probability(name: &'static str, value: f64) -> Result<(), SimulationError> {
    // NaN fails both comparisons and lands here too.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimulationError::InvalidProbability { name, value })
    }
}

/// Errors that can occur while configuring or running a simulation.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("probability {name} = {value} is not between 0 and 1")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// What happened during a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickResult {
    /// Elapsed-tick counter after this tick (loss-corrected)
    pub tick: u64,

    /// The Bernoulli outcomes drawn for this tick
    pub outcome: TickOutcome,

    /// Occupancy after the transition
    pub state: OccupancyState,

    /// A unit was admitted into the system this tick
    pub admitted: bool,

    /// A unit finished stage 2 and left the system this tick
    pub completed: bool,

    /// A finished stage-1 unit was discarded (buffer full, stage 2 stuck)
    pub lost: bool,
}

/// Monte Carlo driver for the two-stage tandem network.
///
/// Owns the current [`OccupancyState`], the visit history and all counters.
/// Constructed from a validated [`SimulationConfig`] and an injected
/// [`UniformSource`]; [`tick`](Self::tick) is the sole mutator afterwards.
///
/// # Example
/// ```
/// use queuing_simulator_core_rs::{OccupancyState, Simulation, SimulationConfig, XorShiftRng};
///
/// let mut sim = Simulation::new(SimulationConfig::default(), XorShiftRng::new(12345)).unwrap();
/// sim.run(1000).unwrap();
/// let total: f64 = OccupancyState::ALL
///     .iter()
///     .map(|&s| sim.state_probability(s))
///     .sum();
/// assert!((total - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation<R: UniformSource> {
    config: SimulationConfig,
    rng: R,

    /// Occupancy at the start of the next tick
    current: OccupancyState,

    /// Every state the system has visited, initial state included
    history: Vec<OccupancyState>,

    /// Visits per state, indexed by `OccupancyState::index`
    visit_counts: [u64; OccupancyState::COUNT],

    /// Elapsed ticks, reduced by the loss correction
    ticks: u64,

    /// Units admitted into the system
    inputs: u64,

    /// Units that finished stage 2 and left
    outputs: u64,

    /// Consecutive ticks the current stage-1 occupant has been in place
    stage1_streak: u64,
}

impl<R: UniformSource> Simulation<R> {
    /// Create a driver in the initial state `000`.
    ///
    /// Fails if any configured probability is outside `[0.0, 1.0]`.
    pub fn new(config: SimulationConfig, rng: R) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut sim = Self {
            config,
            rng,
            current: OccupancyState::S000,
            history: Vec::new(),
            visit_counts: [0; OccupancyState::COUNT],
            ticks: 0,
            inputs: 0,
            outputs: 0,
            stage1_streak: 0,
        };
        sim.reset();
        Ok(sim)
    }

    /// Return to the initial state: occupancy `000`, all counters zeroed,
    /// history containing only the initial state.
    ///
    /// The RNG is left untouched; where it resumes in its sequence is the
    /// collaborator's concern.
    pub fn reset(&mut self) {
        self.current = OccupancyState::S000;
        self.history.clear();
        self.history.push(self.current);
        self.visit_counts = [0; OccupancyState::COUNT];
        self.visit_counts[self.current.index()] = 1;
        self.ticks = 0;
        self.inputs = 0;
        self.outputs = 0;
        self.stage1_streak = 0;
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> Result<TickResult, SimulationError> {
        self.ticks += 1;

        let outcome = TickOutcome::new(
            self.rng.next_f64() <= self.config.source_idle_prob,
            self.rng.next_f64() <= self.config.stage1_fail_prob,
            self.rng.next_f64() <= self.config.stage2_fail_prob,
        );

        let admitted = !outcome.source_idle;
        if admitted {
            self.inputs += 1;
        }

        // A completion leaves the system only if stage 2 was occupied going
        // into this tick.
        let completed = self.current.stage2() == 1 && !outcome.stage2_fail;
        if completed {
            self.outputs += 1;
        }

        if self.current.stage1() == 1 {
            self.stage1_streak += 1;
        }

        // Loss correction: saturated system, stage 1 finished, stage 2 did
        // not. The finished unit is discarded, so the ticks it spent in
        // stage 1 must not count toward the sojourn-time total.
        let lost = self.current == OccupancyState::S121
            && outcome.stage2_fail
            && !outcome.stage1_fail;
        if lost {
            debug_assert!(self.stage1_streak <= self.ticks);
            self.ticks -= self.stage1_streak;
            self.stage1_streak = 0;
        } else if !outcome.stage1_fail {
            // A successful handoff starts a fresh streak.
            self.stage1_streak = 0;
        }

        let next = self.current.transition(&outcome)?;
        self.history.push(next);
        self.visit_counts[next.index()] += 1;
        self.current = next;

        Ok(TickResult {
            tick: self.ticks,
            outcome,
            state: next,
            admitted,
            completed,
            lost,
        })
    }

    /// Run `n` ticks, stopping at the first error.
    pub fn run(&mut self, n: u64) -> Result<(), SimulationError> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    /// Fraction of recorded states equal to `state`.
    ///
    /// The denominator is the history length, i.e. ticks processed plus one
    /// for the initial state.
    pub fn state_probability(&self, state: OccupancyState) -> f64 {
        self.visit_counts[state.index()] as f64 / self.history.len() as f64
    }

    /// Mean number of units waiting in the buffer, per elapsed tick.
    pub fn queue_average_length(&self) -> f64 {
        let total: u64 = self.history.iter().map(|s| u64::from(s.buffer())).sum();
        total as f64 / self.ticks as f64
    }

    /// Fraction of admitted units that were eventually completed.
    pub fn relative_throughput(&self) -> f64 {
        self.outputs as f64 / self.inputs as f64
    }

    /// Mean ticks a successfully served unit spends in the system.
    ///
    /// The numerator is the loss-corrected elapsed time, so discarded units
    /// do not inflate the estimate.
    pub fn average_sojourn_time(&self) -> f64 {
        self.ticks as f64 / self.outputs as f64
    }

    /// Units currently in the system.
    pub fn requests_in_system(&self) -> u8 {
        self.current.occupancy()
    }

    /// Occupancy at the start of the next tick.
    pub fn current_state(&self) -> OccupancyState {
        self.current
    }

    /// Elapsed ticks, after loss corrections.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Units admitted so far.
    pub fn inputs(&self) -> u64 {
        self.inputs
    }

    /// Units completed so far.
    pub fn outputs(&self) -> u64 {
        self.outputs
    }

    /// Consecutive ticks the current stage-1 occupant has been in place.
    pub fn stage1_streak(&self) -> u64 {
        self.stage1_streak
    }

    /// Every state visited so far, initial state first.
    pub fn history(&self) -> &[OccupancyState] {
        &self.history
    }

    /// Visit counts indexed by state index.
    pub fn visit_counts(&self) -> &[u64; OccupancyState::COUNT] {
        &self.visit_counts
    }

    /// Configured probabilities.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The injected variate source.
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Set the source-idle probability, rejecting values outside `[0, 1]`.
    pub fn set_source_idle_prob(&mut self, value: f64) -> Result<(), SimulationError> {
        validate_probability("source_idle_prob", value)?;
        self.config.source_idle_prob = value;
        Ok(())
    }

    /// Set the stage-1 failure probability, rejecting values outside `[0, 1]`.
    pub fn set_stage1_fail_prob(&mut self, value: f64) -> Result<(), SimulationError> {
        validate_probability("stage1_fail_prob", value)?;
        self.config.stage1_fail_prob = value;
        Ok(())
    }

    /// Set the stage-2 failure probability, rejecting values outside `[0, 1]`.
    pub fn set_stage2_fail_prob(&mut self, value: f64) -> Result<(), SimulationError> {
        validate_probability("stage2_fail_prob", value)?;
        self.config.stage2_fail_prob = value;
        Ok(())
    }

    /// Snapshot of every derived statistic, for the front end.
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            state_probabilities: OccupancyState::ALL
                .iter()
                .map(|&state| StateProbability {
                    state: state.label().to_string(),
                    probability: self.state_probability(state),
                })
                .collect(),
            queue_average_length: self.queue_average_length(),
            relative_throughput: self.relative_throughput(),
            average_sojourn_time: self.average_sojourn_time(),
            ticks: self.ticks,
            inputs: self.inputs,
            outputs: self.outputs,
        }
    }
}

/// Probability of one occupancy state, labeled for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateProbability {
    /// Three-digit occupancy label
    pub state: String,

    /// Fraction of recorded states
    pub probability: f64,
}

/// All derived statistics of a run, in reporting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// The 8 state probabilities in canonical index order
    pub state_probabilities: Vec<StateProbability>,

    /// Mean buffer occupancy per elapsed tick
    pub queue_average_length: f64,

    /// Completed / admitted units
    pub relative_throughput: f64,

    /// Mean ticks a completed unit spent in the system
    pub average_sojourn_time: f64,

    /// Loss-corrected elapsed ticks
    pub ticks: u64,

    /// Units admitted
    pub inputs: u64,

    /// Units completed
    pub outputs: u64,
}
