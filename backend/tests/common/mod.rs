//! Shared test helpers

use queuing_simulator_core_rs::UniformSource;

/// Variate source that replays a fixed script, cycling when exhausted.
///
/// Lets a test force exact Bernoulli outcomes: with every probability at
/// 0.5, a variate of 0.25 derives `true` (0.25 <= 0.5) and 0.75 derives
/// `false`.
pub struct ScriptedRng {
    values: Vec<f64>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(values: &[f64]) -> Self {
        assert!(!values.is_empty(), "script must not be empty");
        Self {
            values: values.to_vec(),
            pos: 0,
        }
    }
}

impl UniformSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}
