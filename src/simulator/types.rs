use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::tasks::types::Task;

/// Terminal result of resolving one due task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Where resolution outcomes come from. Injectable so tests can force
/// either branch instead of sampling.
pub trait OutcomeSource: Send {
    fn next_outcome(&mut self) -> Outcome;
}

/// Samples outcomes at a fixed success rate (0.9 in the reference
/// behavior).
pub struct RandomOutcomes {
    pub rng: StdRng,
    pub success_rate: f64,
}

impl RandomOutcomes {
    pub fn new(success_rate: f64) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            success_rate,
        }
    }

    pub fn seeded(seed: u64, success_rate: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            success_rate,
        }
    }
}

impl OutcomeSource for RandomOutcomes {
    fn next_outcome(&mut self) -> Outcome {
        if self.rng.random_bool(self.success_rate) {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

/// Replays a fixed list of outcomes, then keeps answering Success.
pub struct ScriptedOutcomes {
    pub script: VecDeque<Outcome>,
}

impl ScriptedOutcomes {
    pub fn new(script: impl IntoIterator<Item = Outcome>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl OutcomeSource for ScriptedOutcomes {
    fn next_outcome(&mut self) -> Outcome {
        self.script.pop_front().unwrap_or(Outcome::Success)
    }
}

/// Owns the task collection and advances it over simulated time.
pub struct Simulator {
    pub tasks: Vec<Task>,
    pub rng: StdRng,
    pub outcomes: Box<dyn OutcomeSource>,
}

/// Counts from one tick; `pending` is what the caller pushes to the
/// stats sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    pub resolved: usize,
    pub completed: usize,
    pub failed: usize,
    pub pending: usize,
}
