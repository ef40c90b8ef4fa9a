use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Duration as TimeDelta, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::types::{Outcome, OutcomeSource, RandomOutcomes, Simulator, TickSummary};
use crate::tasks::generator::random_task;
use crate::tasks::state::valid_status_transition;
use crate::tasks::types::{Priority, Status, Task, TaskKind};

/// Share of due tasks that resolve to Completed.
pub const SUCCESS_RATE: f64 = 0.9;

impl Simulator {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            rng: StdRng::from_os_rng(),
            outcomes: Box::new(RandomOutcomes::new(SUCCESS_RATE)),
        }
    }

    /// Reproducible runs: both generation and outcomes are seeded.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            tasks: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            outcomes: Box::new(RandomOutcomes::seeded(seed, SUCCESS_RATE)),
        }
    }

    pub fn with_outcomes(outcomes: Box<dyn OutcomeSource>) -> Self {
        Self {
            tasks: Vec::new(),
            rng: StdRng::from_os_rng(),
            outcomes,
        }
    }

    /// The five tasks the dashboard starts with.
    pub fn seed_tasks(&mut self, now: DateTime<Utc>) {
        self.add_task(Task::new(
            "Post product launch announcement on LinkedIn",
            "LinkedIn",
            TaskKind::Post,
            Priority::High,
            now + TimeDelta::hours(1),
        ));
        self.add_task(Task::new(
            "Create Instagram story series for new feature",
            "Instagram",
            TaskKind::Post,
            Priority::Medium,
            now + TimeDelta::hours(2),
        ));
        self.add_task(Task::new(
            "Optimize Meta ad campaign targeting",
            "Meta",
            TaskKind::Ad,
            Priority::High,
            now + TimeDelta::minutes(30),
        ));
        self.add_task(Task::new(
            "Generate weekly analytics report",
            "All Platforms",
            TaskKind::Report,
            Priority::Medium,
            now + TimeDelta::hours(3),
        ));
        self.add_task(Task::new(
            "Respond to comments and messages",
            "Meta",
            TaskKind::Engagement,
            Priority::Low,
            now + TimeDelta::minutes(15),
        ));
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Generate a random task and append it to the collection. Always
    /// succeeds.
    pub fn create_task(&mut self, now: DateTime<Utc>) -> Task {
        let task = random_task(&mut self.rng, now);
        self.tasks.push(task.clone());
        task
    }

    /// Remove the task with this id. Absent ids are a no-op.
    pub fn delete_task(&mut self, id: Uuid) {
        self.tasks.retain(|task| task.id != id);
    }

    /// Resolve every due pending task exactly once; everything else is
    /// left untouched.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickSummary {
        let mut summary = TickSummary::default();

        for task in &mut self.tasks {
            if !task.is_due(now) {
                continue;
            }

            let next = match self.outcomes.next_outcome() {
                Outcome::Success => Status::Completed,
                Outcome::Failure => Status::Failed,
            };

            if !valid_status_transition(&task.status, &next) {
                warn!(id = %task.id, from = ?task.status, to = ?next, "skipping invalid status transition");
                continue;
            }

            debug!(id = %task.id, title = %task.title, status = ?next, "task resolved");
            task.status = next;
            summary.resolved += 1;
            match next {
                Status::Failed => summary.failed += 1,
                _ => summary.completed += 1,
            }
        }

        summary.pending = self
            .tasks
            .iter()
            .filter(|task| task.status == Status::Pending)
            .count();
        summary
    }

    /// Current collection in insertion order, seed set first.
    pub fn list_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Periodic tick loop. The run flag gates each tick, so a paused agent
/// never resolves anything; after every executed tick the pending count
/// is pushed into the shared gauge. Ends on the shutdown signal and never
/// ticks again afterwards.
pub async fn run_simulator(
    simulator: Arc<Mutex<Simulator>>,
    running: Arc<AtomicBool>,
    pending: Arc<AtomicUsize>,
    period: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut interval = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if !running.load(Ordering::SeqCst) {
                    continue;
                }

                let summary = simulator.lock().await.tick(Utc::now());
                pending.store(summary.pending, Ordering::SeqCst);

                if summary.resolved > 0 {
                    info!(
                        resolved = summary.resolved,
                        completed = summary.completed,
                        failed = summary.failed,
                        pending = summary.pending,
                        "tick resolved due tasks"
                    );
                }
            }
            _ = shutdown.recv() => {
                debug!("tick loop stopped");
                break;
            }
        }
    }
}
