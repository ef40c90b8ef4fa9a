use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Post,
    Ad,
    Analytics,
    Engagement,
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A unit of simulated marketing work. Only `status` changes after
/// creation, and only through the simulator's tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub platform: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub status: Status,
    pub scheduled_for: DateTime<Utc>,
    pub priority: Priority,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        platform: impl Into<String>,
        kind: TaskKind,
        priority: Priority,
        scheduled_for: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            platform: platform.into(),
            kind,
            status: Status::Pending,
            scheduled_for,
            priority,
        }
    }

    /// Pending and past its scheduled time.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == Status::Pending && self.scheduled_for <= now
    }

    /// Dashboard wording for the current status. "Failed - will retry" is
    /// kept from the reference dashboard even though nothing retries.
    pub fn status_message(&self) -> String {
        match self.status {
            Status::Pending => format!("Scheduled for {}", self.scheduled_for.to_rfc3339()),
            Status::Running => "Running...".to_string(),
            Status::Completed => "Completed".to_string(),
            Status::Failed => "Failed - will retry".to_string(),
        }
    }
}
