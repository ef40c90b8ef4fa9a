use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use super::types::{Priority, Task, TaskKind};

pub const TASK_TITLES: &[&str] = &[
    "Create engaging carousel post",
    "Launch retargeting campaign",
    "Analyze competitor performance",
    "Schedule weekly content batch",
    "Design promotional graphics",
    "Update ad copy variations",
    "Monitor brand mentions",
    "Generate performance insights",
];

pub const PLATFORMS: &[&str] = &["Meta", "LinkedIn", "Instagram", "Twitter", "Facebook"];

const KINDS: &[TaskKind] = &[
    TaskKind::Post,
    TaskKind::Ad,
    TaskKind::Analytics,
    TaskKind::Engagement,
    TaskKind::Report,
];

const PRIORITIES: &[Priority] = &[Priority::High, Priority::Medium, Priority::Low];

/// Build a pending task with attributes drawn from the candidate sets and
/// a scheduled time within the next 24 hours.
pub fn random_task(rng: &mut impl Rng, now: DateTime<Utc>) -> Task {
    let offset = Duration::seconds(rng.random_range(0..86_400));
    Task::new(
        TASK_TITLES[rng.random_range(0..TASK_TITLES.len())],
        PLATFORMS[rng.random_range(0..PLATFORMS.len())],
        KINDS[rng.random_range(0..KINDS.len())],
        PRIORITIES[rng.random_range(0..PRIORITIES.len())],
        now + offset,
    )
}
