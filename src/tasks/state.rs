use std::collections::HashMap;

use super::types::Status;

/// Whether `src -> dst` is a legal status transition. The simulator only
/// ever takes Pending straight to a terminal status; Running is admitted
/// here so an explicit dispatch step can be added without touching the
/// table. Terminal statuses have no way out.
pub fn valid_status_transition(src: &Status, dst: &Status) -> bool {
    let transition_map: HashMap<Status, Vec<Status>> = {
        let mut map = HashMap::new();
        map.insert(
            Status::Pending,
            vec![Status::Running, Status::Completed, Status::Failed],
        );
        map.insert(Status::Running, vec![Status::Completed, Status::Failed]);
        map.insert(Status::Completed, vec![]);
        map.insert(Status::Failed, vec![]);
        map
    };

    if let Some(valid_states) = transition_map.get(src) {
        valid_states.contains(dst)
    } else {
        false
    }
}
