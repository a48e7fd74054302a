use crate::error::NgoError;
use crate::models::TaskStatus;

/// One step forward: `Todo → InProgress → Done`.
pub fn advance(current: TaskStatus) -> Result<TaskStatus, NgoError> {
    match current {
        TaskStatus::Todo => Ok(TaskStatus::InProgress),
        TaskStatus::InProgress => Ok(TaskStatus::Done),
        TaskStatus::Done => Err(NgoError::invalid_transition(current.as_str(), "advance")),
    }
}

/// One step back: `Done → InProgress → Todo`.
pub fn revert(current: TaskStatus) -> Result<TaskStatus, NgoError> {
    match current {
        TaskStatus::Done => Ok(TaskStatus::InProgress),
        TaskStatus::InProgress => Ok(TaskStatus::Todo),
        TaskStatus::Todo => Err(NgoError::invalid_transition(current.as_str(), "revert")),
    }
}
