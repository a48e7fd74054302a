//! Pure transformations over a project snapshot.
//!
//! Each operation takes the current value and returns a new one; nothing here
//! touches storage. The state container applies the result as a whole-state
//! replacement.

pub mod document_ops;
pub mod project_ops;
pub mod resolve;
pub mod task_ops;

pub(crate) fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
