use crate::models::Task;

/// Percentage of `tasks` that are done, rounded half away from zero.
///
/// An empty list is 0%, never vacuously complete.
pub fn compute_progress(tasks: &[Task]) -> u8 {
    let done = tasks.iter().filter(|t| t.is_done()).count();
    percent(done, tasks.len())
}

/// `round(100 * part / whole)` in integer arithmetic; 0 when `whole` is 0.
pub fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u64;
    let whole = whole as u64;
    ((200 * part + whole) / (2 * whole)) as u8
}
