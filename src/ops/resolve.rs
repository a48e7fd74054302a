use crate::error::NgoError;
use crate::models::{Project, Task};

/// Resolve a project reference: exact ID → ID prefix → title substring.
pub fn resolve_project<'a>(projects: &'a [Project], reference: &str) -> Result<&'a Project, NgoError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(NgoError::project_not_found(reference));
    }

    // 1. Exact ID
    if let Some(p) = projects.iter().find(|p| p.id == reference) {
        return Ok(p);
    }

    // 2. ID prefix
    let by_prefix: Vec<&Project> = projects.iter().filter(|p| p.id.starts_with(reference)).collect();
    if by_prefix.len() == 1 {
        return Ok(by_prefix[0]);
    }
    if by_prefix.len() > 1 {
        return Err(ambiguous_projects(reference, &by_prefix));
    }

    // 3. Title substring, case-insensitive
    let needle = reference.to_lowercase();
    let by_title: Vec<&Project> = projects
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect();
    match by_title.as_slice() {
        [] => Err(NgoError::project_not_found(reference)),
        [p] => Ok(*p),
        _ => Err(ambiguous_projects(reference, &by_title)),
    }
}

fn ambiguous_projects(reference: &str, matches: &[&Project]) -> NgoError {
    let candidates: Vec<String> = matches.iter().map(|p| format!("{} ({})", p.title, p.id)).collect();
    NgoError::ambiguous_ref(reference, &candidates)
}

/// Resolve a task by exact ID or unique ID prefix across all projects.
/// Returns the owning project alongside the task.
pub fn resolve_task<'a>(projects: &'a [Project], reference: &str) -> Result<(&'a Project, &'a Task), NgoError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(NgoError::task_not_found(reference));
    }

    let all = || projects.iter().flat_map(|p| p.tasks.iter().map(move |t| (p, t)));

    if let Some(found) = all().find(|(_, t)| t.id == reference) {
        return Ok(found);
    }

    let matches: Vec<(&Project, &Task)> = all().filter(|(_, t)| t.id.starts_with(reference)).collect();
    match matches.as_slice() {
        [] => Err(NgoError::task_not_found(reference)),
        [found] => Ok(*found),
        _ => {
            let candidates: Vec<String> = matches.iter().map(|(_, t)| format!("{} ({})", t.title, t.id)).collect();
            Err(NgoError::ambiguous_ref(reference, &candidates))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed::seed_projects;
    use crate::error::ErrorCode;

    #[test]
    fn test_project_by_id_prefix_and_title() {
        let projects = seed_projects();
        assert_eq!(resolve_project(&projects, "2").unwrap().title, "Education for All");
        assert_eq!(resolve_project(&projects, "garden").unwrap().id, "3");
        assert_eq!(
            resolve_project(&projects, "nothing").unwrap_err().code,
            ErrorCode::ProjectNotFound
        );
    }

    #[test]
    fn test_ambiguous_title() {
        let projects = seed_projects();
        // "Clean Water Initiative" and "Urban Garden Project" both contain "an"
        let err = resolve_project(&projects, "an").unwrap_err();
        assert_eq!(err.code, ErrorCode::AmbiguousRef);
    }

    #[test]
    fn test_task_lookup_across_projects() {
        let projects = seed_projects();
        let (p, t) = resolve_task(&projects, "t6").unwrap();
        assert_eq!(p.id, "2");
        assert_eq!(t.title, "Curriculum Design");
        // t1 is exact; "t" alone matches every seed task
        assert_eq!(resolve_task(&projects, "t1").unwrap().1.title, "Site Survey");
        assert_eq!(resolve_task(&projects, "t").unwrap_err().code, ErrorCode::AmbiguousRef);
        assert_eq!(resolve_task(&projects, "x").unwrap_err().code, ErrorCode::TaskNotFound);
    }
}
