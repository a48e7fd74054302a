use tracing::{debug, info};

use crate::db::seed::seed_projects;
use crate::error::NgoError;
use crate::models::{Project, Task};
use crate::ops::{project_ops, task_ops};

/// Where whole-state snapshots go after every replacement.
pub trait SnapshotStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Project>>, NgoError>;
    fn save(&self, projects: &[Project]) -> Result<(), NgoError>;
}

/// The single owner of the project set.
///
/// Readers see `get()`; writers hand a complete new set to `replace()`. The
/// in-memory set is swapped before the snapshot is written, so a failed write
/// loses at most that one change on the next start.
pub struct StateContainer<S: SnapshotStore> {
    store: S,
    projects: Vec<Project>,
    seeded: bool,
}

impl<S: SnapshotStore> StateContainer<S> {
    /// Load the stored set, or fall back to the built-in seed data.
    pub fn open(store: S) -> Result<Self, NgoError> {
        let (projects, seeded) = match store.load()? {
            Some(projects) => (projects, false),
            None => {
                debug!("no stored projects, using seed data");
                (seed_projects(), true)
            }
        };
        Ok(Self {
            store,
            projects,
            seeded,
        })
    }

    pub fn get(&self) -> &[Project] {
        &self.projects
    }

    /// True when the current set came from the seed rather than the store.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn project(&self, id: &str) -> Result<&Project, NgoError> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| NgoError::project_not_found(id))
    }

    pub fn replace(&mut self, next: Vec<Project>) -> Result<(), NgoError> {
        self.projects = next;
        self.seeded = false;
        self.store.save(&self.projects)
    }

    /// Swap in a new version of an existing project.
    pub fn replace_project(&mut self, project: Project) -> Result<(), NgoError> {
        let next = project_ops::replace_project(&self.projects, project)?;
        self.replace(next)
    }

    /// Append one task to a project and recompute its progress.
    pub fn append_task(&mut self, project_id: &str, task: Task) -> Result<Project, NgoError> {
        let updated = task_ops::append_tasks(self.project(project_id)?, [task]);
        info!(project = %updated.id, progress = updated.progress, "task appended");
        self.replace_project(updated.clone())?;
        Ok(updated)
    }

    pub fn add_project(&mut self, project: Project) -> Result<(), NgoError> {
        info!(project = %project.id, tasks = project.tasks.len(), "project added");
        let next = project_ops::insert_project(&self.projects, project);
        self.replace(next)
    }

    /// Remove a project with everything it owns.
    pub fn remove_project(&mut self, id: &str) -> Result<Project, NgoError> {
        let (next, removed) = project_ops::remove_project(&self.projects, id)?;
        info!(project = %removed.id, tasks = removed.tasks.len(), "project removed");
        self.replace(next)?;
        Ok(removed)
    }
}
