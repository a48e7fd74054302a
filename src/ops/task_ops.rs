use chrono::NaiveDate;

use crate::error::NgoError;
use crate::models::{Project, Task, TaskPriority, TaskStatus};
use crate::rules::{progress, transition};

use super::{new_id, now_timestamp};

pub const DEFAULT_ASSIGNEE: &str = "Unassigned";

/// Caller input for a manually created task. Carries no status:
/// new tasks always start as `Todo`.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub assignee: Option<String>,
    pub assignee_avatar: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
}

/// Field-level patch applied by a direct edit. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub assignee: Option<String>,
    pub assignee_avatar: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDate>,
}

impl TaskEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.assignee.is_none()
            && self.assignee_avatar.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}

/// Replace a project's task list and recompute its progress.
///
/// Every task-mutating operation funnels through here.
pub fn with_tasks(project: &Project, tasks: Vec<Task>) -> Project {
    Project {
        progress: progress::compute_progress(&tasks),
        tasks,
        ..project.clone()
    }
}

/// Build a `Todo` task owned by `project`. Returns `None` for a blank title.
pub fn build_task(project: &Project, input: &NewTask) -> Option<Task> {
    let title = input.title.trim();
    if title.is_empty() {
        return None;
    }
    let assignee = input
        .assignee
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(DEFAULT_ASSIGNEE);

    Some(Task {
        id: new_id(),
        title: title.to_string(),
        assignee: assignee.to_string(),
        assignee_avatar: input.assignee_avatar.clone().filter(|a| !a.trim().is_empty()),
        due_date: input.due_date.unwrap_or(project.end_date),
        created_at: Some(now_timestamp()),
        status: TaskStatus::Todo,
        priority: input.priority.unwrap_or(TaskPriority::Medium),
    })
}

/// Append tasks in order, then recompute once over the full list.
pub fn append_tasks(project: &Project, new_tasks: impl IntoIterator<Item = Task>) -> Project {
    let mut tasks = project.tasks.clone();
    tasks.extend(new_tasks);
    with_tasks(project, tasks)
}

/// Manual creation. A blank title is a no-op and yields `None`.
pub fn add_task(project: &Project, input: &NewTask) -> Option<(Project, Task)> {
    let task = build_task(project, input)?;
    Some((append_tasks(project, [task.clone()]), task))
}

pub fn edit_task(project: &Project, task_id: &str, edit: &TaskEdit) -> Result<Project, NgoError> {
    if let Some(title) = &edit.title {
        if title.trim().is_empty() {
            return Err(NgoError::validation("Task title cannot be empty"));
        }
    }
    update_task(project, task_id, |task| {
        if let Some(title) = &edit.title {
            task.title = title.trim().to_string();
        }
        if let Some(assignee) = &edit.assignee {
            let assignee = assignee.trim();
            task.assignee = if assignee.is_empty() {
                DEFAULT_ASSIGNEE.to_string()
            } else {
                assignee.to_string()
            };
        }
        if let Some(avatar) = &edit.assignee_avatar {
            task.assignee_avatar = Some(avatar.trim().to_string()).filter(|a| !a.is_empty());
        }
        if let Some(priority) = edit.priority {
            task.priority = priority;
        }
        if let Some(status) = edit.status {
            task.status = status;
        }
        if let Some(due) = edit.due_date {
            task.due_date = due;
        }
        Ok(())
    })
}

/// Status-only transition; any of the three states is reachable.
pub fn move_task(project: &Project, task_id: &str, status: TaskStatus) -> Result<Project, NgoError> {
    update_task(project, task_id, |task| {
        task.status = status;
        Ok(())
    })
}

pub fn advance_task(project: &Project, task_id: &str) -> Result<Project, NgoError> {
    update_task(project, task_id, |task| {
        task.status = transition::advance(task.status)?;
        Ok(())
    })
}

pub fn revert_task(project: &Project, task_id: &str) -> Result<Project, NgoError> {
    update_task(project, task_id, |task| {
        task.status = transition::revert(task.status)?;
        Ok(())
    })
}

pub fn delete_task(project: &Project, task_id: &str) -> Result<Project, NgoError> {
    if project.task(task_id).is_none() {
        return Err(NgoError::task_not_found(task_id));
    }
    let tasks = project
        .tasks
        .iter()
        .filter(|t| t.id != task_id)
        .cloned()
        .collect();
    Ok(with_tasks(project, tasks))
}

fn update_task<F>(project: &Project, task_id: &str, apply: F) -> Result<Project, NgoError>
where
    F: FnOnce(&mut Task) -> Result<(), NgoError>,
{
    let mut tasks = project.tasks.clone();
    let task = tasks
        .iter_mut()
        .find(|t| t.id == task_id)
        .ok_or_else(|| NgoError::task_not_found(task_id))?;
    apply(task)?;
    Ok(with_tasks(project, tasks))
}
