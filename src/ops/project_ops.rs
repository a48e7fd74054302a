use chrono::NaiveDate;

use crate::ai::plan::GeneratedPlan;
use crate::error::NgoError;
use crate::models::{Kpi, Project, Task, TaskPriority, TaskStatus};
use crate::rules::progress;

use super::{new_id, now_timestamp};

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub kpi: Kpi,
}

/// Settings edit. `None` keeps the current value; tasks are never touched.
#[derive(Debug, Clone, Default)]
pub struct ProjectSettings {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub beneficiaries: Option<u64>,
    pub volunteers: Option<u64>,
    pub budget: Option<f64>,
}

fn validate(title: &str, start: NaiveDate, end: NaiveDate, kpi: &Kpi) -> Result<(), NgoError> {
    if title.trim().is_empty() {
        return Err(NgoError::validation("Project title is required"));
    }
    if end < start {
        return Err(NgoError::validation(format!(
            "End date {end} is before start date {start}"
        )));
    }
    if !kpi.budget.is_finite() || kpi.budget < 0.0 {
        return Err(NgoError::validation("Budget must be a non-negative number"));
    }
    Ok(())
}

/// Create a project seeded with `tasks`; progress is computed from that set.
pub fn create_project(input: NewProject, tasks: Vec<Task>) -> Result<Project, NgoError> {
    validate(&input.title, input.start_date, input.end_date, &input.kpi)?;
    Ok(Project {
        id: new_id(),
        title: input.title.trim().to_string(),
        description: input.description,
        start_date: input.start_date,
        end_date: input.end_date,
        progress: progress::compute_progress(&tasks),
        tasks,
        documents: Vec::new(),
        kpi: input.kpi,
    })
}

/// Map proposed tasks 1:1 into `Todo` tasks due on `due_date`.
///
/// Titles are taken as proposed (trimmed), blank ones included.
pub fn tasks_from_plan(plan: &GeneratedPlan, due_date: NaiveDate) -> Vec<Task> {
    let created_at = now_timestamp();
    plan.tasks
        .iter()
        .map(|t| Task {
            id: new_id(),
            title: t.title.trim().to_string(),
            assignee: if t.assignee.trim().is_empty() {
                super::task_ops::DEFAULT_ASSIGNEE.to_string()
            } else {
                t.assignee.trim().to_string()
            },
            assignee_avatar: None,
            due_date,
            created_at: Some(created_at.clone()),
            status: TaskStatus::Todo,
            priority: TaskPriority::from_label_or_low(&t.priority),
        })
        .collect()
}

/// Create a project from a goal and an optional generated plan.
///
/// Without a plan the project still gets created, with no tasks and the goal
/// as its description. A plan's KPI estimates replace the headcounts in
/// `input.kpi`; the budget always comes from `input`.
pub fn project_from_plan(
    mut input: NewProject,
    goal: &str,
    plan: Option<&GeneratedPlan>,
) -> Result<Project, NgoError> {
    let Some(plan) = plan else {
        if input.description.trim().is_empty() {
            input.description = goal.to_string();
        }
        return create_project(input, Vec::new());
    };

    let tasks = tasks_from_plan(plan, input.end_date);
    if !plan.description.trim().is_empty() {
        input.description = plan.description.trim().to_string();
    } else if input.description.trim().is_empty() {
        input.description = goal.to_string();
    }
    input.kpi.beneficiaries = plan.kpi.beneficiaries;
    input.kpi.volunteers = plan.kpi.volunteers;
    create_project(input, tasks)
}

pub fn update_settings(project: &Project, settings: &ProjectSettings) -> Result<Project, NgoError> {
    let mut next = project.clone();
    if let Some(title) = &settings.title {
        next.title = title.trim().to_string();
    }
    if let Some(description) = &settings.description {
        next.description = description.clone();
    }
    if let Some(start) = settings.start_date {
        next.start_date = start;
    }
    if let Some(end) = settings.end_date {
        next.end_date = end;
    }
    if let Some(b) = settings.beneficiaries {
        next.kpi.beneficiaries = b;
    }
    if let Some(v) = settings.volunteers {
        next.kpi.volunteers = v;
    }
    if let Some(budget) = settings.budget {
        next.kpi.budget = budget;
    }
    validate(&next.title, next.start_date, next.end_date, &next.kpi)?;
    Ok(next)
}

/// New projects go to the front of the list.
pub fn insert_project(projects: &[Project], project: Project) -> Vec<Project> {
    let mut next = Vec::with_capacity(projects.len() + 1);
    next.push(project);
    next.extend(projects.iter().cloned());
    next
}

pub fn replace_project(projects: &[Project], project: Project) -> Result<Vec<Project>, NgoError> {
    if !projects.iter().any(|p| p.id == project.id) {
        return Err(NgoError::project_not_found(&project.id));
    }
    Ok(projects
        .iter()
        .map(|p| if p.id == project.id { project.clone() } else { p.clone() })
        .collect())
}

/// Remove a project together with its tasks and documents.
pub fn remove_project(projects: &[Project], id: &str) -> Result<(Vec<Project>, Project), NgoError> {
    let removed = projects
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .ok_or_else(|| NgoError::project_not_found(id))?;
    let rest = projects.iter().filter(|p| p.id != id).cloned().collect();
    Ok((rest, removed))
}
