use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::models::{Project, Task, TaskStatus};

use super::progress::percent;

/// Days ahead of today that still count as an upcoming deadline.
pub const UPCOMING_WINDOW_DAYS: u64 = 7;

#[derive(Debug, Default, Clone, Serialize)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct KpiTotals {
    pub beneficiaries: u64,
    pub volunteers: u64,
    pub budget: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingTask {
    pub project_id: String,
    pub project_title: String,
    pub task: Task,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_projects: usize,
    pub active_projects: usize,
    pub total_tasks: usize,
    pub by_status: StatusCounts,
    pub completion_rate: u8,
    pub average_progress: u8,
    pub upcoming: Vec<UpcomingTask>,
    pub kpi: KpiTotals,
}

impl DashboardStats {
    pub fn upcoming_deadlines(&self) -> usize {
        self.upcoming.len()
    }
}

/// Derive the reporting view from the current project set.
pub fn dashboard_stats(projects: &[Project], today: NaiveDate) -> DashboardStats {
    let mut by_status = StatusCounts::default();
    let mut kpi = KpiTotals::default();
    let mut total_tasks = 0;

    for p in projects {
        kpi.beneficiaries += p.kpi.beneficiaries;
        kpi.volunteers += p.kpi.volunteers;
        kpi.budget += p.kpi.budget;
        for t in &p.tasks {
            total_tasks += 1;
            match t.status {
                TaskStatus::Todo => by_status.todo += 1,
                TaskStatus::InProgress => by_status.in_progress += 1,
                TaskStatus::Done => by_status.done += 1,
            }
        }
    }

    let progress_sum: usize = projects.iter().map(|p| p.progress as usize).sum();

    DashboardStats {
        total_projects: projects.len(),
        active_projects: projects.iter().filter(|p| p.is_active()).count(),
        total_tasks,
        completion_rate: percent(by_status.done, total_tasks),
        average_progress: average(progress_sum, projects.len()),
        upcoming: upcoming_deadlines(projects, today),
        by_status,
        kpi,
    }
}

/// Open tasks due within `[today, today + 7 days]`, soonest first.
pub fn upcoming_deadlines(projects: &[Project], today: NaiveDate) -> Vec<UpcomingTask> {
    let horizon = today
        .checked_add_days(Days::new(UPCOMING_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);

    let mut upcoming: Vec<UpcomingTask> = projects
        .iter()
        .flat_map(|p| {
            p.tasks
                .iter()
                .filter(|t| !t.is_done() && t.due_date >= today && t.due_date <= horizon)
                .map(move |t| UpcomingTask {
                    project_id: p.id.clone(),
                    project_title: p.title.clone(),
                    task: t.clone(),
                })
        })
        .collect();
    upcoming.sort_by_key(|u| u.task.due_date);
    upcoming
}

// Mean of per-project percentages; an empty set divides by one.
fn average(sum: usize, count: usize) -> u8 {
    let count = count.max(1);
    ((2 * sum + count) / (2 * count)).min(100) as u8
}
