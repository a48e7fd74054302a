use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::error::NgoError;
use crate::models::{Project, Task};

#[derive(Debug, Clone, Serialize)]
pub struct AgendaEntry {
    pub project_id: String,
    pub project_title: String,
    pub task: Task,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub entries: Vec<AgendaEntry>,
}

/// First day of the month named by `YYYY-MM`.
pub fn parse_month(raw: &str) -> Result<NaiveDate, NgoError> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| NgoError::validation(format!("Invalid month '{raw}', expected YYYY-MM")))
}

pub fn month_start(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

/// Tasks due in the month starting at `first`, grouped by day in date order.
///
/// `project_id` restricts the agenda to one project.
pub fn month_agenda(projects: &[Project], first: NaiveDate, project_id: Option<&str>) -> Vec<AgendaDay> {
    let first = month_start(first);
    let next = first.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX);

    let mut days: BTreeMap<NaiveDate, Vec<AgendaEntry>> = BTreeMap::new();
    for p in projects {
        if project_id.is_some_and(|id| id != p.id) {
            continue;
        }
        for t in &p.tasks {
            if t.due_date >= first && t.due_date < next {
                days.entry(t.due_date).or_default().push(AgendaEntry {
                    project_id: p.id.clone(),
                    project_title: p.title.clone(),
                    task: t.clone(),
                });
            }
        }
    }

    days.into_iter()
        .map(|(date, entries)| AgendaDay { date, entries })
        .collect()
}
