use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Document, Task};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub beneficiaries: u64,
    pub volunteers: u64,
    pub budget: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "super::date")]
    pub start_date: NaiveDate,
    #[serde(with = "super::date")]
    pub end_date: NaiveDate,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub documents: Vec<Document>,
    /// Derived from `tasks`; see `rules::progress`.
    pub progress: u8,
    #[serde(default)]
    pub kpi: Kpi,
}

impl Project {
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_active(&self) -> bool {
        self.progress < 100
    }
}
