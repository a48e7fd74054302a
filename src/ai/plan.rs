use serde::{Deserialize, Serialize};

/// A project plan drafted by the plan-generation collaborator, or read from
/// stdin by `project import`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedPlan {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<ProposedTask>,
    #[serde(default)]
    pub kpi: ProposedKpi,
}

/// Fields outside this shape (a `status`, say) are ignored on read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposedTask {
    pub title: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub assignee: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposedKpi {
    #[serde(default)]
    pub beneficiaries: u64,
    #[serde(default)]
    pub volunteers: u64,
}

impl GeneratedPlan {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.description.trim().is_empty()
    }
}
