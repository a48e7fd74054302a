//! Generative-AI collaborators: plan drafting and impact summaries.
//!
//! Both are optional. Failures are recovered here so callers only ever see a
//! plan-or-nothing and a summary-or-placeholder.

pub mod gemini;
pub mod plan;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::NgoError;
use crate::rules::report::DashboardStats;

pub use gemini::GeminiClient;
pub use plan::GeneratedPlan;

pub const SUMMARY_LOADING: &str = "Analyzing your impact data...";
pub const SUMMARY_FALLBACK: &str = "Unable to generate analysis at this time.";
pub const SUMMARY_EMPTY: &str = "No data available for analysis.";
pub const PLAN_FALLBACK_NOTICE: &str = "Failed to generate plan with AI. Creating basic project.";

#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn generate_plan(&self, title: &str, goal: &str) -> Result<GeneratedPlan, NgoError>;
}

#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    async fn summarize(&self, stats: &Value) -> Result<String, NgoError>;
}

/// Draft a plan, or `None` with a user-facing notice when drafting fails or
/// comes back empty.
pub async fn plan_or_fallback(
    generator: &dyn PlanGenerator,
    title: &str,
    goal: &str,
) -> (Option<GeneratedPlan>, Option<&'static str>) {
    match generator.generate_plan(title, goal).await {
        Ok(plan) if !plan.is_empty() => (Some(plan), None),
        Ok(_) => {
            warn!(title, "plan generation returned nothing");
            (None, Some(PLAN_FALLBACK_NOTICE))
        }
        Err(e) => {
            warn!(title, error = %e, "plan generation failed");
            (None, Some(PLAN_FALLBACK_NOTICE))
        }
    }
}

pub async fn summary_or_fallback(generator: &dyn SummaryGenerator, stats: &DashboardStats) -> String {
    match generator.summarize(&impact_stats(stats)).await {
        Ok(text) if text.trim().is_empty() => SUMMARY_EMPTY.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!(error = %e, "summary generation failed");
            SUMMARY_FALLBACK.to_string()
        }
    }
}

/// The aggregate figures handed to the summary model.
pub fn impact_stats(stats: &DashboardStats) -> Value {
    json!({
        "projects": stats.total_projects,
        "beneficiaries": stats.kpi.beneficiaries,
        "volunteers": stats.kpi.volunteers,
        "totalBudget": stats.kpi.budget,
        "completionRate": format!("{}%", stats.average_progress)
    })
}
