use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::AiConfig;
use crate::error::NgoError;

use super::plan::GeneratedPlan;
use super::{PlanGenerator, SummaryGenerator};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const PLAN_SYSTEM_PROMPT: &str =
    "You are an expert NGO project manager helping to structure new social impact initiatives.";

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    /// `None` when the HTTP client could not be built; every call then fails.
    http: Option<reqwest::Client>,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Self {
        let http = match reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build() {
            Ok(http) => Some(http),
            Err(e) => {
                warn!(error = %e, "failed to build HTTP client");
                None
            }
        };
        Self {
            http,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate(&self, body: &Value) -> Result<String, NgoError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| NgoError::ai("No API key configured. Set GEMINI_API_KEY."))?;
        let http = self
            .http
            .as_ref()
            .ok_or_else(|| NgoError::ai("HTTP client unavailable"))?;

        debug!(model = %self.model, "calling generateContent");
        let resp = http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(NgoError::ai(format!("API error {status}: {text}")));
        }

        let api_resp: Value = resp
            .json()
            .await
            .map_err(|e| NgoError::ai(format!("Failed to parse API response: {e}")))?;
        response_text(&api_resp).ok_or_else(|| NgoError::ai("No text in API response"))
    }
}

#[async_trait]
impl PlanGenerator for GeminiClient {
    async fn generate_plan(&self, title: &str, goal: &str) -> Result<GeneratedPlan, NgoError> {
        let prompt = format!(
            "Generate a structured project plan for an NGO project titled \"{title}\".\n\
             The goal is: \"{goal}\".\n\
             Create a description, a list of 5-8 initial tasks, and estimated KPIs."
        );
        let body = json!({
            "systemInstruction": { "parts": [{ "text": PLAN_SYSTEM_PROMPT }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": plan_schema()
            }
        });
        let text = self.generate(&body).await?;
        serde_json::from_str(strip_code_fences(&text))
            .map_err(|e| NgoError::ai(format!("Failed to parse generated plan: {e}")))
    }
}

#[async_trait]
impl SummaryGenerator for GeminiClient {
    async fn summarize(&self, stats: &Value) -> Result<String, NgoError> {
        let prompt = format!(
            "Analyze these impact statistics for an NGO and provide a brief, encouraging summary \
             (max 50 words) emphasizing the key achievements. Stats: {stats}"
        );
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
        });
        self.generate(&body).await
    }
}

fn plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "description": {
                "type": "STRING",
                "description": "A professional 2-sentence description of the project."
            },
            "tasks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "priority": { "type": "STRING", "enum": ["Low", "Medium", "High"] },
                        "assignee": {
                            "type": "STRING",
                            "description": "Suggested role for this task (e.g., Coordinator, Field Officer)"
                        }
                    },
                    "required": ["title", "priority", "assignee"]
                }
            },
            "kpi": {
                "type": "OBJECT",
                "properties": {
                    "beneficiaries": { "type": "INTEGER", "description": "Estimated number of beneficiaries" },
                    "volunteers": { "type": "INTEGER", "description": "Estimated number of volunteers needed" }
                },
                "required": ["beneficiaries", "volunteers"]
            }
        },
        "required": ["description", "tasks", "kpi"]
    })
}

/// Concatenated text parts of the first candidate.
fn response_text(api_resp: &Value) -> Option<String> {
    let parts = api_resp["candidates"]
        .as_array()?
        .first()?["content"]["parts"]
        .as_array()?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
