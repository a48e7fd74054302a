use serde_json::json;

use crate::ai::{self, GeminiClient};
use crate::cli::{finish, open_state, print_json, runtime};
use crate::config::Config;
use crate::error::NgoError;
use crate::output;
use crate::rules::report::dashboard_stats;

pub fn run(with_ai: bool, config: &Config, json_output: bool) -> i32 {
    finish(run_inner(with_ai, config, json_output), json_output)
}

fn run_inner(with_ai: bool, config: &Config, json_output: bool) -> Result<i32, NgoError> {
    let state = open_state(config)?;
    let stats = dashboard_stats(state.get(), config.today());

    let summary = if with_ai {
        if !json_output {
            eprintln!("{}", ai::SUMMARY_LOADING);
        }
        let client = GeminiClient::new(&config.ai);
        Some(runtime()?.block_on(ai::summary_or_fallback(&client, &stats)))
    } else {
        None
    };

    if json_output {
        let mut data = output::json::stats_json(&stats);
        data["today"] = json!(config.today().to_string());
        if let Some(summary) = &summary {
            data["summary"] = json!(summary);
        }
        print_json(&output::json::success(data));
    } else {
        output::text::print_stats(&stats);
        if let Some(summary) = summary {
            println!();
            println!("AI summary: {summary}");
        }
    }
    Ok(0)
}
