use serde_json::json;

use crate::cli::{finish, open_state, print_json};
use crate::config::Config;
use crate::error::NgoError;
use crate::ops::resolve::resolve_project;
use crate::output;
use crate::rules::agenda;

pub fn run(month: Option<&str>, project: Option<&str>, config: &Config, json_output: bool) -> i32 {
    finish(run_inner(month, project, config, json_output), json_output)
}

fn run_inner(
    month: Option<&str>,
    project_ref: Option<&str>,
    config: &Config,
    json_output: bool,
) -> Result<i32, NgoError> {
    let first = match month {
        Some(m) => agenda::parse_month(m)?,
        None => agenda::month_start(config.today()),
    };

    let state = open_state(config)?;
    let project_id = match project_ref {
        Some(r) => Some(resolve_project(state.get(), r)?.id.clone()),
        None => None,
    };
    let days = agenda::month_agenda(state.get(), first, project_id.as_deref());

    if json_output {
        print_json(&output::json::success(json!({
            "month": first.format("%Y-%m").to_string(),
            "days": output::json::agenda_json(&days)
        })));
    } else {
        println!("{}", first.format("%B %Y"));
        output::text::print_agenda(&days);
    }
    Ok(0)
}
