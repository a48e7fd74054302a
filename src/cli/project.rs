use std::io::Read;

use chrono::NaiveDate;
use serde_json::json;

use crate::ai::{self, GeminiClient, GeneratedPlan};
use crate::cli::commands::ProjectCommands;
use crate::cli::{confirm::confirm, finish, open_state, print_json, runtime};
use crate::config::Config;
use crate::error::NgoError;
use crate::models::{Kpi, Project};
use crate::ops::project_ops::{self, NewProject, ProjectSettings};
use crate::ops::resolve::resolve_project;
use crate::output;

pub fn run(cmd: ProjectCommands, config: &Config, json_output: bool) -> i32 {
    let result = match cmd {
        ProjectCommands::Create { title, start, end, goal, description, budget } => {
            let input = new_project(title, description, start, end, budget);
            run_create(input, goal.as_deref(), config, json_output)
        }
        ProjectCommands::Import { title, start, end, budget } => {
            let input = new_project(title, None, start, end, budget);
            run_import(input, config, json_output)
        }
        ProjectCommands::List { search } => run_list(search.as_deref(), config, json_output),
        ProjectCommands::Show { reference } => run_show(&reference, config, json_output),
        ProjectCommands::Edit {
            reference,
            title,
            description,
            start,
            end,
            beneficiaries,
            volunteers,
            budget,
        } => {
            let settings = ProjectSettings {
                title,
                description,
                start_date: start,
                end_date: end,
                beneficiaries,
                volunteers,
                budget,
            };
            run_edit(&reference, &settings, config, json_output)
        }
        ProjectCommands::Delete { reference, yes } => run_delete(&reference, yes, config, json_output),
    };
    finish(result, json_output)
}

fn new_project(
    title: String,
    description: Option<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    budget: Option<f64>,
) -> NewProject {
    NewProject {
        title,
        description: description.unwrap_or_default(),
        start_date,
        end_date,
        kpi: Kpi {
            budget: budget.unwrap_or(0.0),
            ..Kpi::default()
        },
    }
}

fn run_create(
    input: NewProject,
    goal: Option<&str>,
    config: &Config,
    json_output: bool,
) -> Result<i32, NgoError> {
    let mut state = open_state(config)?;

    let goal = goal.map(str::trim).filter(|g| !g.is_empty());
    let (project, notice) = match goal {
        None => (project_ops::create_project(input, Vec::new())?, None),
        Some(goal) => {
            // Validate before spending a network round trip.
            project_ops::create_project(input.clone(), Vec::new())?;
            if !json_output {
                eprintln!("Drafting a plan for \"{}\"...", input.title.trim());
            }
            let client = GeminiClient::new(&config.ai);
            let (plan, notice) = runtime()?.block_on(ai::plan_or_fallback(&client, &input.title, goal));
            (project_ops::project_from_plan(input, goal, plan.as_ref())?, notice)
        }
    };

    state.add_project(project.clone())?;
    print_created(&project, notice, json_output);
    Ok(0)
}

fn run_import(input: NewProject, config: &Config, json_output: bool) -> Result<i32, NgoError> {
    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;
    let plan: GeneratedPlan = serde_json::from_str(&raw)
        .map_err(|e| NgoError::validation(format!("Invalid plan JSON on stdin: {e}")))?;

    let mut state = open_state(config)?;
    let project = project_ops::project_from_plan(input, "", Some(&plan))?;
    state.add_project(project.clone())?;
    print_created(&project, None, json_output);
    Ok(0)
}

fn print_created(project: &Project, notice: Option<&str>, json_output: bool) {
    if json_output {
        let mut data = output::json::project_detail(project);
        data["notice"] = json!(notice);
        print_json(&output::json::success(data));
    } else {
        if let Some(notice) = notice {
            eprintln!("{notice}");
        }
        println!("Created project: {} ({})", project.title, project.id);
        if !project.tasks.is_empty() {
            println!("  {} tasks drafted", project.tasks.len());
        }
    }
}

fn run_list(search: Option<&str>, config: &Config, json_output: bool) -> Result<i32, NgoError> {
    let state = open_state(config)?;
    let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();
    let projects: Vec<Project> = state
        .get()
        .iter()
        .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    if json_output {
        let data: Vec<_> = projects.iter().map(output::json::project_summary).collect();
        print_json(&output::json::success(json!(data)));
    } else {
        output::text::print_project_list(&projects);
    }
    Ok(0)
}

fn run_show(reference: &str, config: &Config, json_output: bool) -> Result<i32, NgoError> {
    let state = open_state(config)?;
    let project = resolve_project(state.get(), reference)?;

    if json_output {
        print_json(&output::json::success(output::json::project_detail(project)));
    } else {
        output::text::print_project(project);
        println!();
        println!("Tasks:");
        output::text::print_task_list(&project.tasks);
        println!("Documents:");
        output::text::print_documents(&project.documents);
    }
    Ok(0)
}

fn run_edit(
    reference: &str,
    settings: &ProjectSettings,
    config: &Config,
    json_output: bool,
) -> Result<i32, NgoError> {
    let mut state = open_state(config)?;
    let project = resolve_project(state.get(), reference)?;
    let updated = project_ops::update_settings(project, settings)?;
    state.replace_project(updated.clone())?;

    if json_output {
        print_json(&output::json::success(output::json::project_detail(&updated)));
    } else {
        println!("Updated project: {} ({})", updated.title, updated.id);
    }
    Ok(0)
}

fn run_delete(reference: &str, yes: bool, config: &Config, json_output: bool) -> Result<i32, NgoError> {
    let mut state = open_state(config)?;
    let project = resolve_project(state.get(), reference)?;
    let (id, title) = (project.id.clone(), project.title.clone());

    let prompt = format!(
        "Delete project \"{title}\" with {} tasks and {} documents?",
        project.tasks.len(),
        project.documents.len()
    );
    if !confirm(&prompt, yes)? {
        return Err(NgoError::aborted(&format!("project \"{title}\"")));
    }

    let removed = state.remove_project(&id)?;
    if json_output {
        print_json(&output::json::success(json!({
            "id": removed.id,
            "title": removed.title,
            "deleted": true
        })));
    } else {
        println!("Deleted project: {} ({})", removed.title, removed.id);
    }
    Ok(0)
}
