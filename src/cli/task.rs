use serde_json::{json, Value};

use crate::cli::commands::TaskCommands;
use crate::cli::{confirm::confirm, finish, open_state, print_json};
use crate::config::Config;
use crate::error::NgoError;
use crate::models::{Project, TaskStatus};
use crate::ops::resolve::{resolve_project, resolve_task};
use crate::ops::task_ops::{self, NewTask, TaskEdit};
use crate::output;

pub fn run(cmd: TaskCommands, config: &Config, json_output: bool) -> i32 {
    let result = match cmd {
        TaskCommands::Add { title, project, assignee, avatar, priority, due } => {
            let input = NewTask {
                title,
                assignee,
                assignee_avatar: avatar,
                priority,
                due_date: due,
            };
            run_add(&project, &input, config, json_output)
        }
        TaskCommands::List { project, status } => run_list(project.as_deref(), status, config, json_output),
        TaskCommands::Show { id } => run_show(&id, config, json_output),
        TaskCommands::Edit { id, title, assignee, avatar, priority, status, due } => {
            let edit = TaskEdit {
                title,
                assignee,
                assignee_avatar: avatar,
                priority,
                status,
                due_date: due,
            };
            run_edit(&id, &edit, config, json_output)
        }
        TaskCommands::Move { id, status } => {
            run_update(&id, config, json_output, |p, t| task_ops::move_task(p, t, status))
        }
        TaskCommands::Advance { id } => run_update(&id, config, json_output, task_ops::advance_task),
        TaskCommands::Revert { id } => run_update(&id, config, json_output, task_ops::revert_task),
        TaskCommands::Delete { id, yes } => run_delete(&id, yes, config, json_output),
    };
    finish(result, json_output)
}

fn progress_json(project: &Project) -> Value {
    json!({
        "id": project.id,
        "title": project.title,
        "progress": project.progress
    })
}

fn run_add(project_ref: &str, input: &NewTask, config: &Config, json_output: bool) -> Result<i32, NgoError> {
    let mut state = open_state(config)?;
    let project = resolve_project(state.get(), project_ref)?;

    // Blank title: nothing to create, nothing to report.
    let Some(task) = task_ops::build_task(project, input) else {
        if json_output {
            print_json(&output::json::success(json!({
                "task": null,
                "project": progress_json(project)
            })));
        }
        return Ok(0);
    };

    let project_id = project.id.clone();
    let updated = state.append_task(&project_id, task.clone())?;

    if json_output {
        print_json(&output::json::success(json!({
            "task": output::json::task_json(&task),
            "project": progress_json(&updated)
        })));
    } else {
        println!("Added task: {} ({})", task.title, task.id);
        println!("  {} progress: {}%", updated.title, updated.progress);
    }
    Ok(0)
}

fn run_list(
    project_ref: Option<&str>,
    status: Option<TaskStatus>,
    config: &Config,
    json_output: bool,
) -> Result<i32, NgoError> {
    let state = open_state(config)?;
    let projects: Vec<&Project> = match project_ref {
        Some(r) => vec![resolve_project(state.get(), r)?],
        None => state.get().iter().collect(),
    };

    let rows: Vec<_> = projects
        .iter()
        .flat_map(|p| p.tasks.iter().map(move |t| (*p, t)))
        .filter(|(_, t)| status.map_or(true, |s| t.status == s))
        .collect();

    if json_output {
        let data: Vec<_> = rows.iter().map(|(p, t)| output::json::task_with_project(t, p)).collect();
        print_json(&output::json::success(json!(data)));
    } else {
        let tasks: Vec<_> = rows.iter().map(|(_, t)| (*t).clone()).collect();
        output::text::print_task_list(&tasks);
    }
    Ok(0)
}

fn run_show(id: &str, config: &Config, json_output: bool) -> Result<i32, NgoError> {
    let state = open_state(config)?;
    let (project, task) = resolve_task(state.get(), id)?;

    if json_output {
        print_json(&output::json::success(output::json::task_with_project(task, project)));
    } else {
        output::text::print_task(task);
        println!("  Project: {} ({})", project.title, project.id);
    }
    Ok(0)
}

fn run_edit(id: &str, edit: &TaskEdit, config: &Config, json_output: bool) -> Result<i32, NgoError> {
    if edit.is_empty() {
        return Err(NgoError::validation("Nothing to change. Pass at least one field to edit."));
    }
    run_update(id, config, json_output, |p, t| task_ops::edit_task(p, t, edit))
}

/// Apply a single-task change to the owning project and persist it.
fn run_update<F>(id: &str, config: &Config, json_output: bool, apply: F) -> Result<i32, NgoError>
where
    F: FnOnce(&Project, &str) -> Result<Project, NgoError>,
{
    let mut state = open_state(config)?;
    let (project, task) = resolve_task(state.get(), id)?;
    let task_id = task.id.clone();
    let updated = apply(project, &task_id)?;
    state.replace_project(updated.clone())?;
    print_task_change(&updated, &task_id, json_output);
    Ok(0)
}

fn print_task_change(project: &Project, task_id: &str, json_output: bool) {
    let Some(task) = project.task(task_id) else {
        return;
    };
    if json_output {
        let mut data = output::json::task_with_project(task, project);
        data["project_progress"] = json!(project.progress);
        print_json(&output::json::success(data));
    } else {
        println!("Task {} ({}): {}", task.title, task.id, task.status.label());
        println!("  {} progress: {}%", project.title, project.progress);
    }
}

fn run_delete(id: &str, yes: bool, config: &Config, json_output: bool) -> Result<i32, NgoError> {
    let mut state = open_state(config)?;
    let (project, task) = resolve_task(state.get(), id)?;
    let (task_id, title) = (task.id.clone(), task.title.clone());

    if !confirm(&format!("Delete task \"{title}\"?"), yes)? {
        return Err(NgoError::aborted(&format!("task \"{title}\"")));
    }

    let updated = task_ops::delete_task(project, &task_id)?;
    state.replace_project(updated.clone())?;

    if json_output {
        print_json(&output::json::success(json!({
            "id": task_id,
            "deleted": true,
            "project": progress_json(&updated)
        })));
    } else {
        println!("Deleted task: {title} ({task_id})");
        println!("  {} progress: {}%", updated.title, updated.progress);
    }
    Ok(0)
}
