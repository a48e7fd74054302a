use serde_json::json;

use crate::cli::commands::DocCommands;
use crate::cli::{confirm::confirm, finish, open_state, print_json};
use crate::config::Config;
use crate::error::NgoError;
use crate::models::{Document, Project};
use crate::ops::document_ops;
use crate::ops::resolve::resolve_project;
use crate::output;

pub fn run(cmd: DocCommands, config: &Config, json_output: bool) -> i32 {
    let result = match cmd {
        DocCommands::Add { name, project, mime_type } => {
            run_add(&name, &project, mime_type.as_deref(), config, json_output)
        }
        DocCommands::List { project } => run_list(&project, config, json_output),
        DocCommands::Delete { id, yes } => run_delete(&id, yes, config, json_output),
    };
    finish(result, json_output)
}

fn run_add(
    name: &str,
    project_ref: &str,
    mime_type: Option<&str>,
    config: &Config,
    json_output: bool,
) -> Result<i32, NgoError> {
    let mut state = open_state(config)?;
    let project = resolve_project(state.get(), project_ref)?;
    let (updated, doc) = document_ops::attach_document(project, name, mime_type, config.today())?;
    state.replace_project(updated.clone())?;

    if json_output {
        let mut data = output::json::document_json(&doc);
        data["project_id"] = json!(updated.id);
        print_json(&output::json::success(data));
    } else {
        println!("Added document: {} ({}) to {}", doc.name, doc.id, updated.title);
    }
    Ok(0)
}

fn run_list(project_ref: &str, config: &Config, json_output: bool) -> Result<i32, NgoError> {
    let state = open_state(config)?;
    let project = resolve_project(state.get(), project_ref)?;

    if json_output {
        let data: Vec<_> = project.documents.iter().map(output::json::document_json).collect();
        print_json(&output::json::success(json!(data)));
    } else {
        output::text::print_documents(&project.documents);
    }
    Ok(0)
}

/// Exact ID or unique ID prefix, searched across every project.
fn find_document<'a>(projects: &'a [Project], reference: &str) -> Result<(&'a Project, &'a Document), NgoError> {
    let reference = reference.trim();
    let all = || projects.iter().flat_map(|p| p.documents.iter().map(move |d| (p, d)));
    if reference.is_empty() {
        return Err(NgoError::document_not_found(reference));
    }
    if let Some(found) = all().find(|(_, d)| d.id == reference) {
        return Ok(found);
    }
    let matches: Vec<_> = all().filter(|(_, d)| d.id.starts_with(reference)).collect();
    match matches.as_slice() {
        [] => Err(NgoError::document_not_found(reference)),
        [found] => Ok(*found),
        _ => {
            let candidates: Vec<String> = matches.iter().map(|(_, d)| format!("{} ({})", d.name, d.id)).collect();
            Err(NgoError::ambiguous_ref(reference, &candidates))
        }
    }
}

fn run_delete(id: &str, yes: bool, config: &Config, json_output: bool) -> Result<i32, NgoError> {
    let mut state = open_state(config)?;
    let (project, doc) = find_document(state.get(), id)?;
    let (doc_id, name) = (doc.id.clone(), doc.name.clone());

    if !confirm(&format!("Delete document \"{name}\"?"), yes)? {
        return Err(NgoError::aborted(&format!("document \"{name}\"")));
    }

    let (updated, removed) = document_ops::delete_document(project, &doc_id)?;
    state.replace_project(updated)?;

    if json_output {
        print_json(&output::json::success(json!({
            "id": removed.id,
            "name": removed.name,
            "deleted": true
        })));
    } else {
        println!("Deleted document: {} ({})", removed.name, removed.id);
    }
    Ok(0)
}
