use serde_json::json;
use tracing::info;

use crate::cli::{confirm::confirm, finish, print_json};
use crate::config::Config;
use crate::db::SqliteStore;
use crate::error::NgoError;
use crate::output;
use crate::state::StateContainer;

pub fn run(reset: bool, yes: bool, config: &Config, json_output: bool) -> i32 {
    finish(run_inner(reset, yes, config, json_output), json_output)
}

fn run_inner(reset: bool, yes: bool, config: &Config, json_output: bool) -> Result<i32, NgoError> {
    let store = SqliteStore::open(config)?;

    // Clear before loading: a corrupt document must not block a reset.
    if reset && store.has_snapshot()? {
        if !confirm("Discard all stored projects and restore the sample data?", yes)? {
            return Err(NgoError::aborted("stored data"));
        }
        store.clear()?;
        info!("stored data cleared");
    }

    let mut state = StateContainer::open(store)?;
    let seeded = state.is_seeded();
    if seeded {
        let projects = state.get().to_vec();
        state.replace(projects)?;
    }
    let path = config.db_path();

    if json_output {
        print_json(&output::json::success(json!({
            "path": path.to_string_lossy(),
            "seeded": seeded,
            "projects": state.get().len()
        })));
    } else {
        println!("Initialized ngoboard at {}", path.display());
        if seeded {
            println!("Stored {} sample projects.", state.get().len());
        } else {
            println!("Existing data kept ({} projects).", state.get().len());
        }
    }
    Ok(0)
}
