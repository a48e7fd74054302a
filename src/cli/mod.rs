pub mod calendar;
pub mod commands;
pub mod confirm;
pub mod doc;
pub mod init;
pub mod project;
pub mod report;
pub mod task;

pub use commands::*;

use serde_json::Value;

use crate::config::Config;
use crate::db::SqliteStore;
use crate::error::NgoError;
use crate::output;
use crate::state::StateContainer;

pub type State = StateContainer<SqliteStore>;

pub fn open_state(config: &Config) -> Result<State, NgoError> {
    StateContainer::open(SqliteStore::open(config)?)
}

pub fn print_json(value: &Value) {
    println!("{value:#}");
}

/// Map a handler result to an exit code, printing the error on the way.
pub fn finish(result: Result<i32, NgoError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                print_json(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

/// Runtime for the few commands that wait on the AI service.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, NgoError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(NgoError::from)
}
