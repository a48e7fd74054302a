pub mod ai;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod ops;
pub mod output;
pub mod rules;
pub mod state;
