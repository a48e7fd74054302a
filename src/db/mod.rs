pub mod connection;
pub mod kv_repo;
pub mod migrations;
pub mod seed;
pub mod snapshot;

pub use connection::*;
pub use snapshot::SqliteStore;
