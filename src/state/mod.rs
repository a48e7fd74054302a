pub mod container;

pub use container::{SnapshotStore, StateContainer};
