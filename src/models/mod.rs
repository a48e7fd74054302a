pub mod date;
pub mod document;
pub mod project;
pub mod task;

pub use document::*;
pub use project::*;
pub use task::*;
