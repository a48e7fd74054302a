pub mod agenda;
pub mod progress;
pub mod report;
pub mod transition;
