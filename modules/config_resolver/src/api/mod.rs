//! API layer - typed accessors and resolution reports

pub mod native;
pub mod report;
