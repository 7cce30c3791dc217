//! Output formatting for status and check reports

pub mod json;
pub mod terminal;
