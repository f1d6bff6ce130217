//! CLI command implementations

pub mod chord;
pub mod generate;
pub mod json_output;
pub mod validate;
