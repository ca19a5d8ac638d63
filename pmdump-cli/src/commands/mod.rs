//! Subcommand implementations

pub mod batch;
pub mod decode;
pub mod pack;
pub mod scan;
