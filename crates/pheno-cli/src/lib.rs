//! CLI library components for the phenome binarizer.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
