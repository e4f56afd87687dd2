pub mod boundary;
pub mod changelog;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod ui;
pub mod version;

pub use error::{Result, SmartCommitError};
