//! Command-line workflow: mode selection and per-mode sequencing.

pub mod orchestration;

pub use orchestration::{determine_mode, Mode, Workflow, WorkflowArgs, WorkflowResult};
