//! Domain logic - pure business rules independent of git operations

pub mod category;
pub mod version;

pub use category::CommitCategory;
pub use version::{next_version, BumpKind, SemanticVersion, DEFAULT_VERSION};
