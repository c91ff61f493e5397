//! The git adapter port: the narrow capability set the classifier, the
//! operations, and the suggester are allowed to depend on. Nothing upstream
//! of this module ever shells out to `git` directly.

mod adapter;
mod cli_adapter;
mod error;
mod parse;

pub use adapter::{GitAdapter, LargeBinary, OrphanedSubmodule};
pub use cli_adapter::CliGitAdapter;
pub use error::GitError;
