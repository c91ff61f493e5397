//! Git adapter error types.

use crate::styling::{ERROR, ERROR_EMOJI};

/// Errors an adapter call can return. Never a panic — callers (the classifier,
/// the operations) match on these to decide whether to degrade to a warning,
/// a sentinel ID, or abort.
#[derive(Debug, Clone)]
pub enum GitError {
    /// The git subprocess exited non-zero; the message is its stderr.
    CommandFailed(String),
    /// An adapter-imposed timeout ceiling elapsed before the subprocess returned.
    Timeout { operation: String, seconds: u64 },
    /// The requested capability has no answer in this repository's state
    /// (e.g. asking for a default branch when no remote is configured).
    NotAvailable(String),
    /// The subprocess succeeded but its output didn't parse as expected.
    ParseError(String),
}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::CommandFailed(msg) => write!(f, "{ERROR_EMOJI} {ERROR}{msg}{ERROR:#}"),
            GitError::Timeout { operation, seconds } => write!(
                f,
                "{ERROR_EMOJI} {ERROR}git {operation} timed out after {seconds}s{ERROR:#}"
            ),
            GitError::NotAvailable(msg) => write!(f, "{ERROR_EMOJI} {ERROR}{msg}{ERROR:#}"),
            GitError::ParseError(msg) => {
                write!(f, "{ERROR_EMOJI} {ERROR}failed to parse git output: {msg}{ERROR:#}")
            }
        }
    }
}

impl std::error::Error for GitError {}

// Mirrors the teacher's io::Error conversion, minus the child-exit-code
// protocol (this adapter has its own Timeout variant instead of threading
// signal numbers through io::Error).
impl From<std::io::Error> for GitError {
    fn from(e: std::io::Error) -> Self {
        GitError::CommandFailed(e.to_string())
    }
}
