//! Typed, executable fix steps. `Operation` is a closed sum over the five
//! shapes a fix can take; a single `impl` dispatches on the variant rather
//! than boxing a trait object, because the variant set is fixed by the
//! scenario catalog and `validate`/`execute` share private helpers across
//! variants (§9: prefer a closed sum over a vtable when the set is known).

use crate::git::GitAdapter;
use crate::state::RepositoryState;

/// Why an `Operation::validate` refused to let `execute` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    NotReachable(String),
    DirtyWorkingTree,
    NotFastForward,
    InvalidRefspec(String),
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationFailure::NotReachable(remote) => {
                write!(f, "remote '{remote}' is not reachable")
            }
            ValidationFailure::DirtyWorkingTree => {
                write!(f, "working tree is not clean")
            }
            ValidationFailure::NotFastForward => {
                write!(f, "target is not a fast-forward from HEAD")
            }
            ValidationFailure::InvalidRefspec(refspec) => {
                write!(f, "refspec '{refspec}' is not a valid explicit branch name")
            }
        }
    }
}

/// Errors an `Operation`'s four methods can return. Hand-written `Display`
/// impls, matching the adapter's own `GitError` — this crate does not pull
/// in a derive-macro error crate for its typed enums.
#[derive(Debug, Clone)]
pub enum OperationError {
    Validation(ValidationFailure),
    Execute(crate::git::GitError),
    RollbackUnsupported { reason: String },
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationError::Validation(failure) => write!(f, "validation failed: {failure}"),
            OperationError::Execute(err) => write!(f, "execution failed: {err}"),
            OperationError::RollbackUnsupported { reason } => {
                write!(f, "rollback not supported: {reason}")
            }
        }
    }
}

impl std::error::Error for OperationError {}

impl From<crate::git::GitError> for OperationError {
    fn from(e: crate::git::GitError) -> Self {
        OperationError::Execute(e)
    }
}

/// A fix, reified as something that can be validated, executed, described,
/// and (best-effort) rolled back. Construct via the associated functions
/// below rather than the variant literals directly where a precondition
/// must hold at construction time (currently only `push`'s refspec guard).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    Fetch {
        remote: String,
    },
    Push {
        remote: String,
        refspec: String,
    },
    Pull {
        remote: String,
        branch: String,
    },
    Reset {
        reference: String,
    },
    Composite {
        operations: Vec<Operation>,
        stop_on_error: bool,
    },
}

impl Operation {
    pub fn fetch(remote: impl Into<String>) -> Self {
        Operation::Fetch {
            remote: remote.into(),
        }
    }

    /// Refuses at construction time, not at `validate` time: a refspec of
    /// `"HEAD"` can silently push whatever happens to be checked out, which
    /// defeats the point of naming an explicit branch.
    pub fn push(remote: impl Into<String>, refspec: impl Into<String>) -> Result<Self, OperationError> {
        let refspec = refspec.into();
        if refspec == "HEAD" || refspec.is_empty() {
            return Err(OperationError::Validation(ValidationFailure::InvalidRefspec(
                refspec,
            )));
        }
        Ok(Operation::Push {
            remote: remote.into(),
            refspec,
        })
    }

    pub fn pull(remote: impl Into<String>, branch: impl Into<String>) -> Self {
        Operation::Pull {
            remote: remote.into(),
            branch: branch.into(),
        }
    }

    pub fn reset(reference: impl Into<String>) -> Self {
        Operation::Reset {
            reference: reference.into(),
        }
    }

    pub fn composite(operations: Vec<Operation>, stop_on_error: bool) -> Self {
        Operation::Composite {
            operations,
            stop_on_error,
        }
    }

    pub fn validate(
        &self,
        state: &RepositoryState,
        adapter: &dyn GitAdapter,
    ) -> Result<(), OperationError> {
        match self {
            Operation::Fetch { remote } => validate_reachable(adapter, remote),
            Operation::Push { remote, refspec } => {
                if refspec == "HEAD" {
                    return Err(OperationError::Validation(ValidationFailure::InvalidRefspec(
                        refspec.clone(),
                    )));
                }
                validate_reachable(adapter, remote)?;
                validate_clean(state)?;
                Ok(())
            }
            Operation::Reset { reference } => {
                validate_clean(state)?;
                validate_fast_forward(adapter, reference)?;
                Ok(())
            }
            Operation::Pull { remote, .. } => {
                validate_reachable(adapter, remote)?;
                validate_clean(state)?;
                // Pull resets to "{remote}/{branch}" after fetching; prove
                // fast-forward against the *current* remote-tracking ref,
                // the best information available before the fetch runs.
                let refname = self.pull_target_ref();
                validate_fast_forward(adapter, &refname)?;
                Ok(())
            }
            Operation::Composite { operations, .. } => {
                for op in operations {
                    op.validate(state, adapter)?;
                }
                Ok(())
            }
        }
    }

    pub fn execute(&self, adapter: &dyn GitAdapter) -> Result<(), OperationError> {
        match self {
            Operation::Fetch { remote } => {
                adapter.fetch(remote)?;
                Ok(())
            }
            Operation::Push { remote, refspec } => {
                adapter.push(remote, refspec)?;
                Ok(())
            }
            Operation::Reset { reference } => {
                adapter.reset_hard(reference)?;
                Ok(())
            }
            Operation::Pull { remote, .. } => {
                adapter.fetch(remote)?;
                adapter.reset_hard(&self.pull_target_ref())?;
                Ok(())
            }
            Operation::Composite {
                operations,
                stop_on_error,
            } => {
                let mut first_err = None;
                for op in operations {
                    if let Err(e) = op.execute(adapter) {
                        if *stop_on_error {
                            return Err(e);
                        }
                        first_err.get_or_insert(e);
                    }
                }
                match first_err {
                    Some(e) => Err(e),
                    None => Ok(()),
                }
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Operation::Fetch { remote } => format!("git fetch {remote}"),
            Operation::Push { remote, refspec } => format!("git push {remote} {refspec}"),
            Operation::Reset { reference } => format!("git reset --hard {reference}"),
            Operation::Pull { remote, branch } => {
                format!("git fetch {remote} && git reset --hard {remote}/{branch}")
            }
            Operation::Composite { operations, .. } => operations
                .iter()
                .map(Operation::describe)
                .collect::<Vec<_>>()
                .join(" && "),
        }
    }

    pub fn rollback(&self, _adapter: &dyn GitAdapter) -> Result<(), OperationError> {
        match self {
            Operation::Fetch { .. } => Ok(()),
            Operation::Push { .. } => Err(OperationError::RollbackUnsupported {
                reason: "a push that failed leaves no visible side effect to undo, and a push \
                         that succeeded cannot be automatically reverted"
                    .to_string(),
            }),
            Operation::Reset { .. } | Operation::Pull { .. } => {
                Err(OperationError::RollbackUnsupported {
                    reason: "run 'git reset --hard ORIG_HEAD' to recover the pre-reset position"
                        .to_string(),
                })
            }
            Operation::Composite { .. } => Err(OperationError::RollbackUnsupported {
                reason: "composite operations do not track which sub-operations completed, so \
                         there is nothing safe to automatically reverse"
                    .to_string(),
            }),
        }
    }

    fn pull_target_ref(&self) -> String {
        match self {
            Operation::Pull { remote, branch } => format!("{remote}/{branch}"),
            _ => unreachable!("pull_target_ref called on a non-Pull operation"),
        }
    }
}

fn validate_reachable(adapter: &dyn GitAdapter, remote: &str) -> Result<(), OperationError> {
    match adapter.can_reach_remote(remote) {
        Ok(true) => Ok(()),
        Ok(false) => Err(OperationError::Validation(ValidationFailure::NotReachable(
            remote.to_string(),
        ))),
        Err(e) => Err(e.into()),
    }
}

fn validate_clean(state: &RepositoryState) -> Result<(), OperationError> {
    if state.working_tree.clean {
        Ok(())
    } else {
        Err(OperationError::Validation(ValidationFailure::DirtyWorkingTree))
    }
}

fn validate_fast_forward(adapter: &dyn GitAdapter, reference: &str) -> Result<(), OperationError> {
    match adapter.is_ancestor(reference, "HEAD") {
        Ok(true) => Ok(()),
        Ok(false) => Err(OperationError::Validation(ValidationFailure::NotFastForward)),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_head_refspec() {
        let err = Operation::push("origin", "HEAD").unwrap_err();
        assert!(matches!(
            err,
            OperationError::Validation(ValidationFailure::InvalidRefspec(_))
        ));
    }

    #[test]
    fn push_rejects_empty_refspec() {
        assert!(Operation::push("origin", "").is_err());
    }

    #[test]
    fn pull_describes_fetch_then_reset() {
        let op = Operation::pull("origin", "main");
        assert_eq!(op.describe(), "git fetch origin && git reset --hard origin/main");
    }

    #[test]
    fn composite_describe_joins_with_and() {
        let op = Operation::composite(
            vec![Operation::fetch("origin"), Operation::push("origin", "main").unwrap()],
            true,
        );
        assert_eq!(op.describe(), "git fetch origin && git push origin main");
    }
}
