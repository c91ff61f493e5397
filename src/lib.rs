//! `dualsync-core`: classifies a git repository's synchronization state
//! across a Core remote and a GitHub remote, and derives a prioritized set
//! of fixes. Driven entirely through [`git::GitAdapter`] — this crate never
//! touches a CLI flag, a config file, or a terminal.

pub mod classifier;
pub mod executor;
pub mod git;
pub mod operations;
pub mod scenarios;
pub mod state;
pub mod styling;
pub mod suggester;

pub use classifier::{Classifier, ClassifierError, DetectionOptions};
pub use executor::{AppliedFix, ExecutionReport, Executor, ExecutorError, FailedFix};
pub use operations::{Operation, OperationError, ValidationFailure};
pub use state::{
    BranchState, CorruptionState, ExistenceState, Fix, PairCounts, Priority, RepositoryState,
    ScenarioId, SyncState, Warning, WarningCode, WorkingTreeFiles, WorkingTreeState,
};
pub use suggester::suggest_fixes;
