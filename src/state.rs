//! The document the classifier produces: `RepositoryState`, its four
//! dimension sub-states, warnings, and the `Fix` value the suggester hands
//! back. Everything here is a plain owned value — no interior mutability,
//! nothing borrowed — so it can cross module boundaries by clone or shared
//! reference without a reader worrying it'll change underneath them.

use std::time::Duration;

use serde::Serialize;

use crate::git::{LargeBinary, OrphanedSubmodule};
use crate::operations::Operation;

/// A scenario catalog ID (`"E1"`, `"S_UNAVAILABLE"`, ...). A thin newtype
/// over a static string rather than a fieldless enum: the catalog has 41+
/// members across five families and the classifier, suggester, and test
/// fixtures all want to pass these around as plain strings without a giant
/// match arm at every boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScenarioId(pub &'static str);

impl ScenarioId {
    pub const fn new(id: &'static str) -> Self {
        ScenarioId(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for ScenarioId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Severity/urgency a `Fix` is tagged with. `Critical` sorts first: the
/// suggester's output is sorted ascending by the `#[repr(u8)]` discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical = 1,
    High = 2,
    Medium = 3,
    Low = 4,
    VeryLow = 5,
}

/// A closed set of non-fatal observations surfaced alongside `RepositoryState`.
/// Never promoted to an error; never fails detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    LfsEnabled,
    DetachedHead,
    ShallowClone,
    /// Reserved: the classifier does not currently emit this one (§9 Open
    /// Questions — truncation at `max_branches` is silent by design).
    ManyBranches,
    StaleRemoteData,
    NetworkUnreachable,
}

#[derive(Debug, Clone, Serialize)]
pub struct Warning {
    pub code: WarningCode,
    pub message: String,
    pub hint: Option<String>,
}

impl Warning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Existence of the three locations (local checkout, Core remote, GitHub
/// remote), `E1`..`E8`. `*_exists` reflects *configuration*
/// (`git remote`/filesystem), never liveness.
#[derive(Debug, Clone, Serialize)]
pub struct ExistenceState {
    pub id: ScenarioId,
    pub description: String,
    pub local_exists: bool,
    pub core_exists: bool,
    pub github_exists: bool,
    pub core_url: Option<String>,
    pub github_url: Option<String>,
    pub core_reachable: Option<bool>,
    pub github_reachable: Option<bool>,
    /// The remote *names* the classifier was configured with (e.g. `"origin"`,
    /// `"github"`) — always populated, independent of whether that remote is
    /// actually configured. The suggester reads these instead of hardcoding a
    /// remote name, since `core_remote`/`github_remote` are a construction-time
    /// choice, not a fixed convention.
    pub core_remote: String,
    pub github_remote: String,
}

/// Ahead/behind counts for one pair of refs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PairCounts {
    pub ahead: u64,
    pub behind: u64,
}

impl PairCounts {
    pub fn diverged(&self) -> bool {
        self.ahead > 0 && self.behind > 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncState {
    pub id: ScenarioId,
    pub description: String,
    pub default_branch: Option<String>,
    pub local_hash: Option<String>,
    pub core_hash: Option<String>,
    pub github_hash: Option<String>,
    /// Local vs Core: `ahead` = commits in local not reachable from core.
    pub local_vs_core: PairCounts,
    /// Local vs GitHub: `ahead` = commits in local not reachable from github.
    pub local_vs_github: PairCounts,
    /// Core vs GitHub: `ahead` = commits in core not reachable from github.
    pub core_vs_github: PairCounts,
    pub diverged: bool,
    pub partial_sync: bool,
    pub available_remote: Option<String>,
    pub unavailable_reason: Option<String>,
}

impl SyncState {
    pub fn local_ahead_of_core(&self) -> u64 {
        self.local_vs_core.ahead
    }
    pub fn local_behind_core(&self) -> u64 {
        self.local_vs_core.behind
    }
    pub fn local_ahead_of_github(&self) -> u64 {
        self.local_vs_github.ahead
    }
    pub fn local_behind_github(&self) -> u64 {
        self.local_vs_github.behind
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkingTreeFiles {
    pub staged: Vec<String>,
    pub unstaged: Vec<String>,
    pub untracked: Vec<String>,
    pub conflict: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkingTreeState {
    pub id: ScenarioId,
    pub description: String,
    pub files: WorkingTreeFiles,
    /// True iff staged, unstaged, and conflict are all empty. Untracked-only
    /// does not make the tree dirty.
    pub clean: bool,
    pub detached_head: bool,
    pub shallow: bool,
    pub orphaned_submodules: Vec<OrphanedSubmodule>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorruptionState {
    pub id: ScenarioId,
    pub description: String,
    pub healthy: bool,
    pub large_binaries: Vec<LargeBinary>,
    /// Reserved for C2/C4/C5 (broken refs / missing objects / dangling
    /// commits): no adapter method currently probes for these, so these
    /// lists are always empty today.
    pub broken_refs: Vec<String>,
    pub missing_objects: Vec<String>,
    pub dangling_commits: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchState {
    pub name: String,
    pub id: ScenarioId,
    pub description: String,
    pub local_vs_core: PairCounts,
    pub local_vs_github: PairCounts,
    pub diverged: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepositoryState {
    pub existence: ExistenceState,
    pub sync: SyncState,
    pub working_tree: WorkingTreeState,
    pub corruption: CorruptionState,
    pub branches: Vec<BranchState>,
    pub warnings: Vec<Warning>,
    #[serde(serialize_with = "serialize_duration_as_millis")]
    pub detection_time: Duration,
}

fn serialize_duration_as_millis<S: serde::Serializer>(
    d: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(d.as_millis() as u64)
}

/// A suggested remedy for one dimension's scenario. `command` is always
/// populated (the advisory string shown to a human); `operation` is `Some`
/// only when the suggester judged it safe to describe as an executable step
/// — and `Some` is required whenever `auto_fixable` is true, never the
/// converse.
#[derive(Debug, Clone, Serialize)]
pub struct Fix {
    pub scenario_id: ScenarioId,
    pub description: String,
    pub command: String,
    pub operation: Option<Operation>,
    pub auto_fixable: bool,
    pub priority: Priority,
    pub reason: String,
}
