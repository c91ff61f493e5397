//! The `GitAdapter` trait: every query and mutation the core is allowed to
//! make against a repository. The classifier, the suggester, and the
//! operations only ever see this trait — never a concrete `Command` call —
//! so a test can substitute a scripted mock for the real git binary.

use super::GitError;

/// A blob whose size exceeds the classifier's configured threshold.
/// Deliberately carries no path: resolving one would require walking the
/// commit graph to find which tree entries point at the blob, which is a
/// separate, user-invoked cost this adapter does not pay during detection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LargeBinary {
    pub sha1: String,
    pub size_mb: u64,
}

/// A submodule whose worktree entry no longer has a matching `.gitmodules`
/// record (or vice versa).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OrphanedSubmodule {
    pub path: String,
    pub reason: String,
}

/// The narrow capability set the core consumes. Any implementation
/// satisfying this contract is acceptable; `CliGitAdapter` is the only one
/// shipped in this crate, wrapping the `git` binary.
///
/// Every method returns `Result<_, GitError>` — never panics — and a missing
/// remote branch is `Ok(String::new())`, not an error (§4.1).
pub trait GitAdapter {
    /// Whether `.` (the adapter's configured root) is a local git
    /// repository, and if so, its top-level working directory.
    fn local_exists(&self) -> Result<(bool, Option<std::path::PathBuf>), GitError>;

    fn is_repository(&self) -> Result<bool, GitError>;

    fn list_remotes(&self) -> Result<Vec<String>, GitError>;

    /// `None` if the remote is not configured at all.
    fn remote_url(&self, remote: &str) -> Result<Option<String>, GitError>;

    /// Best-effort network probe with the adapter's remote-check timeout.
    /// Never affects `list_remotes`/`remote_url` — those reflect
    /// configuration, this reflects liveness.
    fn can_reach_remote(&self, remote: &str) -> Result<bool, GitError>;

    /// `None` in detached HEAD state.
    fn current_branch(&self) -> Result<Option<String>, GitError>;

    /// `(local branch names, remote-tracking branch names)`.
    fn list_branches(&self) -> Result<(Vec<String>, Vec<String>), GitError>;

    /// Prefer the local symbolic-ref cache, fall back to a `main`/`master`
    /// probe, last resort a network query via `ls-remote --symref`.
    fn default_branch(&self, remote: &str) -> Result<String, GitError>;

    fn branch_hash(&self, branch: &str) -> Result<Option<String>, GitError>;

    /// `Ok(String::new())`, never an error, when the remote branch does not
    /// exist (e.g. not yet pushed).
    fn remote_branch_hash(&self, remote: &str, branch: &str) -> Result<String, GitError>;

    /// Commits reachable from `from` but not from `to` (`git rev-list
    /// --count to..from`).
    fn commits_between(&self, from: &str, to: &str) -> Result<u64, GitError>;

    /// `true` iff `ancestor` is an ancestor of (or equal to) `descendant`.
    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool, GitError>;

    fn staged_files(&self) -> Result<Vec<String>, GitError>;
    fn unstaged_files(&self) -> Result<Vec<String>, GitError>;
    fn untracked_files(&self) -> Result<Vec<String>, GitError>;
    fn conflict_files(&self) -> Result<Vec<String>, GitError>;

    fn is_detached_head(&self) -> Result<bool, GitError>;
    fn is_shallow_clone(&self) -> Result<bool, GitError>;
    fn orphaned_submodules(&self) -> Result<Vec<OrphanedSubmodule>, GitError>;

    fn lfs_enabled(&self) -> Result<bool, GitError>;

    /// Blobs whose size is `>= threshold_bytes`.
    fn scan_large_binaries(&self, threshold_bytes: u64) -> Result<Vec<LargeBinary>, GitError>;

    /// Mutating. Called only from `crate::operations`.
    fn fetch(&self, remote: &str) -> Result<(), GitError>;
    /// Mutating. `refspec` is always an explicit branch name, never `"HEAD"`
    /// — enforced at the `Operation::push` constructor, not here.
    fn push(&self, remote: &str, refspec: &str) -> Result<(), GitError>;
    /// Mutating, hard reset. Callers must have already proven fast-forward
    /// via `is_ancestor` — this method does not re-check.
    fn reset_hard(&self, reference: &str) -> Result<(), GitError>;
}
