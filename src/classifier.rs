//! Runs the detection passes and fills a `RepositoryState`. This is the
//! largest component in the crate: four independent dimension passes
//! (existence, working tree, corruption, sync) plus optional per-branch
//! topology, composed in the fixed order the specification lays out so that
//! a failure in one dimension degrades to a warning or sentinel rather than
//! aborting the others.

use std::time::{Duration, Instant};

use crate::git::GitAdapter;
use crate::scenarios;
use crate::state::{
    BranchState, CorruptionState, ExistenceState, PairCounts, RepositoryState, ScenarioId,
    SyncState, Warning, WarningCode, WorkingTreeFiles, WorkingTreeState,
};

/// Tuning knobs for one `detect()` call. `Default` matches the
/// specification's stated defaults.
#[derive(Debug, Clone)]
pub struct DetectionOptions {
    pub skip_fetch: bool,
    pub skip_corruption: bool,
    pub skip_branches: bool,
    pub max_branches: usize,
    pub binary_size_threshold_mb: u64,
    pub fetch_timeout: Duration,
    pub remote_check_timeout: Duration,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            skip_fetch: false,
            skip_corruption: false,
            skip_branches: false,
            max_branches: 100,
            binary_size_threshold_mb: 50,
            fetch_timeout: Duration::from_secs(30),
            remote_check_timeout: Duration::from_secs(2),
        }
    }
}

/// The only error `detect()` can return: an adapter failure severe enough
/// that basic classification cannot proceed. Everything less severe
/// degrades to a `Warning` or a sentinel scenario ID instead.
#[derive(Debug, Clone)]
pub struct ClassifierError {
    pub message: String,
    pub source: Option<crate::git::GitError>,
}

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ClassifierError {}

impl ClassifierError {
    fn new(message: impl Into<String>, source: crate::git::GitError) -> Self {
        Self {
            message: message.into(),
            source: Some(source),
        }
    }
}

pub struct Classifier<'a> {
    adapter: &'a dyn GitAdapter,
    core_remote: String,
    github_remote: String,
    options: DetectionOptions,
}

impl<'a> Classifier<'a> {
    pub fn new(
        adapter: &'a dyn GitAdapter,
        core_remote: impl Into<String>,
        github_remote: impl Into<String>,
        options: DetectionOptions,
    ) -> Self {
        Self {
            adapter,
            core_remote: core_remote.into(),
            github_remote: github_remote.into(),
            options,
        }
    }

    pub fn detect(&self) -> Result<RepositoryState, ClassifierError> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        // Step 1: pre-flight fetch. Failures become warnings, never abort.
        if !self.options.skip_fetch {
            self.preflight_fetch(&mut warnings);
        }

        // Step 2: existence.
        let existence = self.classify_existence(&mut warnings)?;

        // Step 3: working tree (only if local exists).
        let working_tree = if existence.local_exists {
            self.classify_working_tree(&mut warnings)?
        } else {
            healthy_working_tree()
        };

        // Step 4: corruption.
        let corruption = if existence.local_exists && !self.options.skip_corruption {
            self.classify_corruption(&working_tree, &mut warnings)?
        } else {
            healthy_corruption()
        };

        // Step 5 + 6: default branch + sync.
        let sync = self.classify_sync(&existence, &mut warnings)?;

        // Step 7: branch topology.
        let branches = if existence.id.as_str() == "E1" && !self.options.skip_branches {
            self.classify_branches(&sync)?
        } else {
            Vec::new()
        };

        Ok(RepositoryState {
            existence,
            sync,
            working_tree,
            corruption,
            branches,
            warnings,
            detection_time: start.elapsed(),
        })
    }

    fn preflight_fetch(&self, warnings: &mut Vec<Warning>) {
        for remote in [&self.core_remote, &self.github_remote] {
            if let Err(e) = self.adapter.fetch(remote) {
                warnings.push(
                    Warning::new(
                        WarningCode::StaleRemoteData,
                        format!("could not fetch '{remote}': {e}"),
                    )
                    .with_hint("detection will use the last known remote state".to_string()),
                );
            }
        }
    }

    fn classify_existence(
        &self,
        warnings: &mut Vec<Warning>,
    ) -> Result<ExistenceState, ClassifierError> {
        let (local_exists, _root) = self
            .adapter
            .local_exists()
            .map_err(|e| ClassifierError::new("failed to probe local repository", e))?;

        let core_url = self
            .adapter
            .remote_url(&self.core_remote)
            .map_err(|e| ClassifierError::new("failed to read Core remote configuration", e))?;
        let github_url = self
            .adapter
            .remote_url(&self.github_remote)
            .map_err(|e| ClassifierError::new("failed to read GitHub remote configuration", e))?;

        let core_exists = core_url.is_some();
        let github_exists = github_url.is_some();

        let core_reachable = core_exists.then(|| {
            self.adapter.can_reach_remote(&self.core_remote).unwrap_or(false)
        });
        let github_reachable = github_exists.then(|| {
            self.adapter.can_reach_remote(&self.github_remote).unwrap_or(false)
        });

        if core_reachable == Some(false) {
            warnings.push(Warning::new(
                WarningCode::NetworkUnreachable,
                format!("Core remote '{}' is configured but not reachable", self.core_remote),
            ));
        }
        if github_reachable == Some(false) {
            warnings.push(Warning::new(
                WarningCode::NetworkUnreachable,
                format!("GitHub remote '{}' is configured but not reachable", self.github_remote),
            ));
        }

        let (id, description) = existence_id(local_exists, core_exists, github_exists);

        Ok(ExistenceState {
            id,
            description: description.to_string(),
            local_exists,
            core_exists,
            github_exists,
            core_url,
            github_url,
            core_reachable,
            github_reachable,
            core_remote: self.core_remote.clone(),
            github_remote: self.github_remote.clone(),
        })
    }

    fn classify_working_tree(
        &self,
        warnings: &mut Vec<Warning>,
    ) -> Result<WorkingTreeState, ClassifierError> {
        let staged = self
            .adapter
            .staged_files()
            .map_err(|e| ClassifierError::new("failed to list staged files", e))?;
        let unstaged = self
            .adapter
            .unstaged_files()
            .map_err(|e| ClassifierError::new("failed to list unstaged files", e))?;
        let untracked = self
            .adapter
            .untracked_files()
            .map_err(|e| ClassifierError::new("failed to list untracked files", e))?;
        let conflict = self
            .adapter
            .conflict_files()
            .map_err(|e| ClassifierError::new("failed to list conflicted files", e))?;

        let detached_head = self.adapter.is_detached_head().unwrap_or(false);
        let shallow = self.adapter.is_shallow_clone().unwrap_or(false);
        let orphaned_submodules = self.adapter.orphaned_submodules().unwrap_or_default();

        if detached_head {
            warnings.push(Warning::new(
                WarningCode::DetachedHead,
                "HEAD does not point at a branch",
            ));
        }
        if shallow {
            warnings.push(Warning::new(
                WarningCode::ShallowClone,
                "repository is a shallow clone",
            ));
        }

        let clean = staged.is_empty() && unstaged.is_empty() && conflict.is_empty();

        let (id, description) = if !conflict.is_empty() {
            (ScenarioId::new("W4"), "conflicts")
        } else if !staged.is_empty() {
            (ScenarioId::new("W2"), "staged changes")
        } else if !unstaged.is_empty() {
            (ScenarioId::new("W3"), "unstaged changes")
        } else if !untracked.is_empty() {
            (ScenarioId::new("W5"), "untracked only")
        } else {
            (ScenarioId::new("W1"), "clean")
        };

        Ok(WorkingTreeState {
            id,
            description: description.to_string(),
            files: WorkingTreeFiles {
                staged,
                unstaged,
                untracked,
                conflict,
            },
            clean,
            detached_head,
            shallow,
            orphaned_submodules,
        })
    }

    fn classify_corruption(
        &self,
        working_tree: &WorkingTreeState,
        warnings: &mut Vec<Warning>,
    ) -> Result<CorruptionState, ClassifierError> {
        let threshold_bytes = self.options.binary_size_threshold_mb * 1024 * 1024;
        let large_binaries = self
            .adapter
            .scan_large_binaries(threshold_bytes)
            .map_err(|e| ClassifierError::new("failed to scan for large binaries", e))?;
        let lfs_enabled = self.adapter.lfs_enabled().unwrap_or(false);

        if lfs_enabled {
            warnings.push(Warning::new(WarningCode::LfsEnabled, "Git LFS is configured"));
        }

        // Only C1 (nothing found) and C6 (LFS is a deliberate choice, not a
        // defect) are healthy; every other corruption ID names something a
        // human should look at, even if it isn't "corruption" in the literal
        // ref-integrity sense (§4.3 step 4).
        let (id, description, healthy) = if !large_binaries.is_empty() {
            (ScenarioId::new("C3"), "large binaries", false)
        } else if lfs_enabled {
            (ScenarioId::new("C6"), "LFS in use", true)
        } else if working_tree.detached_head {
            (ScenarioId::new("C7"), "detached HEAD", false)
        } else if working_tree.shallow {
            (ScenarioId::new("C8"), "shallow clone", false)
        } else {
            (ScenarioId::new("C1"), "healthy", true)
        };

        Ok(CorruptionState {
            id,
            description: description.to_string(),
            healthy,
            large_binaries,
            broken_refs: Vec::new(),
            missing_objects: Vec::new(),
            dangling_commits: Vec::new(),
        })
    }

    fn resolve_default_branch(&self, existence_id: &str) -> Option<String> {
        match existence_id {
            "E1" | "E2" | "E6" => self.adapter.default_branch(&self.core_remote).ok(),
            "E3" | "E7" => self.adapter.default_branch(&self.github_remote).ok(),
            _ => None,
        }
        .or_else(|| {
            self.adapter
                .default_branch(&self.core_remote)
                .or_else(|_| self.adapter.default_branch(&self.github_remote))
                .ok()
        })
        .or_else(|| Some("main".to_string()))
    }

    fn classify_sync(
        &self,
        existence: &ExistenceState,
        warnings: &mut Vec<Warning>,
    ) -> Result<SyncState, ClassifierError> {
        if existence.id.as_str() != "E1" && !matches!(existence.id.as_str(), "E2" | "E3") {
            return Ok(na_sync_state(None));
        }

        let default_branch = self.resolve_default_branch(existence.id.as_str());
        let Some(branch) = default_branch.clone() else {
            return Ok(na_sync_state(None));
        };

        let local_hash = self.adapter.branch_hash(&branch).unwrap_or(None);
        if local_hash.is_none() {
            let mut state = na_sync_state(Some(branch));
            state.id = ScenarioId::new("S_NA_DETACHED");
            state.description = "detached HEAD".to_string();
            return Ok(state);
        }
        let local_hash = local_hash.unwrap();

        match existence.id.as_str() {
            "E1" => self.classify_three_way(branch, local_hash, warnings),
            "E2" => self.classify_two_way(branch, local_hash, &self.core_remote, true, warnings),
            "E3" => self.classify_two_way(branch, local_hash, &self.github_remote, false, warnings),
            _ => Ok(na_sync_state(Some(branch))),
        }
    }

    fn classify_three_way(
        &self,
        branch: String,
        local_hash: String,
        warnings: &mut Vec<Warning>,
    ) -> Result<SyncState, ClassifierError> {
        let core_hash = self.remote_hash(&self.core_remote, &branch, warnings);
        let github_hash = self.remote_hash(&self.github_remote, &branch, warnings);

        if core_hash.is_none() && github_hash.is_none() {
            let mut state = na_sync_state(Some(branch));
            state.id = ScenarioId::new("S_UNAVAILABLE");
            state.description = "neither remote is reachable".to_string();
            state.unavailable_reason = Some("no remote-tracking hash could be resolved".to_string());
            return Ok(state);
        }

        let core_hash = core_hash.unwrap_or_else(|| local_hash.clone());
        let github_hash = github_hash.unwrap_or_else(|| local_hash.clone());

        if local_hash == core_hash && local_hash == github_hash {
            return Ok(SyncState {
                id: ScenarioId::new("S1"),
                description: "perfect sync".to_string(),
                default_branch: Some(branch),
                local_hash: Some(local_hash),
                core_hash: Some(core_hash),
                github_hash: Some(github_hash),
                local_vs_core: PairCounts::default(),
                local_vs_github: PairCounts::default(),
                core_vs_github: PairCounts::default(),
                diverged: false,
                partial_sync: false,
                available_remote: None,
                unavailable_reason: None,
            });
        }

        let local_vs_core = self.count_pair(&local_hash, &core_hash)?;
        let local_vs_github = self.count_pair(&local_hash, &github_hash)?;
        let core_vs_github = self.count_pair(&core_hash, &github_hash)?;

        let (id, diverged) = classify_three_way_id(local_vs_core, local_vs_github, core_vs_github);

        Ok(SyncState {
            id: ScenarioId::new(id),
            description: scenarios::lookup(id).map(|i| i.description.to_string()).unwrap_or_default(),
            default_branch: Some(branch),
            local_hash: Some(local_hash),
            core_hash: Some(core_hash),
            github_hash: Some(github_hash),
            local_vs_core,
            local_vs_github,
            core_vs_github,
            diverged,
            partial_sync: false,
            available_remote: None,
            unavailable_reason: None,
        })
    }

    fn classify_two_way(
        &self,
        branch: String,
        local_hash: String,
        remote: &str,
        remote_is_core: bool,
        warnings: &mut Vec<Warning>,
    ) -> Result<SyncState, ClassifierError> {
        let remote_hash = self.remote_hash(remote, &branch, warnings);
        let Some(remote_hash) = remote_hash else {
            let mut state = na_sync_state(Some(branch));
            state.id = ScenarioId::new("S_UNAVAILABLE");
            state.description = "the configured remote is not reachable".to_string();
            state.unavailable_reason = Some(format!("'{remote}' could not be resolved"));
            state.partial_sync = true;
            state.available_remote = Some(remote.to_string());
            return Ok(state);
        };

        let counts = if local_hash == remote_hash {
            PairCounts::default()
        } else {
            self.count_pair(&local_hash, &remote_hash)?
        };

        let id = two_way_id(counts, remote_is_core);
        let description = format!(
            "{} ({} N/A)",
            scenarios::lookup(id).map(|i| i.description).unwrap_or_default(),
            if remote_is_core { "GitHub" } else { "Core" }
        );

        let (local_vs_core, local_vs_github) = if remote_is_core {
            (counts, PairCounts::default())
        } else {
            (PairCounts::default(), counts)
        };

        Ok(SyncState {
            id: ScenarioId::new(id),
            description,
            default_branch: Some(branch),
            local_hash: Some(local_hash.clone()),
            core_hash: remote_is_core.then(|| remote_hash.clone()),
            github_hash: (!remote_is_core).then_some(remote_hash),
            local_vs_core,
            local_vs_github,
            core_vs_github: PairCounts::default(),
            diverged: counts.diverged(),
            partial_sync: true,
            available_remote: Some(remote.to_string()),
            unavailable_reason: None,
        })
    }

    fn remote_hash(&self, remote: &str, branch: &str, warnings: &mut Vec<Warning>) -> Option<String> {
        match self.adapter.remote_branch_hash(remote, branch) {
            Ok(hash) if !hash.is_empty() => Some(hash),
            Ok(_) => None,
            Err(e) => {
                warnings.push(Warning::new(
                    WarningCode::NetworkUnreachable,
                    format!("could not resolve '{remote}/{branch}': {e}"),
                ));
                None
            }
        }
    }

    fn count_pair(&self, a: &str, b: &str) -> Result<PairCounts, ClassifierError> {
        let ahead = self
            .adapter
            .commits_between(a, b)
            .map_err(|e| ClassifierError::new("failed to count commits between refs", e))?;
        let behind = self
            .adapter
            .commits_between(b, a)
            .map_err(|e| ClassifierError::new("failed to count commits between refs", e))?;
        Ok(PairCounts { ahead, behind })
    }

    fn classify_branches(&self, default_sync: &SyncState) -> Result<Vec<BranchState>, ClassifierError> {
        if self.options.max_branches == 0 {
            return Ok(Vec::new());
        }
        let (local_branches, _remote_branches) = self
            .adapter
            .list_branches()
            .map_err(|e| ClassifierError::new("failed to list branches", e))?;

        let mut out = Vec::new();
        for name in local_branches.into_iter().take(self.options.max_branches) {
            let Some(local_hash) = self.adapter.branch_hash(&name).unwrap_or(None) else {
                continue;
            };
            let core_hash = self.adapter.remote_branch_hash(&self.core_remote, &name).unwrap_or_default();
            let github_hash = self.adapter.remote_branch_hash(&self.github_remote, &name).unwrap_or_default();

            let local_vs_core = if core_hash.is_empty() || core_hash == local_hash {
                PairCounts::default()
            } else {
                self.count_pair(&local_hash, &core_hash)?
            };
            let local_vs_github = if github_hash.is_empty() || github_hash == local_hash {
                PairCounts::default()
            } else {
                self.count_pair(&local_hash, &github_hash)?
            };

            let diverged = local_vs_core.diverged() || local_vs_github.diverged();
            let (id, description) = branch_scenario(local_vs_core, local_vs_github, diverged);

            out.push(BranchState {
                name,
                id: ScenarioId::new(id),
                description: description.to_string(),
                local_vs_core,
                local_vs_github,
                diverged,
            });
        }
        let _ = default_sync; // branch topology is independent of the default branch's own sync ID.
        Ok(out)
    }
}

fn healthy_working_tree() -> WorkingTreeState {
    WorkingTreeState {
        id: ScenarioId::new("W1"),
        description: "clean".to_string(),
        files: WorkingTreeFiles::default(),
        clean: true,
        detached_head: false,
        shallow: false,
        orphaned_submodules: Vec::new(),
    }
}

fn healthy_corruption() -> CorruptionState {
    CorruptionState {
        id: ScenarioId::new("C1"),
        description: "healthy".to_string(),
        healthy: true,
        large_binaries: Vec::new(),
        broken_refs: Vec::new(),
        missing_objects: Vec::new(),
        dangling_commits: Vec::new(),
    }
}

fn na_sync_state(default_branch: Option<String>) -> SyncState {
    SyncState {
        id: ScenarioId::new("S1"),
        description: "N/A".to_string(),
        default_branch,
        local_hash: None,
        core_hash: None,
        github_hash: None,
        local_vs_core: PairCounts::default(),
        local_vs_github: PairCounts::default(),
        core_vs_github: PairCounts::default(),
        diverged: false,
        partial_sync: false,
        available_remote: None,
        unavailable_reason: None,
    }
}

/// The fixed `{local, core, github}` presence truth table, §8.1. E1 is "all
/// present"; E8 is "none"; the remaining six enumerate every other
/// combination of the three booleans.
fn existence_id(local: bool, core: bool, github: bool) -> (ScenarioId, &'static str) {
    let id = match (local, core, github) {
        (true, true, true) => "E1",
        (true, true, false) => "E2",
        (true, false, true) => "E3",
        (true, false, false) => "E4",
        (false, true, true) => "E5",
        (false, true, false) => "E6",
        (false, false, true) => "E7",
        (false, false, false) => "E8",
    };
    (
        ScenarioId::new(id),
        scenarios::lookup(id).map(|i| i.description).unwrap_or("unknown"),
    )
}

/// Three-way classification per §4.3.1's table, extended to be total: the
/// original table's conditions assume several other counts are
/// simultaneously zero, which is under-specified once a pair is genuinely
/// diverged. This implementation resolves divergence first (any pair with
/// both ahead>0 and behind>0), then the clean single-direction cases, then
/// the one-remote-ahead cases — see DESIGN.md for the worked derivation
/// against the specification's end-to-end examples.
fn classify_three_way_id(
    local_vs_core: PairCounts,
    local_vs_github: PairCounts,
    core_vs_github: PairCounts,
) -> (&'static str, bool) {
    let (lc, cl) = (local_vs_core.ahead, local_vs_core.behind);
    let (lg, gl) = (local_vs_github.ahead, local_vs_github.behind);
    let (cg, gc) = (core_vs_github.ahead, core_vs_github.behind);

    if lc == 0 && cl == 0 && lg == 0 && gl == 0 && cg == 0 && gc == 0 {
        return ("S1", false);
    }

    let local_core_diverged = lc > 0 && cl > 0;
    let local_github_diverged = lg > 0 && gl > 0;
    let remotes_diverged = cg > 0 && gc > 0;

    if remotes_diverged {
        return ("S13", true);
    }
    if local_core_diverged || local_github_diverged {
        return if lc >= cl && lg >= gl {
            ("S11", true)
        } else if lc <= cl && lg <= gl {
            ("S12", true)
        } else {
            ("S10", true)
        };
    }

    // Core strictly ahead of both local and GitHub (which agree with each other).
    if cl > 0 && cg > 0 && lc == 0 && lg == 0 && gl == 0 {
        return ("S9", false);
    }
    // GitHub strictly ahead of both local and Core (which agree with each other).
    if gl > 0 && gc > 0 && lc == 0 && lg == 0 && cl == 0 {
        return ("S8", false);
    }

    if lc > 0 && lg > 0 {
        return ("S2", false);
    }
    if lc > 0 {
        return ("S5", false);
    }
    if lg > 0 {
        return ("S4", false);
    }
    if cl > 0 && gl > 0 {
        return ("S3", false);
    }
    if cl > 0 {
        return ("S7", false);
    }
    if gl > 0 {
        return ("S6", false);
    }
    if cg > 0 {
        return ("S9", false);
    }
    if gc > 0 {
        return ("S8", false);
    }
    ("S1", false)
}

/// Two-way (partial) classification, per the resolved Open Question in
/// SPEC_FULL §4.3.2 / §9: an ahead-only or behind-only partial state reuses
/// the "ahead/behind of both" IDs (S2/S3), since with a single remote
/// configured there is no "other remote" to distinguish against; a
/// genuinely diverged partial pair reuses S4/S5 to name which remote the
/// divergence is against.
fn two_way_id(counts: PairCounts, remote_is_core: bool) -> &'static str {
    match (counts.ahead > 0, counts.behind > 0) {
        (false, false) => "S1",
        (true, false) => "S2",
        (false, true) => "S3",
        (true, true) => {
            if remote_is_core {
                "S5"
            } else {
                "S4"
            }
        }
    }
}

fn branch_scenario(
    local_vs_core: PairCounts,
    local_vs_github: PairCounts,
    diverged: bool,
) -> (&'static str, &'static str) {
    if diverged {
        return ("B4", "branch diverged");
    }
    let (lc, cl) = (local_vs_core.ahead, local_vs_core.behind);
    let (lg, gl) = (local_vs_github.ahead, local_vs_github.behind);

    if lc == 0 && cl == 0 && lg == 0 && gl == 0 {
        ("B1", "branch in sync")
    } else if lc > 0 && lg > 0 {
        ("B2", "branch ahead of both")
    } else if cl > 0 && gl > 0 {
        ("B3", "branch behind both")
    } else if lc > 0 || lg > 0 || cl > 0 || gl > 0 {
        ("B5", "branch ahead of one")
    } else {
        ("B1", "branch in sync")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(ahead: u64, behind: u64) -> PairCounts {
        PairCounts { ahead, behind }
    }

    #[test]
    fn three_way_perfect_sync() {
        let (id, diverged) = classify_three_way_id(counts(0, 0), counts(0, 0), counts(0, 0));
        assert_eq!(id, "S1");
        assert!(!diverged);
    }

    #[test]
    fn three_way_local_ahead_of_both() {
        let (id, diverged) = classify_three_way_id(counts(2, 0), counts(2, 0), counts(0, 0));
        assert_eq!(id, "S2");
        assert!(!diverged);
    }

    #[test]
    fn three_way_ahead_of_github_only() {
        let (id, _) = classify_three_way_id(counts(0, 0), counts(1, 0), counts(1, 0));
        assert_eq!(id, "S4");
    }

    #[test]
    fn three_way_ahead_of_core_only() {
        let (id, _) = classify_three_way_id(counts(1, 0), counts(0, 0), counts(0, 1));
        assert_eq!(id, "S5");
    }

    #[test]
    fn three_way_behind_both() {
        let (id, _) = classify_three_way_id(counts(0, 2), counts(0, 2), counts(0, 0));
        assert_eq!(id, "S3");
    }

    #[test]
    fn three_way_diverged_local_ahead_leaning() {
        let (id, diverged) = classify_three_way_id(counts(2, 1), counts(2, 1), counts(0, 0));
        assert_eq!(id, "S11");
        assert!(diverged);
    }

    #[test]
    fn three_way_diverged_local_behind_leaning() {
        let (id, diverged) = classify_three_way_id(counts(1, 2), counts(1, 2), counts(0, 0));
        assert_eq!(id, "S12");
        assert!(diverged);
    }

    #[test]
    fn three_way_remotes_disagree_is_three_way_divergence() {
        let (id, diverged) = classify_three_way_id(counts(0, 0), counts(0, 0), counts(1, 1));
        assert_eq!(id, "S13");
        assert!(diverged);
    }

    #[test]
    fn three_way_core_ahead_of_rest() {
        let (id, _) = classify_three_way_id(counts(0, 1), counts(0, 0), counts(1, 0));
        assert_eq!(id, "S9");
    }

    #[test]
    fn three_way_github_ahead_of_rest() {
        let (id, _) = classify_three_way_id(counts(0, 0), counts(0, 1), counts(0, 1));
        assert_eq!(id, "S8");
    }

    #[test]
    fn two_way_ahead_only_is_s2() {
        assert_eq!(two_way_id(counts(1, 0), true), "S2");
        assert_eq!(two_way_id(counts(1, 0), false), "S2");
    }

    #[test]
    fn two_way_behind_only_is_s3() {
        assert_eq!(two_way_id(counts(0, 1), true), "S3");
    }

    #[test]
    fn two_way_diverged_reuses_s4_s5() {
        assert_eq!(two_way_id(counts(1, 1), true), "S5");
        assert_eq!(two_way_id(counts(1, 1), false), "S4");
    }

    #[test]
    fn existence_truth_table_all_present() {
        assert_eq!(existence_id(true, true, true).0, ScenarioId::new("E1"));
        assert_eq!(existence_id(false, false, false).0, ScenarioId::new("E8"));
        assert_eq!(existence_id(true, true, false).0, ScenarioId::new("E2"));
        assert_eq!(existence_id(true, false, true).0, ScenarioId::new("E3"));
    }
}
