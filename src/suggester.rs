//! Turns a `RepositoryState` into an ordered list of `Fix`es. Pure: no
//! `GitAdapter`, no I/O, nothing but pattern matching over the scenario IDs
//! the classifier already assigned. Dispatch rules per dimension, then a
//! stable sort by `Priority` (existence, sync, working tree, corruption,
//! branches, in that order within equal priority, matching the order the
//! dimensions are listed throughout the specification).

use crate::git::OrphanedSubmodule;
use crate::operations::Operation;
use crate::state::{Fix, Priority, RepositoryState, ScenarioId};

pub fn suggest_fixes(state: &RepositoryState) -> Vec<Fix> {
    let mut fixes = Vec::new();

    existence_fixes(state, &mut fixes);
    sync_fixes(state, &mut fixes);
    working_tree_fixes(state, &mut fixes);
    corruption_fixes(state, &mut fixes);
    branch_fixes(state, &mut fixes);

    fixes.sort_by_key(|f| f.priority);
    fixes
}

fn advisory(id: &'static str, priority: Priority, reason: impl Into<String>, command: impl Into<String>) -> Fix {
    let command = command.into();
    Fix {
        scenario_id: ScenarioId::new(id),
        description: scenarios_description(id),
        command: command.clone(),
        operation: None,
        auto_fixable: false,
        priority,
        reason: reason.into(),
    }
}

/// An advisory fix (`auto_fixable = false`) that still carries an `Operation`
/// for inspection — the shape SPEC_FULL §4.5 asks for on S8/S9: a Composite
/// the suggester refuses to auto-run but a caller can describe or validate.
fn compound_advisory(
    id: &'static str,
    priority: Priority,
    reason: impl Into<String>,
    command: impl Into<String>,
    operation: Operation,
) -> Fix {
    Fix {
        scenario_id: ScenarioId::new(id),
        description: scenarios_description(id),
        command: command.into(),
        operation: Some(operation),
        auto_fixable: false,
        priority,
        reason: reason.into(),
    }
}

fn scenarios_description(id: &str) -> String {
    crate::scenarios::lookup(id)
        .map(|i| i.description.to_string())
        .unwrap_or_default()
}

fn existence_fixes(state: &RepositoryState, out: &mut Vec<Fix>) {
    let e = &state.existence;
    match e.id.as_str() {
        "E1" | "E8" => {}
        "E2" => out.push(advisory(
            "E2",
            Priority::High,
            "GitHub remote is not configured",
            "git remote add github <url>",
        )),
        "E3" => out.push(advisory(
            "E3",
            Priority::Critical,
            "Core remote is not configured; pushes will never reach Core",
            "git remote add origin <core-url>",
        )),
        "E4" => out.push(advisory(
            "E4",
            Priority::Critical,
            "neither remote is configured",
            "git remote add origin <core-url> && git remote add github <url>",
        )),
        "E5" => out.push(advisory(
            "E5",
            Priority::Medium,
            "both remotes exist but there is no local checkout",
            "git clone <core-url>",
        )),
        "E6" => out.push(advisory(
            "E6",
            Priority::High,
            "only the Core remote exists",
            "git remote add github <url>",
        )),
        "E7" => out.push(advisory(
            "E7",
            Priority::Critical,
            "only the GitHub remote exists; Core has no copy",
            "git remote add origin <core-url>",
        )),
        other => out.push(advisory(
            other,
            Priority::Medium,
            "unrecognized existence scenario",
            "inspect remotes manually",
        )),
    }
}

fn sync_fixes(state: &RepositoryState, out: &mut Vec<Fix>) {
    let s = &state.sync;
    let branch = s.default_branch.clone().unwrap_or_else(|| "<branch>".to_string());
    let core = state.existence.core_remote.as_str();
    let github = state.existence.github_remote.as_str();

    if s.partial_sync {
        return partial_sync_fixes(state, core, &branch, out);
    }

    let push_both = || {
        Operation::composite(
            vec![
                Operation::push(core, &branch).expect("default branch name is never HEAD or empty"),
                Operation::push(github, &branch).expect("default branch name is never HEAD or empty"),
            ],
            false,
        )
    };

    match s.id.as_str() {
        "S1" => {}
        "S2" => out.push(auto_fix(
            "S2",
            Priority::Low,
            format!("local is ahead of both remotes by {} commits", s.local_vs_core.ahead),
            format!("git push {core} {branch} && git push {github} {branch}"),
            push_both(),
        )),
        "S3" => out.push(auto_fix(
            "S3",
            Priority::Medium,
            "local is behind both remotes",
            format!("git pull {core} {branch}"),
            Operation::pull(core, &branch),
        )),
        "S4" => out.push(auto_fix(
            "S4",
            Priority::High,
            "local and Core are ahead of GitHub",
            format!("git push {github} {branch}"),
            Operation::push(github, &branch).expect("default branch name is never HEAD or empty"),
        )),
        "S5" => out.push(auto_fix(
            "S5",
            Priority::Critical,
            "local and GitHub are ahead of Core",
            format!("git push {core} {branch}"),
            Operation::push(core, &branch).expect("default branch name is never HEAD or empty"),
        )),
        "S6" => out.push(auto_fix(
            "S6",
            Priority::Medium,
            "local is behind GitHub but matches Core",
            format!("git pull {github} {branch}"),
            Operation::pull(github, &branch),
        )),
        "S7" => out.push(auto_fix(
            "S7",
            Priority::Medium,
            "local is behind Core but matches GitHub",
            format!("git pull {core} {branch}"),
            Operation::pull(core, &branch),
        )),
        "S8" => {
            let op = Operation::composite(
                vec![
                    Operation::pull(github, &branch),
                    Operation::push(core, &branch).expect("default branch name is never HEAD or empty"),
                ],
                false,
            );
            out.push(compound_advisory(
                "S8",
                Priority::High,
                "GitHub has commits neither local nor Core has",
                op.describe(),
                op,
            ));
        }
        "S9" => {
            let op = Operation::composite(
                vec![
                    Operation::pull(core, &branch),
                    Operation::push(github, &branch).expect("default branch name is never HEAD or empty"),
                ],
                false,
            );
            out.push(compound_advisory(
                "S9",
                Priority::High,
                "Core has commits neither local nor GitHub has",
                op.describe(),
                op,
            ));
        }
        "S10" | "S11" | "S12" | "S13" => out.push(advisory(
            s.id.as_str(),
            Priority::Critical,
            "local and the remotes have diverged; an automatic fix would lose history",
            "fetch both remotes, inspect the divergence, then merge or rebase by hand",
        )),
        "S_UNAVAILABLE" => out.push(advisory(
            "S_UNAVAILABLE",
            Priority::Critical,
            s.unavailable_reason.clone().unwrap_or_else(|| "remote unreachable".to_string()),
            "check connectivity and credentials, then retry",
        )),
        "S_NA_DETACHED" => out.push(advisory(
            "S_NA_DETACHED",
            Priority::High,
            "HEAD is detached; sync status is undefined",
            format!("git checkout {branch}"),
        )),
        other => out.push(advisory(other, Priority::Medium, "unrecognized sync scenario", "inspect manually")),
    }
}

/// Sync fixes when only one remote is configured (E2/E3). The classifier's
/// two-way path reuses `S2`/`S3` for ahead-only/behind-only and `S4`/`S5` to
/// mean "diverged against the single available remote" (SPEC_FULL §4.3.2);
/// every operation here targets `state.sync.available_remote`, never the
/// other (unconfigured) remote.
fn partial_sync_fixes(state: &RepositoryState, core: &str, branch: &str, out: &mut Vec<Fix>) {
    let s = &state.sync;
    let remote = s.available_remote.as_deref().unwrap_or(core);
    let (ahead, behind) = if s.available_remote.as_deref() == Some(core) {
        (s.local_vs_core.ahead, s.local_vs_core.behind)
    } else {
        (s.local_vs_github.ahead, s.local_vs_github.behind)
    };

    match s.id.as_str() {
        "S1" => {}
        "S2" => out.push(auto_fix(
            "S2",
            Priority::Low,
            format!("local is ahead of '{remote}' by {ahead} commits"),
            format!("git push {remote} {branch}"),
            Operation::push(remote, branch).expect("default branch name is never HEAD or empty"),
        )),
        "S3" => out.push(auto_fix(
            "S3",
            Priority::Medium,
            format!("local is behind '{remote}' by {behind} commits"),
            format!("git pull {remote} {branch}"),
            Operation::pull(remote, branch),
        )),
        "S4" | "S5" => out.push(advisory(
            s.id.as_str(),
            Priority::Critical,
            format!("local and '{remote}' have diverged; an automatic fix would lose history"),
            format!("fetch {remote}, inspect the divergence, then merge or rebase by hand"),
        )),
        "S_UNAVAILABLE" => out.push(advisory(
            "S_UNAVAILABLE",
            Priority::Critical,
            s.unavailable_reason.clone().unwrap_or_else(|| "remote unreachable".to_string()),
            "check connectivity and credentials, then retry",
        )),
        "S_NA_DETACHED" => out.push(advisory(
            "S_NA_DETACHED",
            Priority::High,
            "HEAD is detached; sync status is undefined",
            format!("git checkout {branch}"),
        )),
        other => out.push(advisory(other, Priority::Medium, "unrecognized sync scenario", "inspect manually")),
    }
}

fn auto_fix(
    id: &'static str,
    priority: Priority,
    reason: impl Into<String>,
    command: impl Into<String>,
    operation: Operation,
) -> Fix {
    Fix {
        scenario_id: ScenarioId::new(id),
        description: scenarios_description(id),
        command: command.into(),
        operation: Some(operation),
        auto_fixable: true,
        priority,
        reason: reason.into(),
    }
}

fn working_tree_fixes(state: &RepositoryState, out: &mut Vec<Fix>) {
    let w = &state.working_tree;
    match w.id.as_str() {
        "W1" => {}
        "W2" => out.push(advisory("W2", Priority::Medium, "changes are staged but not committed", "git commit")),
        "W3" => out.push(advisory(
            "W3",
            Priority::Medium,
            "tracked files have unstaged modifications",
            "git add <files> && git commit",
        )),
        "W4" => out.push(advisory(
            "W4",
            Priority::Critical,
            "unresolved merge conflicts block any fast-forward fix",
            "resolve conflicts, then git add <files> and continue the operation",
        )),
        "W5" => out.push(advisory(
            "W5",
            Priority::Low,
            "untracked files are present",
            "git add <files>, or add them to .gitignore",
        )),
        other => out.push(advisory(other, Priority::Medium, "unrecognized working tree scenario", "inspect manually")),
    }

    for submodule in &w.orphaned_submodules {
        out.push(submodule_fix(submodule));
    }
}

fn submodule_fix(submodule: &OrphanedSubmodule) -> Fix {
    Fix {
        scenario_id: ScenarioId::new("W1"),
        description: format!("orphaned submodule at {}", submodule.path),
        command: format!("git submodule deinit -f {}", submodule.path),
        operation: None,
        auto_fixable: false,
        priority: Priority::Low,
        reason: submodule.reason.clone(),
    }
}

fn corruption_fixes(state: &RepositoryState, out: &mut Vec<Fix>) {
    let c = &state.corruption;
    if !c.large_binaries.is_empty() {
        out.push(advisory(
            "C3",
            Priority::Medium,
            format!("{} blob(s) exceed the configured size threshold", c.large_binaries.len()),
            "migrate large blobs to Git LFS, or remove them from history",
        ));
    }
}

fn branch_fixes(state: &RepositoryState, out: &mut Vec<Fix>) {
    let core = state.existence.core_remote.as_str();
    let github = state.existence.github_remote.as_str();
    for branch in &state.branches {
        match branch.id.as_str() {
            "B1" | "B6" | "B7" => {}
            "B2" => out.push(auto_fix(
                "B2",
                Priority::Low,
                format!("'{}' is ahead of both remotes", branch.name),
                format!("git push {core} {} && git push {github} {}", branch.name, branch.name),
                Operation::composite(
                    vec![
                        Operation::push(core, &branch.name).expect("branch name is never HEAD or empty"),
                        Operation::push(github, &branch.name).expect("branch name is never HEAD or empty"),
                    ],
                    false,
                ),
            )),
            "B3" => out.push(auto_fix(
                "B3",
                Priority::Medium,
                format!("'{}' is behind both remotes", branch.name),
                format!("git pull {core} {}", branch.name),
                Operation::pull(core, &branch.name),
            )),
            "B4" => out.push(advisory(
                "B4",
                Priority::High,
                format!("'{}' has diverged from one or both remotes", branch.name),
                "manually reconcile before pushing",
            )),
            "B5" => {
                let (remote, ahead) = if branch.local_vs_core.ahead > 0 || branch.local_vs_core.behind > 0 {
                    (core, branch.local_vs_core.ahead > 0)
                } else {
                    (github, branch.local_vs_github.ahead > 0)
                };
                let op = if ahead {
                    Operation::push(remote, &branch.name).expect("branch name is never HEAD or empty")
                } else {
                    Operation::pull(remote, &branch.name)
                };
                out.push(auto_fix(
                    "B5",
                    Priority::Medium,
                    format!("'{}' leads one remote but matches the other", branch.name),
                    op.describe(),
                    op,
                ));
            }
            other => out.push(advisory(other, Priority::Low, "unrecognized branch scenario", "inspect manually")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        CorruptionState, ExistenceState, SyncState, WorkingTreeFiles, WorkingTreeState, PairCounts,
    };
    use std::time::Duration;

    fn base_state() -> RepositoryState {
        RepositoryState {
            existence: ExistenceState {
                id: ScenarioId::new("E1"),
                description: "all present".to_string(),
                local_exists: true,
                core_exists: true,
                github_exists: true,
                core_url: Some("git@core:repo.git".to_string()),
                github_url: Some("git@github.com:org/repo.git".to_string()),
                core_reachable: Some(true),
                github_reachable: Some(true),
                core_remote: "origin".to_string(),
                github_remote: "github".to_string(),
            },
            sync: SyncState {
                id: ScenarioId::new("S1"),
                description: "perfect sync".to_string(),
                default_branch: Some("main".to_string()),
                local_hash: Some("abc".to_string()),
                core_hash: Some("abc".to_string()),
                github_hash: Some("abc".to_string()),
                local_vs_core: PairCounts::default(),
                local_vs_github: PairCounts::default(),
                core_vs_github: PairCounts::default(),
                diverged: false,
                partial_sync: false,
                available_remote: None,
                unavailable_reason: None,
            },
            working_tree: WorkingTreeState {
                id: ScenarioId::new("W1"),
                description: "clean".to_string(),
                files: WorkingTreeFiles::default(),
                clean: true,
                detached_head: false,
                shallow: false,
                orphaned_submodules: Vec::new(),
            },
            corruption: CorruptionState {
                id: ScenarioId::new("C1"),
                description: "healthy".to_string(),
                healthy: true,
                large_binaries: Vec::new(),
                broken_refs: Vec::new(),
                missing_objects: Vec::new(),
                dangling_commits: Vec::new(),
            },
            branches: Vec::new(),
            warnings: Vec::new(),
            detection_time: Duration::from_millis(1),
        }
    }

    #[test]
    fn perfect_state_suggests_nothing() {
        assert!(suggest_fixes(&base_state()).is_empty());
    }

    #[test]
    fn s2_is_auto_fixable_and_has_an_operation() {
        let mut state = base_state();
        state.sync.id = ScenarioId::new("S2");
        state.sync.local_vs_core = PairCounts { ahead: 3, behind: 0 };
        state.sync.local_vs_github = PairCounts { ahead: 3, behind: 0 };
        let fixes = suggest_fixes(&state);
        assert_eq!(fixes.len(), 1);
        assert!(fixes[0].auto_fixable);
        assert!(fixes[0].operation.is_some());
    }

    #[test]
    fn s9_carries_a_pull_then_push_composite_but_is_not_auto_fixable() {
        let mut state = base_state();
        state.sync.id = ScenarioId::new("S9");
        let fixes = suggest_fixes(&state);
        assert_eq!(fixes.len(), 1);
        assert!(!fixes[0].auto_fixable);
        match fixes[0].operation.as_ref().expect("S9 should carry a composite operation") {
            Operation::Composite {
                operations,
                stop_on_error,
            } => {
                assert!(!stop_on_error);
                assert!(matches!(&operations[0], Operation::Pull { remote, .. } if remote == "origin"));
                assert!(matches!(&operations[1], Operation::Push { remote, .. } if remote == "github"));
            }
            other => panic!("expected a Composite operation, got {other:?}"),
        }
    }

    #[test]
    fn s8_carries_a_pull_then_push_composite_but_is_not_auto_fixable() {
        let mut state = base_state();
        state.sync.id = ScenarioId::new("S8");
        let fixes = suggest_fixes(&state);
        assert_eq!(fixes.len(), 1);
        assert!(!fixes[0].auto_fixable);
        match fixes[0].operation.as_ref().expect("S8 should carry a composite operation") {
            Operation::Composite {
                operations,
                stop_on_error,
            } => {
                assert!(!stop_on_error);
                assert!(matches!(&operations[0], Operation::Pull { remote, .. } if remote == "github"));
                assert!(matches!(&operations[1], Operation::Push { remote, .. } if remote == "origin"));
            }
            other => panic!("expected a Composite operation, got {other:?}"),
        }
    }

    #[test]
    fn divergence_is_advisory_only() {
        let mut state = base_state();
        state.sync.id = ScenarioId::new("S13");
        let fixes = suggest_fixes(&state);
        assert_eq!(fixes.len(), 1);
        assert!(!fixes[0].auto_fixable);
        assert!(fixes[0].operation.is_none());
    }

    #[test]
    fn fixes_sort_ascending_by_priority() {
        let mut state = base_state();
        state.existence.id = ScenarioId::new("E6"); // High
        state.working_tree.id = ScenarioId::new("W2"); // Medium
        let fixes = suggest_fixes(&state);
        for pair in fixes.windows(2) {
            assert!(pair[0].priority <= pair[1].priority);
        }
    }

    #[test]
    fn auto_fixable_always_implies_operation_present() {
        for id in crate::scenarios::auto_fixable_ids() {
            let mut state = base_state();
            match id {
                "S2" | "S4" | "S5" => {
                    state.sync.id = ScenarioId::new(id);
                    state.sync.local_vs_core = PairCounts { ahead: 1, behind: 0 };
                    state.sync.local_vs_github = PairCounts { ahead: 1, behind: 0 };
                }
                "S3" | "S6" | "S7" => {
                    state.sync.id = ScenarioId::new(id);
                    state.sync.local_vs_core = PairCounts { ahead: 0, behind: 1 };
                    state.sync.local_vs_github = PairCounts { ahead: 0, behind: 1 };
                }
                "B2" | "B3" | "B5" => {
                    state.branches.push(crate::state::BranchState {
                        name: "feature".to_string(),
                        id: ScenarioId::new(id),
                        description: String::new(),
                        local_vs_core: PairCounts { ahead: 1, behind: 0 },
                        local_vs_github: PairCounts { ahead: 1, behind: 0 },
                        diverged: false,
                    });
                }
                _ => continue,
            }
            let fixes = suggest_fixes(&state);
            assert!(
                fixes.iter().any(|f| f.auto_fixable && f.operation.is_some()),
                "expected an executable auto-fix for {id}"
            );
        }
    }

    #[test]
    fn partial_sync_push_targets_only_the_available_remote() {
        let mut state = base_state();
        state.existence.id = ScenarioId::new("E2");
        state.existence.github_exists = false;
        state.existence.github_url = None;
        state.sync.id = ScenarioId::new("S2");
        state.sync.partial_sync = true;
        state.sync.available_remote = Some("origin".to_string());
        state.sync.local_vs_core = PairCounts { ahead: 2, behind: 0 };

        let fixes = suggest_fixes(&state);
        let sync_fix = fixes.iter().find(|f| f.scenario_id == "S2").expect("S2 fix");
        assert!(sync_fix.auto_fixable);
        match sync_fix.operation.as_ref().expect("operation") {
            Operation::Push { remote, .. } => assert_eq!(remote, "origin"),
            other => panic!("expected a Push operation, got {other:?}"),
        }
    }

    #[test]
    fn sync_fixes_respect_custom_remote_names() {
        let mut state = base_state();
        state.existence.core_remote = "internal".to_string();
        state.existence.github_remote = "mirror".to_string();
        state.sync.id = ScenarioId::new("S5");
        state.sync.local_vs_core = PairCounts { ahead: 1, behind: 0 };
        state.sync.local_vs_github = PairCounts { ahead: 1, behind: 0 };

        let fixes = suggest_fixes(&state);
        let sync_fix = fixes.iter().find(|f| f.scenario_id == "S5").expect("S5 fix");
        match sync_fix.operation.as_ref().expect("operation") {
            Operation::Push { remote, .. } => assert_eq!(remote, "internal"),
            other => panic!("expected a Push operation, got {other:?}"),
        }
    }
}
