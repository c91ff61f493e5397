//! Static, process-wide catalog mapping every scenario ID the classifier can
//! produce to presentation metadata. Built once behind a `LazyLock`, the
//! same primitive the git adapter's mutex sibling reaches for elsewhere in
//! this crate: pure read-only data, no initialization-order invariant.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::state::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioCategory {
    Existence,
    Sync,
    WorkingTree,
    Corruption,
    Branch,
}

#[derive(Debug, Clone)]
pub struct ScenarioInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub category: ScenarioCategory,
    pub severity: Priority,
    pub auto_fixable: bool,
    pub typical_causes: &'static [&'static str],
    pub manual_steps: &'static [&'static str],
    pub related_ids: &'static [&'static str],
}

macro_rules! scenario {
    ($id:expr, $name:expr, $description:expr, $category:expr, $severity:expr, $auto_fixable:expr, $causes:expr, $steps:expr, $related:expr) => {
        (
            $id,
            ScenarioInfo {
                name: $name,
                description: $description,
                category: $category,
                severity: $severity,
                auto_fixable: $auto_fixable,
                typical_causes: $causes,
                manual_steps: $steps,
                related_ids: $related,
            },
        )
    };
}

static TABLE: LazyLock<HashMap<&'static str, ScenarioInfo>> = LazyLock::new(|| {
    use ScenarioCategory::*;
    HashMap::from([
        scenario!("E1", "all present", "Local, Core, and GitHub all exist", Existence, Priority::VeryLow, false,
            &["normal operation"], &[], &["S1"]),
        scenario!("E2", "no GitHub", "Local and Core exist; GitHub remote is not configured", Existence, Priority::High, false,
            &["repository created before the GitHub mirror was set up"], &["git remote add github <url>"], &["E3"]),
        scenario!("E3", "no Core", "Local and GitHub exist; Core remote is not configured", Existence, Priority::Critical, false,
            &["repository cloned directly from GitHub, bypassing Core"], &["git remote add origin <core-url>"], &["E2"]),
        scenario!("E4", "local only", "Local exists; neither remote is configured", Existence, Priority::Critical, false,
            &["repository never pushed anywhere"], &["git remote add origin <core-url>", "git remote add github <url>"], &["E5", "E8"]),
        scenario!("E5", "remotes only", "Both remotes exist; no local checkout", Existence, Priority::Medium, false,
            &["local clone was deleted"], &["git clone <core-url>"], &["E1"]),
        scenario!("E6", "Core only", "Only the Core remote exists", Existence, Priority::High, false,
            &["GitHub mirror never created"], &["clone from Core, then add the GitHub remote"], &["E2"]),
        scenario!("E7", "GitHub only", "Only the GitHub remote exists", Existence, Priority::Critical, false,
            &["Core was never set up, or was decommissioned"], &["clone from GitHub, then add the Core remote"], &["E3"]),
        scenario!("E8", "none", "Neither local, Core, nor GitHub exist", Existence, Priority::VeryLow, false,
            &["nothing has been created yet"], &["initialize a repository and configure both remotes"], &[]),
        scenario!("S1", "perfect sync", "Local, Core, and GitHub resolve the default branch to the same commit", Sync, Priority::VeryLow, false,
            &["normal operation"], &[], &[]),
        scenario!("S2", "local ahead of both", "Local has unpushed commits ahead of both Core and GitHub", Sync, Priority::Low, true,
            &["local commits not yet pushed"], &["git push origin <branch>", "git push github <branch>"], &["S5", "S4"]),
        scenario!("S3", "local behind both", "Both remotes have commits the local checkout lacks", Sync, Priority::Medium, true,
            &["another contributor pushed since the last fetch"], &["git pull origin <branch>"], &["S7", "S6"]),
        scenario!("S4", "ahead of GitHub only", "Local (and Core) are ahead of GitHub", Sync, Priority::High, true,
            &["GitHub mirror push failed or was skipped"], &["git push github <branch>"], &["S2"]),
        scenario!("S5", "ahead of Core only", "Local (and GitHub) are ahead of Core", Sync, Priority::Critical, true,
            &["Core push failed or was skipped"], &["git push origin <branch>"], &["S2"]),
        scenario!("S6", "behind GitHub only", "Local is behind GitHub but matches Core", Sync, Priority::Medium, true,
            &["commit landed on GitHub outside the normal dual-push flow"], &["git pull github <branch>"], &["S3"]),
        scenario!("S7", "behind Core only", "Local is behind Core but matches GitHub", Sync, Priority::Medium, true,
            &["commit landed on Core outside the normal dual-push flow"], &["git pull origin <branch>"], &["S3"]),
        scenario!("S8", "GitHub ahead of the rest", "GitHub has commits neither Local nor Core has", Sync, Priority::High, false,
            &["someone pushed directly to GitHub"], &["inspect GitHub's history before merging it in"], &["S9"]),
        scenario!("S9", "Core ahead of the rest", "Core has commits neither Local nor GitHub has", Sync, Priority::High, false,
            &["someone pushed directly to Core"], &["inspect Core's history before merging it in"], &["S8"]),
        scenario!("S10", "remotes diverged", "Local, Core, and GitHub have all drifted apart without a clean lead", Sync, Priority::Critical, false,
            &["concurrent pushes to more than one location"], &["manually reconcile history before pushing"], &["S11", "S12", "S13"]),
        scenario!("S11", "diverged, local ahead-leaning", "Local has diverged from the remotes but leads on net commit count", Sync, Priority::Critical, false,
            &["local committed on top of a stale fetch"], &["fetch, review the divergence, then merge or rebase"], &["S10"]),
        scenario!("S12", "diverged, local behind-leaning", "Local has diverged from the remotes and trails on net commit count", Sync, Priority::Critical, false,
            &["local committed on top of a stale fetch while the remotes advanced"], &["fetch, review the divergence, then merge or rebase"], &["S10"]),
        scenario!("S13", "three-way divergence", "Local, Core, and GitHub have each taken a distinct path", Sync, Priority::Critical, false,
            &["pushes landed independently on local, Core, and GitHub"], &["manually reconcile all three histories"], &["S10"]),
        scenario!("S_UNAVAILABLE", "remote unreachable", "The configured remote could not be reached to classify sync", Sync, Priority::Critical, false,
            &["network outage", "revoked credentials", "remote host down"], &["check connectivity and credentials, then retry"], &[]),
        scenario!("S_NA_DETACHED", "detached HEAD", "Sync is undefined while HEAD does not point at a branch", Sync, Priority::High, false,
            &["a commit, tag, or remote ref was checked out directly"], &["git checkout <branch>"], &["C7"]),
        scenario!("W1", "clean", "No staged, unstaged, or conflicting changes", WorkingTree, Priority::VeryLow, false,
            &["normal operation"], &[], &[]),
        scenario!("W2", "staged changes", "Changes are staged but not committed", WorkingTree, Priority::Medium, false,
            &["work in progress"], &["git commit"], &["W3"]),
        scenario!("W3", "unstaged changes", "Tracked files have unstaged modifications", WorkingTree, Priority::Medium, false,
            &["work in progress"], &["git add", "git commit"], &["W2"]),
        scenario!("W4", "conflicts", "One or more files have unresolved merge conflicts", WorkingTree, Priority::Critical, false,
            &["a merge, rebase, or cherry-pick stopped on a conflict"], &["resolve conflicts, then git add and continue the operation"], &[]),
        scenario!("W5", "untracked only", "Only untracked files are present; the tracked tree is clean", WorkingTree, Priority::Low, false,
            &["new files not yet added"], &["git add, or add to .gitignore"], &["W1"]),
        scenario!("C1", "healthy", "No corruption or health concerns detected", Corruption, Priority::VeryLow, false,
            &["normal operation"], &[], &[]),
        scenario!("C2", "broken refs", "One or more refs could not be resolved", Corruption, Priority::Critical, false,
            &["interrupted git operation", "disk corruption"], &["git fsck", "consult the ref's reflog"], &["C4"]),
        scenario!("C3", "large binaries", "One or more blobs exceed the configured size threshold", Corruption, Priority::Medium, false,
            &["a large asset was committed directly instead of via LFS"], &["migrate the blob to Git LFS or remove it from history"], &["C6"]),
        scenario!("C4", "missing objects", "The object database is missing objects referenced by a ref", Corruption, Priority::Critical, false,
            &["shallow clone missing ancestors", "disk corruption"], &["git fsck --full", "re-clone if unrecoverable"], &["C2", "C8"]),
        scenario!("C5", "dangling commits", "Commits exist that are not reachable from any ref", Corruption, Priority::Low, false,
            &["rebase, reset, or branch deletion left orphaned commits"], &["git fsck --unreachable", "git gc if intentional"], &[]),
        scenario!("C6", "LFS in use", "Git LFS is configured for this repository", Corruption, Priority::VeryLow, false,
            &["intentional use of Git LFS"], &[], &["C3"]),
        scenario!("C7", "detached HEAD", "HEAD does not point at a branch", Corruption, Priority::Low, false,
            &["a commit, tag, or remote ref was checked out directly"], &["git checkout <branch>"], &["S_NA_DETACHED"]),
        scenario!("C8", "shallow clone", "The repository is a shallow clone with truncated history", Corruption, Priority::Low, false,
            &["cloned with --depth"], &["git fetch --unshallow"], &["C4"]),
        scenario!("B1", "branch in sync", "This branch matches both remotes", Branch, Priority::VeryLow, false,
            &["normal operation"], &[], &[]),
        scenario!("B2", "branch ahead of both", "This branch has unpushed commits on both remotes", Branch, Priority::Low, true,
            &["local commits not yet pushed"], &["git push origin <branch>", "git push github <branch>"], &["S2"]),
        scenario!("B3", "branch behind both", "Both remotes have commits this branch lacks", Branch, Priority::Medium, true,
            &["another contributor pushed since the last fetch"], &["git pull origin <branch>"], &["S3"]),
        scenario!("B4", "branch diverged", "This branch has diverged from one or both remotes", Branch, Priority::High, false,
            &["concurrent work on the same branch"], &["manually reconcile before pushing"], &["S10"]),
        scenario!("B5", "branch ahead of one", "This branch leads one remote but matches the other", Branch, Priority::Medium, true,
            &["partial push"], &["push to the lagging remote"], &["S4", "S5"]),
        scenario!("B6", "branch stale", "This branch has not been updated in a long time", Branch, Priority::Low, false,
            &["abandoned feature branch"], &["delete if no longer needed, or rebase onto the default branch"], &[]),
        scenario!("B7", "branch orphaned", "This branch has no remote-tracking counterpart", Branch, Priority::Low, false,
            &["local-only branch never pushed"], &["push it if it should be shared, or delete it"], &[]),
    ])
});

/// Every ID the classifier can produce, used by the exhaustiveness test
/// below and by any caller that wants to enumerate the catalog.
pub const ALL_IDS: &[&str] = &[
    "E1", "E2", "E3", "E4", "E5", "E6", "E7", "E8",
    "S1", "S2", "S3", "S4", "S5", "S6", "S7", "S8", "S9", "S10", "S11", "S12", "S13",
    "S_UNAVAILABLE", "S_NA_DETACHED",
    "W1", "W2", "W3", "W4", "W5",
    "C1", "C2", "C3", "C4", "C5", "C6", "C7", "C8",
    "B1", "B2", "B3", "B4", "B5", "B6", "B7",
];

pub fn lookup(id: &str) -> Option<&'static ScenarioInfo> {
    TABLE.get(id)
}

/// IDs whose catalog entry marks them as a capability hint for auto-fixing.
/// This is presentation metadata only — the suggester and executor remain
/// the authorities on whether a *specific* situation is safe to apply.
pub fn auto_fixable_ids() -> impl Iterator<Item = &'static str> {
    TABLE
        .iter()
        .filter(|(_, info)| info.auto_fixable)
        .map(|(id, _)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_exhaustive() {
        for id in ALL_IDS {
            assert!(lookup(id).is_some(), "missing scenario table entry for {id}");
        }
    }

    #[test]
    fn catalog_has_no_extra_entries() {
        assert_eq!(TABLE.len(), ALL_IDS.len());
    }

    #[test]
    fn auto_fixable_filter_matches_catalog() {
        let ids: std::collections::HashSet<_> = auto_fixable_ids().collect();
        assert!(ids.contains("S2"));
        assert!(ids.contains("B2"));
        assert!(!ids.contains("S1"));
        assert!(!ids.contains("E1"));
    }
}
