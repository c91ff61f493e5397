//! End-to-end `Operation` tests against real git repositories: validation
//! refusals must never touch the repository, and a validated `execute` must
//! leave the remote the way `describe()` says it will.

mod common;

use common::GitFixture;
use dualsync_core::git::{CliGitAdapter, GitAdapter};
use dualsync_core::{Classifier, DetectionOptions, Operation};

fn state(adapter: &CliGitAdapter) -> dualsync_core::RepositoryState {
    let classifier = Classifier::new(adapter, "origin", "github", DetectionOptions::default());
    classifier.detect().expect("detect() should not error on a healthy fixture")
}

#[test]
fn push_brings_github_up_to_date_with_local() {
    let fixture = GitFixture::new();
    fixture.commit_file("a.txt", "one\n", "ahead of both remotes");

    let adapter = CliGitAdapter::new(fixture.root());
    let before = state(&adapter);

    let op = Operation::push("github", "main").unwrap();
    op.validate(&before, &adapter).expect("push should validate");
    op.execute(&adapter).expect("push should execute");

    let after = state(&adapter);
    assert_eq!(after.sync.local_vs_github.ahead, 0);
    assert_eq!(after.sync.local_vs_github.behind, 0);
}

#[test]
fn pull_fetches_and_resets_to_core_head() {
    let fixture = GitFixture::new();
    fixture.advance_core_behind_local("someone else's commit");

    let adapter = CliGitAdapter::new(fixture.root());
    let before = state(&adapter);
    assert_eq!(before.sync.id, "S7");

    let op = Operation::pull("origin", "main");
    op.validate(&before, &adapter).expect("pull should validate");
    op.execute(&adapter).expect("pull should execute");

    let after = state(&adapter);
    assert_eq!(after.sync.id, "S1");
    assert_eq!(after.sync.local_vs_core.behind, 0);
}

#[test]
fn reset_refuses_when_not_a_fast_forward() {
    let fixture = GitFixture::new();
    // Local gets a commit the bare "core" remote never sees, so core's
    // current tip is not an ancestor of local HEAD: resetting to it would
    // discard the local commit rather than fast-forward onto it.
    fixture.commit_file("a.txt", "one\n", "local-only commit");

    let adapter = CliGitAdapter::new(fixture.root());
    let local_head_before = adapter
        .branch_hash("main")
        .expect("branch_hash should succeed")
        .expect("main should exist");

    let before = state(&adapter);
    let op = Operation::reset("origin/main");
    let err = op.validate(&before, &adapter).expect_err("reset onto a non-ancestor must not validate");
    assert!(matches!(
        err,
        dualsync_core::OperationError::Validation(dualsync_core::ValidationFailure::NotFastForward)
    ));

    let local_head_after = adapter
        .branch_hash("main")
        .expect("branch_hash should succeed")
        .expect("main should exist");
    assert_eq!(local_head_before, local_head_after, "a refused validate() must not mutate the repository");
}

#[test]
fn push_refuses_with_a_dirty_working_tree() {
    let fixture = GitFixture::new();
    fixture.commit_file("a.txt", "one\n", "ahead of both remotes");
    std::fs::write(fixture.root().join("a.txt"), "dirty\n").unwrap();

    let adapter = CliGitAdapter::new(fixture.root());
    let before = state(&adapter);
    assert!(!before.working_tree.clean);

    let op = Operation::push("github", "main").unwrap();
    let err = op.validate(&before, &adapter).expect_err("push with a dirty working tree must not validate");
    assert!(matches!(
        err,
        dualsync_core::OperationError::Validation(dualsync_core::ValidationFailure::DirtyWorkingTree)
    ));
}

#[test]
fn fetch_refuses_against_an_unreachable_remote() {
    let fixture = GitFixture::new();
    fixture.git(&["remote", "set-url", "github", "/nonexistent/does-not-exist.git"]);

    let adapter = CliGitAdapter::new(fixture.root());
    let before = state(&adapter);

    let op = Operation::fetch("github");
    let err = op.validate(&before, &adapter).expect_err("fetch against an unreachable remote must not validate");
    assert!(matches!(
        err,
        dualsync_core::OperationError::Validation(dualsync_core::ValidationFailure::NotReachable(_))
    ));
}
