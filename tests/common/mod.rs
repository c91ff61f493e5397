//! Git fixture harness for the classifier/operations integration tests.
//! Mirrors the teacher's `tests/common/mod.rs` `TestRepo`: isolated env vars
//! so tests never touch the running user's global git config, deterministic
//! author/committer dates, and real `git init --bare` remotes rather than
//! mocked ones — the adapter under test is `CliGitAdapter`, so the fixture
//! has to produce an actual repository on disk.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

pub struct GitFixture {
    _temp: TempDir,
    pub local: PathBuf,
    pub core_bare: PathBuf,
    pub github_bare: PathBuf,
}

impl GitFixture {
    /// A local checkout with two bare "remotes" (`origin` = Core,
    /// `github` = GitHub), all starting at one shared initial commit.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("failed to create tempdir");
        let core_bare = temp.path().join("core.git");
        let github_bare = temp.path().join("github.git");
        let local = temp.path().join("local");

        init_bare(temp.path(), &core_bare);
        init_bare(temp.path(), &github_bare);
        git(temp.path(), &["clone", core_bare.to_str().unwrap(), local.to_str().unwrap()]);

        let fixture = Self {
            _temp: temp,
            local,
            core_bare,
            github_bare,
        };
        fixture.git(&["config", "user.name", "Test User"]);
        fixture.git(&["config", "user.email", "test@example.com"]);
        fixture.git(&["remote", "add", "github", fixture.github_bare.to_str().unwrap()]);

        fixture.commit_file("README.md", "hello\n", "initial commit");
        fixture.git(&["push", "origin", "main"]);
        fixture.git(&["push", "github", "main"]);

        fixture
    }

    /// Same as `new`, but GitHub is never configured as a remote.
    pub fn new_core_only() -> Self {
        let temp = TempDir::new().expect("failed to create tempdir");
        let core_bare = temp.path().join("core.git");
        let local = temp.path().join("local");

        init_bare(temp.path(), &core_bare);
        git(temp.path(), &["clone", core_bare.to_str().unwrap(), local.to_str().unwrap()]);

        let fixture = Self {
            _temp: temp,
            local,
            core_bare: core_bare.clone(),
            // No GitHub remote is ever configured for this fixture; this
            // field is unused in that case but keeps the struct uniform.
            github_bare: core_bare,
        };
        fixture.git(&["config", "user.name", "Test User"]);
        fixture.git(&["config", "user.email", "test@example.com"]);
        fixture.commit_file("README.md", "hello\n", "initial commit");
        fixture.git(&["push", "origin", "main"]);
        fixture
    }

    pub fn root(&self) -> &Path {
        &self.local
    }

    pub fn git(&self, args: &[&str]) -> std::process::Output {
        let mut cmd = Command::new("git");
        configure_env(&mut cmd);
        cmd.args(args).current_dir(&self.local);
        cmd.output().expect("failed to run git")
    }

    pub fn commit_file(&self, name: &str, contents: &str, message: &str) {
        std::fs::write(self.local.join(name), contents).expect("failed to write fixture file");
        self.git(&["add", name]);
        let output = self.git(&["commit", "-m", message]);
        assert!(
            output.status.success(),
            "commit failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    pub fn push_core(&self) {
        let output = self.git(&["push", "origin", "main"]);
        assert!(output.status.success(), "push to origin failed: {}", String::from_utf8_lossy(&output.stderr));
    }

    pub fn push_github(&self) {
        let output = self.git(&["push", "github", "main"]);
        assert!(output.status.success(), "push to github failed: {}", String::from_utf8_lossy(&output.stderr));
    }

    pub fn fetch_all(&self) {
        self.git(&["fetch", "origin"]);
        self.git(&["fetch", "github"]);
    }

    /// Push directly into the Core bare repo from a throwaway clone, so the
    /// local checkout ends up *behind* Core without ever touching it.
    pub fn advance_core_behind_local(&self, message: &str) {
        let temp = TempDir::new().expect("failed to create tempdir");
        let scratch = temp.path().join("scratch");
        git(temp.path(), &["clone", self.core_bare.to_str().unwrap(), scratch.to_str().unwrap()]);
        let mut cmd = Command::new("git");
        configure_env(&mut cmd);
        cmd.args(["config", "user.name", "Other Contributor"]).current_dir(&scratch);
        cmd.output().expect("failed to configure scratch clone");
        let mut cmd = Command::new("git");
        configure_env(&mut cmd);
        cmd.args(["config", "user.email", "other@example.com"]).current_dir(&scratch);
        cmd.output().expect("failed to configure scratch clone");

        std::fs::write(scratch.join("OTHER.md"), "from elsewhere\n").expect("failed to write");
        let mut cmd = Command::new("git");
        configure_env(&mut cmd);
        cmd.args(["add", "OTHER.md"]).current_dir(&scratch);
        cmd.output().expect("failed to add");
        let mut cmd = Command::new("git");
        configure_env(&mut cmd);
        cmd.args(["commit", "-m", message]).current_dir(&scratch);
        let out = cmd.output().expect("failed to commit");
        assert!(out.status.success(), "scratch commit failed");

        let mut cmd = Command::new("git");
        configure_env(&mut cmd);
        cmd.args(["push", "origin", "main"]).current_dir(&scratch);
        let out = cmd.output().expect("failed to push from scratch clone");
        assert!(out.status.success(), "scratch push failed: {}", String::from_utf8_lossy(&out.stderr));
    }
}

fn init_bare(cwd: &Path, target: &Path) {
    git(cwd, &["init", "--bare", "--initial-branch=main", target.to_str().unwrap()]);
}

fn git(cwd: &Path, args: &[&str]) {
    let mut cmd = Command::new("git");
    configure_env(&mut cmd);
    let output = cmd.args(args).current_dir(cwd).output().expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn configure_env(cmd: &mut Command) {
    cmd.env("GIT_CONFIG_GLOBAL", "/dev/null");
    cmd.env("GIT_CONFIG_SYSTEM", "/dev/null");
    cmd.env("GIT_AUTHOR_NAME", "Test User");
    cmd.env("GIT_AUTHOR_EMAIL", "test@example.com");
    cmd.env("GIT_COMMITTER_NAME", "Test User");
    cmd.env("GIT_COMMITTER_EMAIL", "test@example.com");
    cmd.env("GIT_AUTHOR_DATE", "2026-01-01T00:00:00Z");
    cmd.env("GIT_COMMITTER_DATE", "2026-01-01T00:00:00Z");
    cmd.env("LC_ALL", "C");
    cmd.env("LANG", "C");
}
