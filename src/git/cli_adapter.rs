//! `CliGitAdapter`: the one `GitAdapter` implementation this crate ships,
//! wrapping the `git` binary via `std::process::Command`.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::adapter::{GitAdapter, LargeBinary, OrphanedSubmodule};
use super::error::GitError;
use super::parse;

const QUICK_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const MUTATING_TIMEOUT: Duration = Duration::from_secs(30);

/// Shells out to `git`, rooted at `root`. All invocations are serialized
/// behind `lock` (permit count 1, not the teacher's heavier-weight
/// semaphore): mutating calls must never interleave with reads against the
/// same working directory, and git itself races on its own index/refs when
/// two processes touch them concurrently.
pub struct CliGitAdapter {
    root: PathBuf,
    remote_check_timeout: Duration,
    fetch_timeout: Duration,
    lock: Mutex<()>,
}

impl CliGitAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            remote_check_timeout: QUICK_TIMEOUT,
            fetch_timeout: MUTATING_TIMEOUT,
            lock: Mutex::new(()),
        }
    }

    pub fn with_timeouts(
        root: impl Into<PathBuf>,
        remote_check_timeout: Duration,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            root: root.into(),
            remote_check_timeout,
            fetch_timeout,
            lock: Mutex::new(()),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.root).args(args);
        cmd
    }

    /// Run `cmd`, killing it if it outlives `timeout`. Mirrors the teacher's
    /// `shell_exec::run_with_timeout_impl` reader-thread approach so a child
    /// that fills its stdout/stderr pipes can't deadlock the wait.
    fn run(&self, op: &str, cmd: &mut Command, timeout: Duration) -> Result<String, GitError> {
        let _guard = self
            .lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        log::debug!("$ git {op}");
        let t0 = Instant::now();

        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(GitError::from)?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        let stdout_thread = std::thread::spawn(move || {
            let mut buf = Vec::new();
            if let Some(ref mut h) = stdout_handle {
                let _ = h.read_to_end(&mut buf);
            }
            buf
        });
        let stderr_thread = std::thread::spawn(move || {
            let mut buf = Vec::new();
            if let Some(ref mut h) = stderr_handle {
                let _ = h.read_to_end(&mut buf);
            }
            buf
        });

        let deadline = t0 + timeout;
        let status = loop {
            match child.try_wait().map_err(GitError::from)? {
                Some(status) => break status,
                None => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        let _ = stdout_thread.join();
                        let _ = stderr_thread.join();
                        return Err(GitError::Timeout {
                            operation: op.to_string(),
                            seconds: timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(Duration::from_millis(10));
                }
            }
        };

        let stdout = stdout_thread.join().unwrap_or_default();
        let stderr = stderr_thread.join().unwrap_or_default();

        log::debug!(
            "[dualsync-trace] op={op} dur={:.1}ms ok={}",
            t0.elapsed().as_secs_f64() * 1000.0,
            status.success()
        );

        if !status.success() {
            return Err(GitError::CommandFailed(
                String::from_utf8_lossy(&stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }

    /// `true` on exit 0, `false` on exit 1, `Err` on any other outcome —
    /// matching `git merge-base --is-ancestor`'s exit-code contract.
    fn run_bool(&self, op: &str, cmd: &mut Command, timeout: Duration) -> Result<bool, GitError> {
        let _guard = self
            .lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let output = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(GitError::from)?;

        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(GitError::CommandFailed(format!(
                "git {op} exited unexpectedly: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }
}

impl GitAdapter for CliGitAdapter {
    fn local_exists(&self) -> Result<(bool, Option<PathBuf>), GitError> {
        if !self.root.join(".git").exists() && !self.root.exists() {
            return Ok((false, None));
        }
        match self.run(
            "rev-parse --show-toplevel",
            self.command(&["rev-parse", "--show-toplevel"]).borrow_cmd(),
            QUICK_TIMEOUT,
        ) {
            Ok(top) => Ok((true, Some(PathBuf::from(top)))),
            Err(GitError::CommandFailed(_)) => Ok((false, None)),
            Err(e) => Err(e),
        }
    }

    fn is_repository(&self) -> Result<bool, GitError> {
        Ok(self.local_exists()?.0)
    }

    fn list_remotes(&self) -> Result<Vec<String>, GitError> {
        let out = self.run(
            "remote",
            self.command(&["remote"]).borrow_cmd(),
            QUICK_TIMEOUT,
        )?;
        Ok(out.lines().map(str::to_string).filter(|l| !l.is_empty()).collect())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>, GitError> {
        match self.run(
            "remote get-url",
            self.command(&["remote", "get-url", remote]).borrow_cmd(),
            QUICK_TIMEOUT,
        ) {
            Ok(url) if !url.is_empty() => Ok(Some(url)),
            Ok(_) => Ok(None),
            Err(GitError::CommandFailed(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn can_reach_remote(&self, remote: &str) -> Result<bool, GitError> {
        match self.run(
            "ls-remote",
            self.command(&["ls-remote", "--exit-code", remote, "HEAD"])
                .borrow_cmd(),
            self.remote_check_timeout,
        ) {
            Ok(_) => Ok(true),
            Err(GitError::CommandFailed(_)) => Ok(false),
            Err(GitError::Timeout { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn current_branch(&self) -> Result<Option<String>, GitError> {
        let out = self.run(
            "rev-parse --abbrev-ref HEAD",
            self.command(&["rev-parse", "--abbrev-ref", "HEAD"])
                .borrow_cmd(),
            QUICK_TIMEOUT,
        )?;
        if out == "HEAD" {
            Ok(None)
        } else {
            Ok(Some(out))
        }
    }

    fn list_branches(&self) -> Result<(Vec<String>, Vec<String>), GitError> {
        let local = self.run(
            "branch --format",
            self.command(&["branch", "--format=%(refname:short)"])
                .borrow_cmd(),
            DEFAULT_TIMEOUT,
        )?;
        let remote = self.run(
            "branch -r --format",
            self.command(&["branch", "-r", "--format=%(refname:short)"])
                .borrow_cmd(),
            DEFAULT_TIMEOUT,
        )?;
        Ok((
            local.lines().map(str::to_string).filter(|l| !l.is_empty()).collect(),
            remote.lines().map(str::to_string).filter(|l| !l.is_empty()).collect(),
        ))
    }

    fn default_branch(&self, remote: &str) -> Result<String, GitError> {
        let symbolic = format!("{remote}/HEAD");
        if let Ok(name) = self.run(
            "rev-parse --abbrev-ref (cached default)",
            self.command(&["rev-parse", "--abbrev-ref", &symbolic])
                .borrow_cmd(),
            QUICK_TIMEOUT,
        ) && let Some(branch) = name.strip_prefix(&format!("{remote}/"))
        {
            return Ok(branch.to_string());
        }

        for candidate in ["main", "master"] {
            let refname = format!("refs/remotes/{remote}/{candidate}");
            if self
                .run(
                    "rev-parse --verify (probe)",
                    self.command(&["rev-parse", "--verify", "--quiet", &refname])
                        .borrow_cmd(),
                    QUICK_TIMEOUT,
                )
                .is_ok()
            {
                return Ok(candidate.to_string());
            }
        }

        let out = self.run(
            "ls-remote --symref",
            self.command(&["ls-remote", "--symref", remote, "HEAD"])
                .borrow_cmd(),
            self.remote_check_timeout,
        )?;
        parse::parse_symref_default_branch(&out)
            .ok_or_else(|| GitError::ParseError(format!("no symref HEAD in ls-remote for {remote}")))
    }

    fn branch_hash(&self, branch: &str) -> Result<Option<String>, GitError> {
        match self.run(
            "rev-parse (branch)",
            self.command(&["rev-parse", "--verify", "--quiet", branch])
                .borrow_cmd(),
            QUICK_TIMEOUT,
        ) {
            Ok(hash) => Ok(Some(hash)),
            Err(GitError::CommandFailed(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn remote_branch_hash(&self, remote: &str, branch: &str) -> Result<String, GitError> {
        let refname = format!("{remote}/{branch}");
        match self.run(
            "rev-parse (remote branch)",
            self.command(&["rev-parse", "--verify", "--quiet", &refname])
                .borrow_cmd(),
            QUICK_TIMEOUT,
        ) {
            Ok(hash) => Ok(hash),
            Err(GitError::CommandFailed(_)) => Ok(String::new()),
            Err(e) => Err(e),
        }
    }

    fn commits_between(&self, from: &str, to: &str) -> Result<u64, GitError> {
        let range = format!("{to}..{from}");
        let out = self.run(
            "rev-list --count",
            self.command(&["rev-list", "--count", &range]).borrow_cmd(),
            DEFAULT_TIMEOUT,
        )?;
        out.trim()
            .parse()
            .map_err(|_| GitError::ParseError(format!("non-numeric rev-list --count output: {out}")))
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool, GitError> {
        self.run_bool(
            "merge-base --is-ancestor",
            self.command(&["merge-base", "--is-ancestor", ancestor, descendant])
                .borrow_cmd(),
            DEFAULT_TIMEOUT,
        )
    }

    fn staged_files(&self) -> Result<Vec<String>, GitError> {
        Ok(self.status()?.staged)
    }

    fn unstaged_files(&self) -> Result<Vec<String>, GitError> {
        Ok(self.status()?.unstaged)
    }

    fn untracked_files(&self) -> Result<Vec<String>, GitError> {
        Ok(self.status()?.untracked)
    }

    fn conflict_files(&self) -> Result<Vec<String>, GitError> {
        Ok(self.status()?.conflict)
    }

    fn is_detached_head(&self) -> Result<bool, GitError> {
        Ok(self.current_branch()?.is_none())
    }

    fn is_shallow_clone(&self) -> Result<bool, GitError> {
        Ok(self.root.join(".git").join("shallow").exists())
    }

    fn orphaned_submodules(&self) -> Result<Vec<OrphanedSubmodule>, GitError> {
        let gitmodules = self.root.join(".gitmodules");
        if !gitmodules.exists() {
            return Ok(Vec::new());
        }
        let declared = match self.run(
            "config --file .gitmodules --get-regexp path",
            self.command(&["config", "--file", ".gitmodules", "--get-regexp", "path"])
                .borrow_cmd(),
            DEFAULT_TIMEOUT,
        ) {
            Ok(out) => out,
            Err(GitError::CommandFailed(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut orphans = Vec::new();
        for line in declared.lines() {
            let Some(path) = line.split_whitespace().nth(1) else {
                continue;
            };
            if !self.root.join(path).exists() {
                orphans.push(OrphanedSubmodule {
                    path: path.to_string(),
                    reason: "declared in .gitmodules but missing on disk".to_string(),
                });
            }
        }
        Ok(orphans)
    }

    fn lfs_enabled(&self) -> Result<bool, GitError> {
        Ok(self.root.join(".gitattributes").is_file()
            && std::fs::read_to_string(self.root.join(".gitattributes"))
                .map(|contents| contents.contains("filter=lfs"))
                .unwrap_or(false))
    }

    fn scan_large_binaries(&self, threshold_bytes: u64) -> Result<Vec<LargeBinary>, GitError> {
        let objects = self.run(
            "rev-list --objects --all",
            self.command(&["rev-list", "--objects", "--all"]).borrow_cmd(),
            MUTATING_TIMEOUT,
        )?;
        let shas: Vec<&str> = objects
            .lines()
            .filter_map(|l| l.split_whitespace().next())
            .collect();
        if shas.is_empty() {
            return Ok(Vec::new());
        }

        let _guard = self
            .lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let mut child = self
            .command(&["cat-file", "--batch-check=%(objectname) %(objecttype) %(objectsize)"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(GitError::from)?;

        if let Some(mut stdin) = child.stdin.take() {
            use std::io::Write;
            for sha in &shas {
                let _ = writeln!(stdin, "{sha}");
            }
        }

        let output = child.wait_with_output().map_err(GitError::from)?;
        if !output.status.success() {
            return Err(GitError::CommandFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(parse::parse_batch_check_large_binaries(
            &String::from_utf8_lossy(&output.stdout),
            threshold_bytes,
        ))
    }

    fn fetch(&self, remote: &str) -> Result<(), GitError> {
        self.run(
            "fetch",
            self.command(&["fetch", remote]).borrow_cmd(),
            self.fetch_timeout,
        )?;
        Ok(())
    }

    fn push(&self, remote: &str, refspec: &str) -> Result<(), GitError> {
        self.run(
            "push",
            self.command(&["push", remote, refspec]).borrow_cmd(),
            MUTATING_TIMEOUT,
        )?;
        Ok(())
    }

    fn reset_hard(&self, reference: &str) -> Result<(), GitError> {
        self.run(
            "reset --hard",
            self.command(&["reset", "--hard", reference]).borrow_cmd(),
            MUTATING_TIMEOUT,
        )?;
        Ok(())
    }
}

impl CliGitAdapter {
    fn status(&self) -> Result<parse::PorcelainStatus, GitError> {
        let out = self.run(
            "status --porcelain=v2",
            self.command(&["status", "--porcelain=v2"]).borrow_cmd(),
            DEFAULT_TIMEOUT,
        )?;
        Ok(parse::parse_status(&out))
    }
}

/// `Command` has no inherent identity function; this just hands back `&mut
/// self` so call sites can build the command and pass it to `run`/`run_bool`
/// in one expression instead of naming an intermediate `let mut cmd`.
trait BorrowCmd {
    fn borrow_cmd(&mut self) -> &mut Self;
}

impl BorrowCmd for Command {
    fn borrow_cmd(&mut self) -> &mut Self {
        self
    }
}

#[allow(dead_code)]
fn _assert_send_sync(_: &dyn Fn(&Path)) {}
