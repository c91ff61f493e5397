//! Parsing helpers for git's machine-readable output formats. Kept separate
//! from `cli_adapter` so the parsing logic can be unit-tested against fixed
//! strings without spawning a subprocess.

use super::adapter::LargeBinary;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PorcelainStatus {
    pub staged: Vec<String>,
    pub unstaged: Vec<String>,
    pub untracked: Vec<String>,
    pub conflict: Vec<String>,
}

/// Parse `git status --porcelain=v2` output.
///
/// Line shapes:
/// - `1 XY ... path`            ordinary changed entry
/// - `2 XY ... path\tpath2`     renamed/copied entry
/// - `u XY ... path`            unmerged (conflict)
/// - `? path`                   untracked
/// - `! path`                   ignored (not surfaced)
pub fn parse_status(output: &str) -> PorcelainStatus {
    let mut status = PorcelainStatus::default();

    for line in output.lines() {
        if line.is_empty() {
            continue;
        }
        let mut parts = line.splitn(2, ' ');
        let marker = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default();

        match marker {
            "?" => status.untracked.push(rest.to_string()),
            "u" => {
                if let Some(path) = unmerged_path(rest) {
                    status.conflict.push(path);
                }
            }
            "1" => {
                if let Some(entry) = ordinary_xy_and_path(rest) {
                    push_changed_entry(&mut status, entry);
                }
            }
            "2" => {
                if let Some(entry) = rename_xy_and_path(rest) {
                    push_changed_entry(&mut status, entry);
                }
            }
            _ => {}
        }
    }

    status
}

/// Splits an `XY` pair into staged/unstaged entries for `path`, per the
/// `X != '.'` / `Y != '.'` convention shared by type-1 and type-2 lines.
fn push_changed_entry(status: &mut PorcelainStatus, (xy, path): (String, String)) {
    let x = xy.as_bytes()[0] as char;
    let y = xy.as_bytes()[1] as char;
    if x != '.' {
        status.staged.push(path.clone());
    }
    if y != '.' {
        status.unstaged.push(path);
    }
}

/// `rest` for a "1" line: `XY sub mH mI mW hH hI path` — 8 fields, no rename
/// score and no tab-separated original path.
fn ordinary_xy_and_path(rest: &str) -> Option<(String, String)> {
    let mut fields = rest.splitn(8, ' ');
    let xy = fields.next()?.to_string();
    let path = fields.last()?;
    Some((xy, path.to_string()))
}

/// `rest` for a "2" (rename/copy) line: `XY sub mH mI mW hH hI X-score
/// path\torigPath` — 9 fields, the extra one being the `<X><score>` token
/// ahead of the path. The path itself is still followed by a tab and the
/// original path, which we strip.
fn rename_xy_and_path(rest: &str) -> Option<(String, String)> {
    let mut fields = rest.splitn(9, ' ');
    let xy = fields.next()?.to_string();
    let remainder = fields.last()?;
    let path = remainder.split('\t').next().unwrap_or(remainder);
    Some((xy, path.to_string()))
}

/// `rest` for a "u" line starts with `XY sub m1 m2 m3 mW h1 h2 h3 path`.
fn unmerged_path(rest: &str) -> Option<String> {
    let mut fields = rest.splitn(9, ' ');
    let path = fields.nth(8)?;
    Some(path.to_string())
}

/// Parse `git ls-remote --symref <remote> HEAD` output. Expected:
/// ```text
/// ref: refs/heads/main	HEAD
/// 85a1ce7c7182540f9c02453441cb3e8bf0ced214	HEAD
/// ```
pub fn parse_symref_default_branch(output: &str) -> Option<String> {
    for line in output.lines() {
        if let Some(symref) = line.strip_prefix("ref: ") {
            let ref_path = symref.split('\t').next()?;
            if let Some(branch) = ref_path.strip_prefix("refs/heads/") {
                return Some(branch.to_string());
            }
        }
    }
    None
}

/// Parse the paired output of `git rev-list --objects --all` (sha path) piped
/// through `git cat-file --batch-check='%(objectname) %(objecttype)
/// %(objectsize)'`, filtered to blobs at or above `threshold_bytes`.
pub fn parse_batch_check_large_binaries(output: &str, threshold_bytes: u64) -> Vec<LargeBinary> {
    let mut found = Vec::new();
    for line in output.lines() {
        let mut fields = line.split_whitespace();
        let (Some(sha1), Some(kind), Some(size)) =
            (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        if kind != "blob" {
            continue;
        }
        let Ok(size_bytes) = size.parse::<u64>() else {
            continue;
        };
        if size_bytes >= threshold_bytes {
            found.push(LargeBinary {
                sha1: sha1.to_string(),
                size_mb: size_bytes / (1024 * 1024),
            });
        }
    }
    found
}
