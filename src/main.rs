mod cli;
mod config;
mod render;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dualsync_core::git::CliGitAdapter;
use dualsync_core::{Classifier, DetectionOptions, Executor};
use log::{debug, warn};

use cli::{Cli, Commands};

/// Loading configuration is the one place `main` reaches for `anyhow`: the
/// `config` crate's `ConfigError` doesn't say *which* file or key it choked
/// on, and `.context(...)` is cheaper than a bespoke wrapper type for a path
/// that runs exactly once per process.
fn load_settings(override_path: Option<&std::path::Path>) -> anyhow::Result<config::Settings> {
    config::load_settings_from(override_path).context("failed to load dualsync configuration")
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::new().filter("DUALSYNC_LOG").filter_or("RUST_LOG", "warn"),
    )
    .init();

    let cli = Cli::parse();
    let settings = match load_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let root = cli.directory.unwrap_or_else(|| std::path::PathBuf::from("."));
    let adapter = CliGitAdapter::with_timeouts(
        root,
        std::time::Duration::from_secs(settings.remote_check_timeout_secs),
        std::time::Duration::from_secs(settings.fetch_timeout_secs),
    );

    match cli.command {
        Commands::Status {
            json,
            skip_fetch,
            skip_corruption,
            skip_branches,
        } => run_status(&adapter, &settings, json, skip_fetch, skip_corruption, skip_branches),
        Commands::Fix {
            apply,
            r#loop,
            max_iterations,
            json,
            skip_fetch,
            skip_corruption,
            skip_branches,
        } => run_fix(
            &adapter,
            &settings,
            apply,
            r#loop,
            max_iterations,
            json,
            skip_fetch,
            skip_corruption,
            skip_branches,
        ),
    }
}

fn detection_options(
    settings: &config::Settings,
    skip_fetch: bool,
    skip_corruption: bool,
    skip_branches: bool,
) -> DetectionOptions {
    DetectionOptions {
        skip_fetch: skip_fetch || settings.skip_fetch,
        skip_corruption,
        skip_branches,
        max_branches: settings.max_branches,
        binary_size_threshold_mb: settings.binary_size_threshold_mb,
        fetch_timeout: std::time::Duration::from_secs(settings.fetch_timeout_secs),
        remote_check_timeout: std::time::Duration::from_secs(settings.remote_check_timeout_secs),
    }
}

fn run_status(
    adapter: &CliGitAdapter,
    settings: &config::Settings,
    json: bool,
    skip_fetch: bool,
    skip_corruption: bool,
    skip_branches: bool,
) -> ExitCode {
    let options = detection_options(settings, skip_fetch, skip_corruption, skip_branches);
    let classifier = Classifier::new(adapter, settings.core_remote.as_str(), settings.github_remote.as_str(), options);

    debug!("running detect()");
    let state = match classifier.detect() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("classification failed: {e}");
            return ExitCode::from(1);
        }
    };

    for warning in &state.warnings {
        warn!("{}", warning.message);
    }

    let render_result = if json {
        render::render_state_json(&state)
    } else {
        render::render_state_human(&state);
        Ok(())
    };
    if let Err(e) = render_result {
        eprintln!("failed to render state: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

#[allow(clippy::too_many_arguments)]
fn run_fix(
    adapter: &CliGitAdapter,
    settings: &config::Settings,
    apply: bool,
    looping: bool,
    max_iterations: u32,
    json: bool,
    skip_fetch: bool,
    skip_corruption: bool,
    skip_branches: bool,
) -> ExitCode {
    let options = detection_options(settings, skip_fetch, skip_corruption, skip_branches);
    let classifier = Classifier::new(adapter, settings.core_remote.as_str(), settings.github_remote.as_str(), options);

    if !apply {
        let state = match classifier.detect() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("classification failed: {e}");
                return ExitCode::from(1);
            }
        };
        let fixes = dualsync_core::suggest_fixes(&state);
        let render_result = if json {
            render::render_fixes_json(&fixes)
        } else {
            render::render_fixes_human(&fixes);
            Ok(())
        };
        if let Err(e) = render_result {
            eprintln!("failed to render fixes: {e}");
            return ExitCode::from(1);
        }
        return ExitCode::SUCCESS;
    }

    let executor = Executor::new(adapter);
    let iterations = if looping { max_iterations.max(1) } else { 1 };
    let mut any_failed = false;

    for iteration in 1..=iterations {
        debug!("fix iteration {iteration}/{iterations}");
        let state = match classifier.detect() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("classification failed: {e}");
                return ExitCode::from(1);
            }
        };

        let fixes = dualsync_core::suggest_fixes(&state);
        let auto_fixable: Vec<_> = fixes.into_iter().filter(|f| f.auto_fixable).collect();
        let auto_fixable = dedupe_by_operation(auto_fixable);

        if auto_fixable.is_empty() {
            debug!("nothing auto-fixable remains, stopping");
            break;
        }

        let report = executor.execute_all(&auto_fixable, &state);
        any_failed |= !report.all_succeeded();

        if json {
            if let Err(e) = render::render_report_json(&report) {
                eprintln!("failed to render execution report: {e}");
                return ExitCode::from(1);
            }
        } else {
            render::render_report_human(&report);
        }

        if !looping {
            break;
        }
    }

    if any_failed {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

/// Two suggested fixes with `Operation::eq` equal would run the identical
/// git command twice in one apply pass; keep only the first.
fn dedupe_by_operation(fixes: Vec<dualsync_core::Fix>) -> Vec<dualsync_core::Fix> {
    let mut seen = Vec::new();
    let mut out = Vec::new();
    for fix in fixes {
        match &fix.operation {
            Some(op) if seen.contains(op) => continue,
            Some(op) => seen.push(op.clone()),
            None => {}
        }
        out.push(fix);
    }
    out
}
