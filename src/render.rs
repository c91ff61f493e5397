//! Renders `RepositoryState`/`Fix` for a human terminal or as JSON. The core
//! crate's types already derive `Serialize` with the field names the
//! specification wants (`snake_case`, scenario IDs verbatim, `detection_time`
//! as milliseconds) — the JSON renderer here is a thin `serde_json::to_string_pretty`
//! wrapper rather than a duplicate mirror type.

use dualsync_core::styling::{
    eprintln, println, ERROR, ERROR_EMOJI, HINT, HINT_EMOJI, SUCCESS, SUCCESS_EMOJI, WARNING,
    WARNING_EMOJI,
};
use dualsync_core::{ExecutionReport, Fix, RepositoryState};

pub fn render_state_json(state: &RepositoryState) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}

pub fn render_state_human(state: &RepositoryState) {
    println!("Existence: {} — {}", state.existence.id, state.existence.description);
    println!("Sync:      {} — {}", state.sync.id, state.sync.description);
    println!("Working tree: {} — {}", state.working_tree.id, state.working_tree.description);
    println!("Corruption:   {} — {}", state.corruption.id, state.corruption.description);

    if !state.branches.is_empty() {
        println!();
        println!("Branches:");
        for branch in &state.branches {
            println!("  {:<30} {} — {}", branch.name, branch.id, branch.description);
        }
    }

    if !state.warnings.is_empty() {
        println!();
        for warning in &state.warnings {
            println!("{WARNING}{WARNING_EMOJI} {}{WARNING:#}", warning.message);
            if let Some(hint) = &warning.hint {
                println!("  {HINT}{HINT_EMOJI} {hint}{HINT:#}");
            }
        }
    }

    println!();
    println!("detected in {}ms", state.detection_time.as_millis());
}

pub fn render_fixes_json(fixes: &[Fix]) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(fixes)?);
    Ok(())
}

pub fn render_fixes_human(fixes: &[Fix]) {
    if fixes.is_empty() {
        println!("{SUCCESS}{SUCCESS_EMOJI} nothing to fix{SUCCESS:#}");
        return;
    }

    for fix in fixes {
        let marker = if fix.auto_fixable { "auto" } else { "manual" };
        println!("[{marker}] {} ({:?}) — {}", fix.scenario_id, fix.priority, fix.reason);
        println!("    {}", fix.command);
    }
}

pub fn render_report_human(report: &ExecutionReport) {
    for applied in &report.applied {
        println!("{SUCCESS}{SUCCESS_EMOJI} applied {}: {}{SUCCESS:#}", applied.fix.scenario_id, applied.fix.command);
    }
    for failed in &report.failed {
        eprintln!("{ERROR}{ERROR_EMOJI} failed {}: {}{ERROR:#}", failed.fix.scenario_id, failed.error);
    }
}

pub fn render_report_json(report: &ExecutionReport) -> serde_json::Result<()> {
    let applied: Vec<_> = report.applied.iter().map(|a| &a.fix).collect();
    let failed: Vec<_> = report
        .failed
        .iter()
        .map(|f| serde_json::json!({ "fix": &f.fix, "error": f.error.to_string() }))
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({ "applied": applied, "failed": failed }))?
    );
    Ok(())
}
