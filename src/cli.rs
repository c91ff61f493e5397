//! Argument parsing. Two subcommands, `status` and `fix`, matching the
//! shape the teacher's own `Cli`/`Commands` pair uses — a top-level
//! `clap::Parser` struct holding global flags plus a `Subcommand` enum.

use clap::builder::styling::{AnsiColor, Color, Styles};
use clap::{Parser, Subcommand};

fn help_styles() -> Styles {
    Styles::styled()
        .header(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .usage(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .literal(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .placeholder(anstyle::Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
}

#[derive(Parser)]
#[command(name = "dualsync")]
#[command(about = "Classify and repair a repository's sync state across a Core remote and a GitHub mirror", long_about = None)]
#[command(version)]
#[command(styles = help_styles())]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Working directory to run in (defaults to the current directory)
    #[arg(short = 'C', global = true, value_name = "path", help_heading = "Global Options")]
    pub directory: Option<std::path::PathBuf>,

    /// User config file path, overriding the discovered one
    #[arg(long, global = true, value_name = "path", help_heading = "Global Options")]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify the repository's current state
    Status {
        /// Emit machine-readable JSON instead of a human table
        #[arg(long)]
        json: bool,

        /// Don't fetch from either remote before classifying
        #[arg(long)]
        skip_fetch: bool,

        /// Don't scan for large binaries or LFS usage
        #[arg(long)]
        skip_corruption: bool,

        /// Don't compute per-branch topology
        #[arg(long)]
        skip_branches: bool,
    },

    /// Suggest, and optionally apply, fixes for the repository's current state
    Fix {
        /// Apply auto-fixable fixes instead of only listing them
        #[arg(long)]
        apply: bool,

        /// With --apply, repeat detect -> suggest -> apply until nothing
        /// auto-fixable remains or --max-iterations is reached
        #[arg(long)]
        r#loop: bool,

        /// Maximum iterations for --loop
        #[arg(long, default_value_t = 5)]
        max_iterations: u32,

        /// Emit machine-readable JSON instead of a human list
        #[arg(long)]
        json: bool,

        /// Don't fetch from either remote before classifying
        #[arg(long)]
        skip_fetch: bool,

        /// Don't scan for large binaries or LFS usage
        #[arg(long)]
        skip_corruption: bool,

        /// Don't compute per-branch topology
        #[arg(long)]
        skip_branches: bool,
    },
}
