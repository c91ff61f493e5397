//! Semantic style constants shared by the CLI renderer and the typed errors.

use anstyle::{AnsiColor, Color, Style};

pub const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));
pub const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
pub const HINT: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
pub const SUCCESS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

pub const ERROR_EMOJI: &str = "❌";
pub const WARNING_EMOJI: &str = "🟡";
pub const HINT_EMOJI: &str = "💡";
pub const SUCCESS_EMOJI: &str = "✅";
