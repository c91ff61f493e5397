//! Terminal styling, consolidated the way the CLI's original author kept it:
//! one small module wrapping the anstyle ecosystem rather than scattering
//! ANSI codes through the renderer.
//!
//! - **stdout**: all of dualsync's own output (status tables, fix lists, JSON)
//! - **stderr**: reserved for anything the underlying git subprocess writes
//!   directly (it never does today, since the adapter always captures output,
//!   but the convention is kept for when a future adapter streams it)

mod constants;

// Re-exports from anstream (auto-detecting color support)
pub use anstream::{eprintln, println};

// Re-export from anstyle for composition in error/render code
pub use anstyle::Style as AnstyleStyle;

pub use constants::*;
