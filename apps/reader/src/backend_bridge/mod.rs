//! Bridge between the terminal UI and the backend worker that owns the feed.

pub mod commands;
pub mod runtime;
