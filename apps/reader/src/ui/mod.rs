//! Terminal UI: input parsing, the composed list view, and the frame loop.

pub mod app;
pub mod input;

pub use app::ReaderApp;
