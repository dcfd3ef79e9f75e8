//! Events the backend worker reports back to the terminal UI.

use shared::props::ListProps;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Info(String),
    /// New feed snapshot; one per state transition.
    Feed(ListProps),
    BackendFailed(String),
}
