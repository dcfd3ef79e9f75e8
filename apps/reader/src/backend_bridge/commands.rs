//! Commands queued from the UI (and from view callbacks) to the backend worker.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedCommand {
    Submit { text: String },
    LoadMore,
    Retry,
    Shutdown,
}

impl FeedCommand {
    pub fn name(&self) -> &'static str {
        match self {
            FeedCommand::Submit { .. } => "submit",
            FeedCommand::LoadMore => "load_more",
            FeedCommand::Retry => "retry",
            FeedCommand::Shutdown => "shutdown",
        }
    }
}
