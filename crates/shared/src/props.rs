use crate::domain::{Page, Post};

/// Read-only snapshot handed to the view layer on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProps {
    /// `None` until the first page of any query has arrived.
    pub posts: Option<Vec<Post>>,
    pub page: Option<Page>,
    pub is_loading: bool,
    pub is_error: bool,
    /// The last page came back empty; there is nothing further to load.
    pub exhausted: bool,
}

impl ListProps {
    pub fn item_count(&self) -> usize {
        self.posts.as_ref().map_or(0, Vec::len)
    }
}
