//! Pure feed state machine: `(FeedState, FeedEvent) -> FeedState`.
//!
//! Start events only take effect when no fetch is in flight, so at most one
//! request is outstanding at any time. Resolution events only take effect
//! when they answer the request currently in flight.

use shared::{
    domain::{CursorToken, Page, Post, Query},
    props::ListProps,
};

use crate::source::PageRequest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Error,
}

impl FetchStatus {
    pub fn is_loading(self) -> bool {
        self == FetchStatus::Loading
    }

    pub fn is_error(self) -> bool {
        self == FetchStatus::Error
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    /// Query whose results are currently held.
    pub query: Option<Query>,
    pub page: Option<Page>,
    pub cursor: Option<CursorToken>,
    pub posts: Option<Vec<Post>>,
    pub status: FetchStatus,
    pub in_flight: Option<PageRequest>,
    /// Last request that failed; cleared by the next success.
    pub failed: Option<PageRequest>,
    pub exhausted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    Submit(Query),
    LoadMore,
    Retry,
    Resolved {
        request: PageRequest,
        posts: Vec<Post>,
    },
    Failed {
        request: PageRequest,
    },
}

impl FeedEvent {
    pub fn label(&self) -> &'static str {
        match self {
            FeedEvent::Submit(_) => "submit",
            FeedEvent::LoadMore => "load_more",
            FeedEvent::Retry => "retry",
            FeedEvent::Resolved { .. } => "resolved",
            FeedEvent::Failed { .. } => "failed",
        }
    }
}

impl FeedState {
    pub fn item_count(&self) -> usize {
        self.posts.as_ref().map_or(0, Vec::len)
    }

    /// Request a load-more would issue right now, if any.
    pub fn next_page_request(&self) -> Option<PageRequest> {
        if self.status.is_loading() || self.exhausted {
            return None;
        }
        let query = self.query.clone()?;
        let page = self.page?;
        Some(PageRequest {
            query,
            page: page.next(),
            cursor: self.cursor.clone(),
        })
    }

    pub fn props(&self) -> ListProps {
        ListProps {
            posts: self.posts.clone(),
            page: self.page,
            is_loading: self.status.is_loading(),
            is_error: self.status.is_error(),
            exhausted: self.exhausted,
        }
    }

    fn start(mut self, request: PageRequest) -> Self {
        self.status = FetchStatus::Loading;
        self.in_flight = Some(request);
        self
    }
}

pub fn reduce(state: FeedState, event: FeedEvent) -> FeedState {
    match event {
        FeedEvent::Submit(query) => {
            if state.status.is_loading() {
                return state;
            }
            state.start(PageRequest::first(query))
        }
        FeedEvent::LoadMore => match state.next_page_request() {
            Some(request) => state.start(request),
            None => state,
        },
        FeedEvent::Retry => {
            if state.status.is_loading() {
                return state;
            }
            match state.failed.clone() {
                Some(request) => state.start(request),
                None => reduce(state, FeedEvent::LoadMore),
            }
        }
        FeedEvent::Resolved { request, posts } => {
            if state.in_flight.as_ref() != Some(&request) {
                return state;
            }
            apply_page(state, request, posts)
        }
        FeedEvent::Failed { request } => {
            if state.in_flight.as_ref() != Some(&request) {
                return state;
            }
            let mut state = state;
            state.status = FetchStatus::Error;
            state.in_flight = None;
            state.failed = Some(request);
            state
        }
    }
}

fn apply_page(mut state: FeedState, request: PageRequest, posts: Vec<Post>) -> FeedState {
    let is_first = request.page.is_first();
    if is_first {
        state.cursor = None;
        state.exhausted = false;
    }

    // An empty page ends the feed: no cursor to read, nothing further to ask for.
    match posts.last() {
        Some(last) => state.cursor = Some(last.cursor()),
        None => state.exhausted = true,
    }

    state.posts = match (is_first, state.posts.take()) {
        (false, Some(mut existing)) => {
            existing.extend(posts);
            Some(existing)
        }
        _ => Some(posts),
    };
    state.query = Some(request.query);
    state.page = Some(request.page);
    state.status = FetchStatus::Idle;
    state.in_flight = None;
    state.failed = None;
    state
}

#[cfg(test)]
#[path = "tests/feed_tests.rs"]
mod tests;
