//! Owns the feed state and the single outstanding upstream request.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::{
    domain::{Post, Query},
    error::FetchError,
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    feed::{reduce, FeedEvent, FeedState},
    source::{ListingSource, PageRequest},
};

pub struct FetchController {
    source: Arc<dyn ListingSource>,
    state: watch::Sender<FeedState>,
    mounted: AtomicBool,
}

impl FetchController {
    pub fn new(source: Arc<dyn ListingSource>) -> Arc<Self> {
        let (state, _) = watch::channel(FeedState::default());
        Arc::new(Self {
            source,
            state,
            mounted: AtomicBool::new(true),
        })
    }

    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Starts a new search. Blank input and calls made while a fetch is in
    /// flight are ignored.
    pub fn submit(self: &Arc<Self>, raw: &str) -> Option<JoinHandle<()>> {
        let Some(query) = Query::parse(raw) else {
            debug!("ignoring submit with blank query");
            return None;
        };
        self.trigger(FeedEvent::Submit(query))
    }

    pub fn load_more(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        self.trigger(FeedEvent::LoadMore)
    }

    pub fn retry(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        self.trigger(FeedEvent::Retry)
    }

    /// Tears the controller down. Later triggers are ignored and a response
    /// still in flight is dropped without touching the state.
    pub fn unmount(&self) {
        // Taken under the state lock so no resolution can land after this returns.
        self.state.send_if_modified(|_| {
            self.mounted.store(false, Ordering::Release);
            false
        });
        debug!("fetch controller unmounted");
    }

    fn trigger(self: &Arc<Self>, event: FeedEvent) -> Option<JoinHandle<()>> {
        let label = event.label();
        let mut issued: Option<PageRequest> = None;

        self.state.send_if_modified(|state| {
            if !self.mounted.load(Ordering::Acquire) {
                return false;
            }
            let before = state.in_flight.clone();
            let next = reduce(std::mem::take(state), event);
            let started = next.in_flight.is_some() && next.in_flight != before;
            if started {
                issued = next.in_flight.clone();
            }
            *state = next;
            started
        });

        let Some(request) = issued else {
            debug!(trigger = label, "trigger ignored; fetch in flight or nothing to load");
            return None;
        };

        info!(
            trigger = label,
            query = %request.query,
            page = request.page.0,
            cursor = request.cursor.as_ref().map(|c| c.as_str()).unwrap_or(""),
            "issuing listing fetch"
        );

        let controller = Arc::clone(self);
        Some(tokio::spawn(async move {
            let outcome = controller.source.fetch_page(&request).await;
            controller.resolve(request, outcome);
        }))
    }

    fn resolve(&self, request: PageRequest, outcome: Result<Vec<Post>, FetchError>) {
        let page = request.page.0;
        let expected = request.clone();
        let event = match outcome {
            Ok(posts) => {
                info!(page, count = posts.len(), "listing page received");
                FeedEvent::Resolved { request, posts }
            }
            Err(err) => {
                warn!(page, cause = err.cause_label(), error = %err, "listing fetch failed");
                FeedEvent::Failed { request }
            }
        };

        let mut stale = false;
        let applied = self.state.send_if_modified(|state| {
            if !self.mounted.load(Ordering::Acquire) {
                return false;
            }
            if state.in_flight.as_ref() != Some(&expected) {
                stale = true;
                return false;
            }
            *state = reduce(std::mem::take(state), event);
            true
        });
        if stale {
            debug!(page, "discarding stale listing response");
        } else if !applied {
            debug!(page, "discarding listing response after unmount");
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
