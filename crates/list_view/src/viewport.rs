//! Viewport scroll signal: an injected capability instead of ambient
//! window/document globals.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError, Weak},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportMetrics {
    pub scroll_y: u32,
    pub viewport_height: u32,
    pub document_height: u32,
}

impl ViewportMetrics {
    /// Distance between the bottom edge of the viewport and the end of the
    /// document; zero once the viewport reaches the end.
    pub fn distance_to_bottom(&self) -> u32 {
        self.document_height
            .saturating_sub(self.scroll_y.saturating_add(self.viewport_height))
    }

    fn max_scroll(&self) -> u32 {
        self.document_height.saturating_sub(self.viewport_height)
    }
}

pub type ScrollListener = Arc<dyn Fn() + Send + Sync>;

pub trait ViewportSignal: Send + Sync {
    fn subscribe(&self, on_scroll: ScrollListener) -> Subscription;

    fn current_metrics(&self) -> ViewportMetrics;
}

/// Unsubscribes exactly once: on `unsubscribe()` or on drop, whichever comes
/// first.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[derive(Default)]
struct ViewportInner {
    metrics: ViewportMetrics,
    next_id: u64,
    listeners: Vec<(u64, ScrollListener)>,
}

/// In-process viewport driven by explicit calls. Scrolling notifies every
/// listener; resizing the document does not.
#[derive(Clone, Default)]
pub struct ManualViewport {
    inner: Arc<Mutex<ViewportInner>>,
}

impl ManualViewport {
    pub fn new(viewport_height: u32) -> Self {
        let viewport = Self::default();
        viewport.with_inner(|inner| inner.metrics.viewport_height = viewport_height);
        viewport
    }

    pub fn set_document_height(&self, document_height: u32) {
        self.with_inner(|inner| {
            inner.metrics.document_height = document_height;
            inner.metrics.scroll_y = inner.metrics.scroll_y.min(inner.metrics.max_scroll());
        });
    }

    pub fn set_viewport_height(&self, viewport_height: u32) {
        self.with_inner(|inner| {
            inner.metrics.viewport_height = viewport_height;
            inner.metrics.scroll_y = inner.metrics.scroll_y.min(inner.metrics.max_scroll());
        });
    }

    /// Moves to `scroll_y` (clamped to the document) and emits a scroll event.
    pub fn scroll_to(&self, scroll_y: u32) {
        let listeners = self.with_inner(|inner| {
            inner.metrics.scroll_y = scroll_y.min(inner.metrics.max_scroll());
            inner
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect::<Vec<_>>()
        });
        // Listeners run without the lock so they may read metrics again.
        for listener in listeners {
            listener();
        }
    }

    /// Back to the top without emitting a scroll event, as when the content
    /// is replaced wholesale.
    pub fn reset_scroll(&self) {
        self.with_inner(|inner| inner.metrics.scroll_y = 0);
    }

    pub fn scroll_by(&self, delta: i64) {
        let current = i64::from(self.current_metrics().scroll_y);
        let target = (current + delta).clamp(0, i64::from(u32::MAX));
        self.scroll_to(u32::try_from(target).unwrap_or(u32::MAX));
    }

    pub fn scroll_to_bottom(&self) {
        let bottom = self.current_metrics().max_scroll();
        self.scroll_to(bottom);
    }

    pub fn listener_count(&self) -> usize {
        self.with_inner(|inner| inner.listeners.len())
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut ViewportInner) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl ViewportSignal for ManualViewport {
    fn subscribe(&self, on_scroll: ScrollListener) -> Subscription {
        let id = self.with_inner(|inner| {
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, on_scroll));
            id
        });

        let inner: Weak<Mutex<ViewportInner>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                let mut guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
                guard.listeners.retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    fn current_metrics(&self) -> ViewportMetrics {
        self.with_inner(|inner| inner.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_listener() -> (Arc<AtomicUsize>, ScrollListener) {
        let count = Arc::new(AtomicUsize::new(0));
        let listener_count = Arc::clone(&count);
        let listener: ScrollListener = Arc::new(move || {
            listener_count.fetch_add(1, Ordering::SeqCst);
        });
        (count, listener)
    }

    #[test]
    fn scroll_clamps_to_document() {
        let viewport = ManualViewport::new(10);
        viewport.set_document_height(30);

        viewport.scroll_to(100);
        let metrics = viewport.current_metrics();
        assert_eq!(metrics.scroll_y, 20);
        assert_eq!(metrics.distance_to_bottom(), 0);

        viewport.scroll_by(-25);
        assert_eq!(viewport.current_metrics().scroll_y, 0);
        assert_eq!(viewport.current_metrics().distance_to_bottom(), 20);
    }

    #[test]
    fn short_document_cannot_scroll() {
        let viewport = ManualViewport::new(24);
        viewport.set_document_height(5);
        viewport.scroll_to_bottom();
        assert_eq!(viewport.current_metrics().scroll_y, 0);
    }

    #[test]
    fn listeners_fire_until_unsubscribed() {
        let viewport = ManualViewport::new(10);
        let (count, listener) = counting_listener();

        let subscription = viewport.subscribe(listener);
        viewport.scroll_to(1);
        viewport.scroll_to(2);
        assert_eq!(count.load(Ordering::SeqCst), 2);

        subscription.unsubscribe();
        viewport.scroll_to(3);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let viewport = ManualViewport::new(10);
        let (_count, listener) = counting_listener();
        {
            let _subscription = viewport.subscribe(listener);
            assert_eq!(viewport.listener_count(), 1);
        }
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn resizing_and_reset_do_not_emit_scroll() {
        let viewport = ManualViewport::new(10);
        let (count, listener) = counting_listener();
        let _subscription = viewport.subscribe(listener);

        viewport.set_document_height(100);
        viewport.set_viewport_height(20);
        viewport.scroll_to(50);
        viewport.reset_scroll();
        assert_eq!(viewport.current_metrics().scroll_y, 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
