use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError,
};

use crate::{
    compose::Layer,
    conditions::ScrollCondition,
    view::{Action, BoxView, RenderedView, View},
    viewport::{Subscription, ViewportSignal},
};

/// Requests more items when the viewport nears the end of the list.
///
/// Listens to the viewport only while mounted. The callback fires once per
/// false-to-true edge of the condition; a render or scroll in which the
/// condition is false arms the next edge. Preventing duplicate fetches while
/// one is in flight is the fetch controller's job, not this trigger's.
pub struct ScrollTrigger<P> {
    inner: BoxView<P>,
    viewport: Arc<dyn ViewportSignal>,
    state: Arc<TriggerState<P>>,
    subscription: Mutex<Option<Subscription>>,
}

struct TriggerState<P> {
    condition: ScrollCondition<P>,
    on_load_more: Action,
    latest: Mutex<Option<P>>,
    armed: AtomicBool,
}

impl<P> TriggerState<P> {
    fn on_scroll(&self, viewport: &dyn ViewportSignal) {
        let metrics = viewport.current_metrics();
        let holds = {
            let latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
            match latest.as_ref() {
                Some(props) => (self.condition)(props, &metrics),
                None => false,
            }
        };

        if !holds {
            self.armed.store(true, Ordering::Release);
            return;
        }
        if self.armed.swap(false, Ordering::AcqRel) {
            tracing::debug!(
                scroll_y = metrics.scroll_y,
                document_height = metrics.document_height,
                "scroll reached load-more threshold"
            );
            self.on_load_more.invoke();
        }
    }
}

impl<P: Clone + Send + 'static> ScrollTrigger<P> {
    pub fn new(
        inner: BoxView<P>,
        viewport: Arc<dyn ViewportSignal>,
        condition: ScrollCondition<P>,
        on_load_more: Action,
    ) -> Self {
        Self {
            inner,
            viewport,
            state: Arc::new(TriggerState {
                condition,
                on_load_more,
                latest: Mutex::new(None),
                armed: AtomicBool::new(true),
            }),
            subscription: Mutex::new(None),
        }
    }

    pub fn layer(
        viewport: Arc<dyn ViewportSignal>,
        condition: ScrollCondition<P>,
        on_load_more: Action,
    ) -> Layer<P> {
        Layer::new("infinite_scroll", move |inner| {
            Box::new(ScrollTrigger::new(inner, viewport, condition, on_load_more)) as BoxView<P>
        })
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<P: Clone + Send + 'static> View<P> for ScrollTrigger<P> {
    fn render(&self, props: &P) -> RenderedView {
        let holds = (self.state.condition)(props, &self.viewport.current_metrics());
        if !holds {
            self.state.armed.store(true, Ordering::Release);
        }
        *self
            .state
            .latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(props.clone());
        self.inner.render(props)
    }

    fn mount(&self) {
        let mut slot = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            let state = Arc::clone(&self.state);
            // Weak so the listener stored inside the viewport does not keep it alive.
            let viewport = Arc::downgrade(&self.viewport);
            *slot = Some(self.viewport.subscribe(Arc::new(move || {
                if let Some(viewport) = viewport.upgrade() {
                    state.on_scroll(viewport.as_ref());
                }
            })));
            tracing::debug!("scroll trigger subscribed");
        }
        drop(slot);
        self.inner.mount();
    }

    fn unmount(&self) {
        self.inner.unmount();
        let subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
            tracing::debug!("scroll trigger unsubscribed");
        }
    }
}

#[cfg(test)]
#[path = "tests/scroll_tests.rs"]
mod tests;
