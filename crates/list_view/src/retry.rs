use crate::{
    compose::Layer,
    conditions::Condition,
    view::{Action, BoxView, RenderedView, View},
};

pub const DEFAULT_RETRY_MESSAGE: &str = "Something went wrong...";
pub const DEFAULT_RETRY_LABEL: &str = "Try Again";

/// Renders a retry affordance beneath the wrapped view while the condition
/// holds. The condition is injected so the same gate serves other policies.
pub struct RetryGate<P> {
    inner: BoxView<P>,
    condition: Condition<P>,
    on_retry: Action,
}

impl<P: 'static> RetryGate<P> {
    pub fn new(inner: BoxView<P>, condition: Condition<P>, on_retry: Action) -> Self {
        Self {
            inner,
            condition,
            on_retry,
        }
    }

    pub fn layer(condition: Condition<P>, on_retry: Action) -> Layer<P> {
        Layer::new("retry", move |inner| {
            Box::new(RetryGate::new(inner, condition, on_retry)) as BoxView<P>
        })
    }
}

impl<P> View<P> for RetryGate<P> {
    fn render(&self, props: &P) -> RenderedView {
        let inner = self.inner.render(props);
        if !(self.condition)(props) {
            return inner;
        }
        RenderedView::Column(vec![
            inner,
            RenderedView::RetryPrompt {
                message: DEFAULT_RETRY_MESSAGE.to_string(),
                label: DEFAULT_RETRY_LABEL.to_string(),
                action: self.on_retry.clone(),
            },
        ])
    }

    fn mount(&self) {
        self.inner.mount();
    }

    fn unmount(&self) {
        self.inner.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use crate::view::view_fn;

    struct Props {
        failed: bool,
    }

    fn gate(retries: Arc<AtomicUsize>) -> RetryGate<Props> {
        let inner = view_fn(|_props: &Props| RenderedView::Lines(vec!["items".to_string()]));
        RetryGate::new(
            Box::new(inner),
            Arc::new(|props: &Props| props.failed),
            Action::new(move || {
                retries.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[test]
    fn passes_through_when_condition_is_false() {
        let gate = gate(Arc::new(AtomicUsize::new(0)));
        let view = gate.render(&Props { failed: false });
        assert_eq!(view, RenderedView::Lines(vec!["items".to_string()]));
        assert!(view.find_action().is_none());
    }

    #[test]
    fn renders_retry_alongside_inner_and_invokes_callback() {
        let retries = Arc::new(AtomicUsize::new(0));
        let gate = gate(Arc::clone(&retries));

        let view = gate.render(&Props { failed: true });
        assert_eq!(
            view.to_lines(),
            vec![
                "items".to_string(),
                DEFAULT_RETRY_MESSAGE.to_string(),
                format!("[{DEFAULT_RETRY_LABEL}]"),
            ]
        );

        view.find_action().expect("retry affordance").invoke();
        assert_eq!(retries.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rendering_alone_never_retries() {
        let retries = Arc::new(AtomicUsize::new(0));
        let gate = gate(Arc::clone(&retries));
        for _ in 0..3 {
            gate.render(&Props { failed: true });
        }
        assert_eq!(retries.load(Ordering::SeqCst), 0);
    }
}
