use crate::{
    compose::Layer,
    conditions::Condition,
    view::{BoxView, RenderedView, View},
};

pub const DEFAULT_LOADING_TEXT: &str = "Loading ...";

/// Shows a placeholder instead of the wrapped view while the condition holds.
pub struct LoadingGate<P> {
    inner: BoxView<P>,
    condition: Condition<P>,
    placeholder: String,
}

impl<P: 'static> LoadingGate<P> {
    pub fn new(inner: BoxView<P>, condition: Condition<P>) -> Self {
        Self {
            inner,
            condition,
            placeholder: DEFAULT_LOADING_TEXT.to_string(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn layer(condition: Condition<P>) -> Layer<P> {
        Layer::new("loading", move |inner| {
            Box::new(LoadingGate::new(inner, condition)) as BoxView<P>
        })
    }
}

impl<P> View<P> for LoadingGate<P> {
    fn render(&self, props: &P) -> RenderedView {
        if (self.condition)(props) {
            RenderedView::Placeholder(self.placeholder.clone())
        } else {
            self.inner.render(props)
        }
    }

    fn mount(&self) {
        self.inner.mount();
    }

    fn unmount(&self) {
        self.inner.unmount();
    }
}
