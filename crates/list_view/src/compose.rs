//! Ordered application of behavior layers around a base view.

use shared::props::ListProps;

use crate::view::{BoxView, View};

/// One behavior waiting to be wrapped around an inner view.
pub struct Layer<P> {
    name: &'static str,
    wrap: Box<dyn FnOnce(BoxView<P>) -> BoxView<P> + Send>,
}

impl<P: 'static> Layer<P> {
    pub fn new(
        name: &'static str,
        wrap: impl FnOnce(BoxView<P>) -> BoxView<P> + Send + 'static,
    ) -> Self {
        Self {
            name,
            wrap: Box::new(wrap),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(self, inner: BoxView<P>) -> BoxView<P> {
        (self.wrap)(inner)
    }
}

/// Wraps `base` in `layers`, first layer outermost.
pub fn compose<P: 'static>(base: impl View<P> + 'static, layers: Vec<Layer<P>>) -> BoxView<P> {
    let names: Vec<&'static str> = layers.iter().map(Layer::name).collect();
    tracing::debug!(layers = ?names, "composing view");
    layers
        .into_iter()
        .rev()
        .fold(Box::new(base) as BoxView<P>, |inner, layer| layer.apply(inner))
}

/// Loading gate outermost, retry gate next, scroll trigger closest to the list.
pub fn compose_list_view(
    base: impl View<ListProps> + 'static,
    loading: Layer<ListProps>,
    retry: Layer<ListProps>,
    scroll: Layer<ListProps>,
) -> BoxView<ListProps> {
    compose(base, vec![loading, retry, scroll])
}

#[cfg(test)]
#[path = "tests/compose_tests.rs"]
mod tests;
