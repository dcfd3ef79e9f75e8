//! Default trigger policies for the list behaviors.

use std::sync::Arc;

use shared::props::ListProps;

use crate::viewport::ViewportMetrics;

pub type Condition<P> = Arc<dyn Fn(&P) -> bool + Send + Sync>;
pub type ScrollCondition<P> = Arc<dyn Fn(&P, &ViewportMetrics) -> bool + Send + Sync>;

/// Distance from the document end, in viewport units, at which the next
/// page is requested.
pub const DEFAULT_SCROLL_THRESHOLD: u32 = 250;

pub fn loading_condition() -> Condition<ListProps> {
    Arc::new(|props: &ListProps| props.is_loading)
}

/// A page has been requested, nothing is loading, and the last fetch failed.
pub fn paginated_condition() -> Condition<ListProps> {
    Arc::new(|props: &ListProps| props.page.is_some() && !props.is_loading && props.is_error)
}

pub fn infinite_scroll_condition(threshold: u32) -> ScrollCondition<ListProps> {
    Arc::new(move |props: &ListProps, metrics: &ViewportMetrics| {
        metrics.distance_to_bottom() <= threshold
            && props.item_count() > 0
            && !props.is_loading
            && !props.is_error
            && !props.exhausted
    })
}
