//! List rendering behaviors: a loading gate, a retry gate and an infinite
//! scroll trigger, each a wrapper over an inner view, plus the composer that
//! stacks them in a fixed order around a plain list.

pub mod compose;
pub mod conditions;
pub mod loading;
pub mod post_list;
pub mod retry;
pub mod scroll;
pub mod view;
pub mod viewport;

pub use compose::{compose, compose_list_view, Layer};
pub use loading::LoadingGate;
pub use post_list::PostListView;
pub use retry::RetryGate;
pub use scroll::ScrollTrigger;
pub use view::{view_fn, Action, BoxView, RenderedView, View};
pub use viewport::{ManualViewport, Subscription, ViewportMetrics, ViewportSignal};
