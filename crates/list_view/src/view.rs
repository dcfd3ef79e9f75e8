use std::{fmt, sync::Arc};

/// Cloneable handle to a side-effecting callback carried inside a rendered
/// view (a button press, a load-more request).
#[derive(Clone)]
pub struct Action(Arc<dyn Fn() + Send + Sync>);

impl Action {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn invoke(&self) {
        (self.0)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedView {
    Empty,
    Placeholder(String),
    Lines(Vec<String>),
    RetryPrompt {
        message: String,
        label: String,
        action: Action,
    },
    Column(Vec<RenderedView>),
}

impl RenderedView {
    pub fn to_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_lines(&mut out);
        out
    }

    fn collect_lines(&self, out: &mut Vec<String>) {
        match self {
            RenderedView::Empty => {}
            RenderedView::Placeholder(text) => out.push(text.clone()),
            RenderedView::Lines(lines) => out.extend(lines.iter().cloned()),
            RenderedView::RetryPrompt { message, label, .. } => {
                out.push(message.clone());
                out.push(format!("[{label}]"));
            }
            RenderedView::Column(children) => {
                for child in children {
                    child.collect_lines(out);
                }
            }
        }
    }

    /// First retry affordance in the tree, depth first.
    pub fn find_action(&self) -> Option<&Action> {
        match self {
            RenderedView::RetryPrompt { action, .. } => Some(action),
            RenderedView::Column(children) => children.iter().find_map(RenderedView::find_action),
            _ => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderedView::Placeholder(_))
    }
}

/// Something that turns props into a rendered view.
///
/// `mount` and `unmount` bracket the period during which the view is live;
/// wrappers must forward both to whatever they wrap.
pub trait View<P>: Send + Sync {
    fn render(&self, props: &P) -> RenderedView;

    fn mount(&self) {}

    fn unmount(&self) {}
}

pub type BoxView<P> = Box<dyn View<P>>;

impl<P, V: View<P> + ?Sized> View<P> for Box<V> {
    fn render(&self, props: &P) -> RenderedView {
        (**self).render(props)
    }

    fn mount(&self) {
        (**self).mount()
    }

    fn unmount(&self) {
        (**self).unmount()
    }
}

/// A stateless view backed by a plain render function.
pub struct FnView<F>(F);

pub fn view_fn<P, F>(f: F) -> FnView<F>
where
    F: Fn(&P) -> RenderedView + Send + Sync,
{
    FnView(f)
}

impl<P, F> View<P> for FnView<F>
where
    F: Fn(&P) -> RenderedView + Send + Sync,
{
    fn render(&self, props: &P) -> RenderedView {
        (self.0)(props)
    }
}
