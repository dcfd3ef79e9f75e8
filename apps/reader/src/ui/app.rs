use std::{
    io::{self, Write},
    sync::Arc,
};

use crossbeam_channel::{select, Receiver, Sender};
use list_view::{
    compose_list_view,
    conditions::{infinite_scroll_condition, loading_condition, paginated_condition},
    BoxView, LoadingGate, ManualViewport, PostListView, RenderedView, RetryGate, ScrollTrigger,
    View, ViewportSignal,
};
use shared::props::ListProps;

use crate::{
    backend_bridge::commands::FeedCommand,
    config::ReaderSettings,
    controller::{
        events::UiEvent,
        orchestration::{command_action, dispatch_feed_command, DispatchOutcome},
    },
    ui::input::{parse_input, InputCommand, HELP_TEXT},
};

pub const PROMPT_TEXT: &str = "Enter a subreddit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal shell around the composed list view. Holds the latest feed
/// snapshot and re-renders whenever it or the viewport changes.
pub struct ReaderApp {
    cmd_tx: Sender<FeedCommand>,
    viewport: ManualViewport,
    view: BoxView<ListProps>,
    props: ListProps,
    last_render: RenderedView,
    scroll_step: u32,
    query: Option<String>,
    status: String,
}

impl ReaderApp {
    pub fn new(settings: &ReaderSettings, cmd_tx: Sender<FeedCommand>) -> Self {
        let viewport = ManualViewport::new(settings.viewport_rows);
        let view = compose_list_view(
            PostListView,
            LoadingGate::layer(loading_condition()),
            RetryGate::layer(
                paginated_condition(),
                command_action(&cmd_tx, FeedCommand::Retry),
            ),
            ScrollTrigger::layer(
                Arc::new(viewport.clone()) as Arc<dyn ViewportSignal>,
                infinite_scroll_condition(settings.scroll_threshold),
                command_action(&cmd_tx, FeedCommand::LoadMore),
            ),
        );
        let mut app = Self {
            cmd_tx,
            viewport,
            view,
            props: ListProps::default(),
            last_render: RenderedView::Empty,
            scroll_step: settings.scroll_step.max(1),
            query: None,
            status: HELP_TEXT.to_string(),
        };
        app.rerender();
        app
    }

    pub fn mount(&self) {
        self.view.mount();
    }

    pub fn unmount(&self) {
        self.view.unmount();
    }

    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::BackendFailed(message) => {
                tracing::error!("{message}");
                self.status = message;
            }
            UiEvent::Feed(props) => {
                // A fresh first page starts at the top.
                if props.page.is_some_and(|page| page.is_first()) && props.page != self.props.page
                {
                    self.viewport.reset_scroll();
                }
                self.props = props;
                self.rerender();
            }
        }
    }

    pub fn handle_input(&mut self, input: InputCommand) -> Flow {
        match input {
            InputCommand::Submit(text) => {
                if text.trim().is_empty() {
                    self.status = PROMPT_TEXT.to_string();
                } else {
                    self.query = Some(text.clone());
                    self.viewport.reset_scroll();
                    self.dispatch(FeedCommand::Submit { text });
                }
            }
            InputCommand::ScrollDown => self.viewport.scroll_by(i64::from(self.scroll_step)),
            InputCommand::ScrollUp => self.viewport.scroll_by(-i64::from(self.scroll_step)),
            InputCommand::Bottom => self.viewport.scroll_to_bottom(),
            InputCommand::LoadMore => self.dispatch(FeedCommand::LoadMore),
            InputCommand::Retry => match self.last_render.find_action() {
                Some(action) => action.invoke(),
                None => self.status = "Nothing to retry".to_string(),
            },
            InputCommand::Help => self.status = HELP_TEXT.to_string(),
            InputCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn dispatch(&mut self, cmd: FeedCommand) {
        match dispatch_feed_command(&self.cmd_tx, cmd) {
            DispatchOutcome::Queued => {}
            DispatchOutcome::QueueFull => {
                self.status = "Command queue is full; try again".to_string();
            }
            DispatchOutcome::Disconnected => {
                self.status = "Backend worker disconnected".to_string();
            }
        }
    }

    fn rerender(&mut self) {
        self.last_render = self.view.render(&self.props);
        // The loading placeholder stands in for the list; keep the list's
        // height so the scroll position survives an append.
        if self.last_render.is_placeholder() {
            return;
        }
        let lines = u32::try_from(self.last_render.to_lines().len()).unwrap_or(u32::MAX);
        if lines != self.viewport.current_metrics().document_height {
            self.viewport.set_document_height(lines);
            // Conditions read the viewport, so evaluate them again at the new height.
            self.last_render = self.view.render(&self.props);
        }
    }

    /// Header, the visible slice of the list, and a status line.
    pub fn frame(&self) -> Vec<String> {
        let metrics = self.viewport.current_metrics();
        let header = match &self.query {
            Some(query) => format!("{PROMPT_TEXT}: {query}"),
            None => format!("{PROMPT_TEXT}:"),
        };
        let mut frame = vec![header];
        let skip = if self.last_render.is_placeholder() {
            0
        } else {
            metrics.scroll_y as usize
        };
        frame.extend(
            self.last_render
                .to_lines()
                .into_iter()
                .skip(skip)
                .take(metrics.viewport_height as usize),
        );
        let page = self
            .props
            .page
            .map(|page| page.to_string())
            .unwrap_or_else(|| "-".to_string());
        let fetch = if self.props.is_loading {
            "loading"
        } else if self.props.is_error {
            "last fetch failed"
        } else if self.props.exhausted {
            "end of listing"
        } else {
            "idle"
        };
        frame.push(format!(
            "-- page {page} | {} items | {fetch} | rows {}-{} of {} | {}",
            self.props.item_count(),
            metrics.scroll_y.saturating_add(1).min(metrics.document_height),
            metrics
                .scroll_y
                .saturating_add(metrics.viewport_height)
                .min(metrics.document_height),
            metrics.document_height,
            self.status
        ));
        frame
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        for line in self.frame() {
            writeln!(out, "{line}")?;
        }
        write!(out, "> ")?;
        out.flush()
    }
}

/// Drives the app until `q`, end of input, or the backend going away.
pub fn run(
    mut app: ReaderApp,
    ui_rx: Receiver<UiEvent>,
    input_rx: Receiver<String>,
    out: &mut impl Write,
) -> io::Result<()> {
    app.mount();
    app.draw(out)?;

    loop {
        select! {
            recv(ui_rx) -> event => match event {
                Ok(event) => app.apply_event(event),
                Err(_) => {
                    tracing::warn!("backend event channel closed");
                    break;
                }
            },
            recv(input_rx) -> line => match line {
                Ok(line) => {
                    if app.handle_input(parse_input(&line)) == Flow::Quit {
                        break;
                    }
                }
                Err(_) => break,
            },
        }
        app.draw(out)?;
    }

    app.unmount();
    app.dispatch(FeedCommand::Shutdown);
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/app_tests.rs"]
mod tests;
