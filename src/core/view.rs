//! Interaction views - widgets attached to a message plus a single outcome.
//!
//! A view belongs to one user, owns its widgets and resolves exactly once:
//! either a widget produces a [`TerminalValue`] or the timeout fires. Widgets
//! never reach back into the view. The transport turns Discord interactions
//! into [`ViewEvent`]s, [`InteractionView::handle`] applies them and returns a
//! [`ViewUpdate`] describing what to send back.

use crate::{
    core::{
        button::{ActionButton, ButtonStyle},
        embed::EmbedContent,
        select::{OptionEntry, SelectionWidget},
    },
    errors::{Error, Result},
};
use futures::{Stream, StreamExt};
use std::{fmt, future::Future, time::Duration};
use tracing::debug;

/// Component id of the abort button.
pub const ABORT_BUTTON_ID: &str = "abort";
/// Component id of topic selects.
pub const TOPIC_SELECT_ID: &str = "select_topic";
/// Component id of settings selects.
pub const SETTINGS_SELECT_ID: &str = "select_settings";

/// The single outcome of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalValue {
    /// Identity of the widget that resolved the view
    Widget(String),
    /// Nobody interacted before the timeout
    Timeout,
}

impl TerminalValue {
    /// String form, `"timeout"` for timeouts.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Widget(id) => id,
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for TerminalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A widget attached to a view.
#[derive(Debug)]
pub enum Widget {
    /// Select menu
    Select(SelectionWidget),
    /// Button
    Button(ActionButton),
}

impl Widget {
    /// Component id of the widget.
    #[must_use]
    pub fn custom_id(&self) -> &str {
        match self {
            Self::Select(select) => select.custom_id(),
            Self::Button(button) => button.custom_id(),
        }
    }

    /// Current render of the widget.
    #[must_use]
    pub fn layout(&self) -> WidgetLayout {
        match self {
            Self::Select(select) => WidgetLayout::Select {
                custom_id: select.custom_id().to_string(),
                placeholder: select.placeholder().to_string(),
                options: select.render_current(),
            },
            Self::Button(button) => WidgetLayout::Button {
                custom_id: button.custom_id().to_string(),
                label: button.label().to_string(),
                style: button.style(),
            },
        }
    }
}

impl From<SelectionWidget> for Widget {
    fn from(select: SelectionWidget) -> Self {
        Self::Select(select)
    }
}

impl From<ActionButton> for Widget {
    fn from(button: ActionButton) -> Self {
        Self::Button(button)
    }
}

/// What the transport needs to draw a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetLayout {
    /// Select menu
    Select {
        /// Component id
        custom_id: String,
        /// Text shown while nothing is picked
        placeholder: String,
        /// Options with the active one marked
        options: Vec<OptionEntry>,
    },
    /// Button
    Button {
        /// Component id
        custom_id: String,
        /// Caption
        label: String,
        /// Style
        style: ButtonStyle,
    },
}

/// An interaction with one of the view's widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// A select option was picked
    Selected {
        /// Component id of the select
        custom_id: String,
        /// Picked label
        label: String,
    },
    /// A button was pressed
    Activated {
        /// Component id of the button
        custom_id: String,
    },
}

impl ViewEvent {
    /// Component id the event targets.
    #[must_use]
    pub fn custom_id(&self) -> &str {
        match self {
            Self::Selected { custom_id, .. } | Self::Activated { custom_id } => custom_id,
        }
    }
}

/// What to send back for a handled event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    /// The user does not own the view; reply with a private notice
    Rejected,
    /// The view already resolved; acknowledge and do nothing
    Ignored,
    /// Replace the message content and redraw the widgets
    Refresh {
        /// New message content
        content: EmbedContent,
        /// Redrawn widgets
        layout: Vec<WidgetLayout>,
    },
    /// The view resolved to the given value
    Resolved(TerminalValue),
}

/// A set of widgets owned by one user, resolving once.
#[derive(Debug)]
pub struct InteractionView {
    authorized_user: u64,
    timeout: Duration,
    terminal: Option<TerminalValue>,
    widgets: Vec<Widget>,
}

impl InteractionView {
    /// Creates an empty view for `authorized_user`.
    #[must_use]
    pub const fn new(authorized_user: u64, timeout: Duration) -> Self {
        Self {
            authorized_user,
            timeout,
            terminal: None,
            widgets: Vec::new(),
        }
    }

    /// View with a single grey "Abort" button.
    ///
    /// Resolves to `"abort"` when pressed and `"timeout"` otherwise.
    #[must_use]
    pub fn abort(authorized_user: u64, timeout: Duration) -> Self {
        Self::new(authorized_user, timeout).with_widget(ActionButton::new(
            ABORT_BUTTON_ID,
            "Abort",
            ButtonStyle::Secondary,
        ))
    }

    /// Appends a widget.
    #[must_use]
    pub fn with_widget(mut self, widget: impl Into<Widget>) -> Self {
        self.widgets.push(widget.into());
        self
    }

    /// The only user allowed to interact.
    #[must_use]
    pub const fn authorized_user(&self) -> u64 {
        self.authorized_user
    }

    /// Inactivity timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Outcome, if the view has resolved.
    #[must_use]
    pub const fn terminal_value(&self) -> Option<&TerminalValue> {
        self.terminal.as_ref()
    }

    /// Whether the view has resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.terminal.is_some()
    }

    /// Attached widgets in order.
    #[must_use]
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Current render of all widgets.
    #[must_use]
    pub fn layout(&self) -> Vec<WidgetLayout> {
        self.widgets.iter().map(Widget::layout).collect()
    }

    /// Whether `user` may interact with this view.
    #[must_use]
    pub const fn authorize(&self, user: u64) -> bool {
        user == self.authorized_user
    }

    /// Sets the outcome unless one is already set. Returns whether it was applied.
    pub fn resolve(&mut self, value: TerminalValue) -> bool {
        if self.terminal.is_some() {
            debug!("View already resolved, ignoring {}", value);
            return false;
        }
        self.terminal = Some(value);
        true
    }

    /// Resolves to [`TerminalValue::Timeout`] unless already resolved.
    pub fn on_timeout(&mut self) -> bool {
        self.resolve(TerminalValue::Timeout)
    }

    /// Applies an interaction by `user`.
    ///
    /// Unauthorized users get [`ViewUpdate::Rejected`] and nothing changes.
    /// Events after resolution are absorbed as [`ViewUpdate::Ignored`].
    ///
    /// # Errors
    /// [`Error::UnknownWidget`] if no widget of the right kind has the event's
    /// id, [`Error::InvalidSelection`] if a select reports a label it doesn't have.
    pub fn handle(&mut self, user: u64, event: ViewEvent) -> Result<ViewUpdate> {
        if !self.authorize(user) {
            debug!(user, owner = self.authorized_user, "Rejected view interaction");
            return Ok(ViewUpdate::Rejected);
        }
        if self.is_resolved() {
            return Ok(ViewUpdate::Ignored);
        }

        let widget = self
            .widgets
            .iter_mut()
            .find(|widget| widget.custom_id() == event.custom_id());

        let outcome = match (widget, &event) {
            (Some(Widget::Select(select)), ViewEvent::Selected { label, .. }) => {
                Handled::Selected(select.on_select(label)?.content)
            }
            (Some(Widget::Button(button)), ViewEvent::Activated { .. }) => {
                Handled::Pressed(button.activate())
            }
            _ => {
                return Err(Error::UnknownWidget {
                    custom_id: event.custom_id().to_string(),
                });
            }
        };

        Ok(match outcome {
            Handled::Selected(content) => ViewUpdate::Refresh {
                content,
                layout: self.layout(),
            },
            Handled::Pressed(value) => {
                self.resolve(value.clone());
                ViewUpdate::Resolved(value)
            }
        })
    }
}

enum Handled {
    Selected(EmbedContent),
    Pressed(TerminalValue),
}

/// Topic select with the usual id and placeholder. Add topics with
/// [`SelectionWidget::option`].
#[must_use]
pub fn topic_select(active_topic: &str) -> SelectionWidget {
    SelectionWidget::new(TOPIC_SELECT_ID, "Choose topic ...", active_topic)
}

/// Settings select with the usual id and placeholder.
#[must_use]
pub fn settings_select(active_setting: &str) -> SelectionWidget {
    SelectionWidget::new(SETTINGS_SELECT_ID, "Choose settings ...", active_setting)
}

/// An interaction delivered to [`drive`].
#[derive(Debug)]
pub struct Incoming<H> {
    /// Interacting user
    pub user: u64,
    /// What they did
    pub event: ViewEvent,
    /// Transport handle used to answer this interaction
    pub handle: H,
}

/// Runs a view until it resolves.
///
/// Each wait for the next event is bounded by the view's timeout; expiry or the
/// end of `events` resolves the view to [`TerminalValue::Timeout`]. Every
/// handled event is answered through `respond` before waiting again.
pub async fn drive<S, H, R, Fut>(
    view: &mut InteractionView,
    mut events: S,
    mut respond: R,
) -> Result<TerminalValue>
where
    S: Stream<Item = Incoming<H>> + Unpin,
    R: FnMut(H, ViewUpdate) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    loop {
        if let Some(value) = view.terminal_value() {
            return Ok(value.clone());
        }

        match tokio::time::timeout(view.timeout(), events.next()).await {
            Ok(Some(incoming)) => {
                let update = view.handle(incoming.user, incoming.event)?;
                respond(incoming.handle, update).await?;
            }
            Ok(None) => {
                debug!("View event stream closed before resolution");
                view.on_timeout();
            }
            Err(_) => {
                debug!("View timed out after {:?}", view.timeout());
                view.on_timeout();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use futures::channel::mpsc;
    use tokio::time::Instant;

    const OWNER: u64 = 1;
    const STRANGER: u64 = 2;

    fn topic_view() -> InteractionView {
        let select = topic_select("A")
            .option("A", || EmbedContent::new().title("A"))
            .option("B", || EmbedContent::new().title("B"));
        InteractionView::new(OWNER, Duration::from_secs(60)).with_widget(select)
    }

    fn select(label: &str) -> ViewEvent {
        ViewEvent::Selected {
            custom_id: TOPIC_SELECT_ID.to_string(),
            label: label.to_string(),
        }
    }

    fn press_abort() -> ViewEvent {
        ViewEvent::Activated {
            custom_id: ABORT_BUTTON_ID.to_string(),
        }
    }

    fn active_label(view: &InteractionView) -> &str {
        match &view.widgets()[0] {
            Widget::Select(select) => select.active_label(),
            Widget::Button(_) => panic!("expected a select"),
        }
    }

    #[test]
    fn test_authorize_only_owner() {
        let view = topic_view();
        assert!(view.authorize(OWNER));
        assert!(!view.authorize(STRANGER));
        assert!(!view.authorize(0));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut view = InteractionView::abort(OWNER, Duration::from_secs(60));

        assert!(view.resolve(TerminalValue::Widget("first".into())));
        assert!(!view.resolve(TerminalValue::Widget("second".into())));
        assert!(!view.on_timeout());
        assert_eq!(view.terminal_value().unwrap().as_str(), "first");
    }

    #[test]
    fn test_timeout_then_button_is_ignored() {
        let mut view = InteractionView::abort(OWNER, Duration::from_secs(60));

        assert!(view.on_timeout());
        let update = view.handle(OWNER, press_abort()).unwrap();

        assert_eq!(update, ViewUpdate::Ignored);
        assert_eq!(view.terminal_value(), Some(&TerminalValue::Timeout));
        assert_eq!(view.terminal_value().unwrap().to_string(), "timeout");
    }

    #[test]
    fn test_stranger_is_rejected_without_mutation() {
        let mut view = topic_view();

        assert_eq!(view.handle(STRANGER, select("B")).unwrap(), ViewUpdate::Rejected);
        assert_eq!(active_label(&view), "A");

        let mut abort = InteractionView::abort(OWNER, Duration::from_secs(60));
        assert_eq!(abort.handle(STRANGER, press_abort()).unwrap(), ViewUpdate::Rejected);
        assert!(!abort.is_resolved());
    }

    #[test]
    fn test_selection_refreshes_content_and_layout() {
        let mut view = topic_view();

        let update = view.handle(OWNER, select("B")).unwrap();

        let ViewUpdate::Refresh { content, layout } = update else {
            panic!("expected a refresh, got {update:?}");
        };
        assert_eq!(content, EmbedContent::new().title("B"));
        assert_eq!(active_label(&view), "B");
        assert!(!view.is_resolved());
        let [WidgetLayout::Select { options, .. }] = layout.as_slice() else {
            panic!("expected one select layout");
        };
        assert!(options.iter().any(|o| o.label == "B" && o.active));
        assert!(options.iter().any(|o| o.label == "A" && !o.active));
    }

    #[test]
    fn test_invalid_selection_fails_loudly() {
        let mut view = topic_view();

        let result = view.handle(OWNER, select("C"));

        assert!(matches!(result, Err(Error::InvalidSelection { .. })));
        assert_eq!(active_label(&view), "A");
    }

    #[test]
    fn test_unknown_widget() {
        let mut view = topic_view();

        let result = view.handle(OWNER, press_abort());

        assert!(matches!(result, Err(Error::UnknownWidget { ref custom_id }) if custom_id == "abort"));
    }

    #[test]
    fn test_button_resolves_view() {
        let mut view = InteractionView::abort(OWNER, Duration::from_secs(60));

        let update = view.handle(OWNER, press_abort()).unwrap();

        assert_eq!(update, ViewUpdate::Resolved(TerminalValue::Widget("abort".into())));
        assert_eq!(view.handle(OWNER, press_abort()).unwrap(), ViewUpdate::Ignored);
    }

    #[test]
    fn test_prebuilt_selects() {
        assert_eq!(topic_select("x").placeholder(), "Choose topic ...");
        assert_eq!(settings_select("x").custom_id(), SETTINGS_SELECT_ID);
        assert_eq!(settings_select("x").placeholder(), "Choose settings ...");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_times_out_without_interaction() -> Result<()> {
        let mut view = InteractionView::abort(OWNER, Duration::from_secs(60));
        let (_tx, rx) = mpsc::unbounded::<Incoming<()>>();
        let started = Instant::now();

        let value = drive(&mut view, rx, |(), _| async { Ok(()) }).await?;

        assert_eq!(value, TerminalValue::Timeout);
        assert_eq!(value.as_str(), "timeout");
        assert!(started.elapsed() >= Duration::from_secs(60));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_abort_before_timeout() -> Result<()> {
        let mut view = InteractionView::abort(OWNER, Duration::from_secs(60));
        let (tx, rx) = mpsc::unbounded();
        let started = Instant::now();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            tx.unbounded_send(Incoming {
                user: OWNER,
                event: press_abort(),
                handle: (),
            })
            .unwrap();
            // Keep the stream open past the timeout
            tokio::time::sleep(Duration::from_secs(120)).await;
            drop(tx);
        });

        let mut updates = Vec::new();
        let value = drive(&mut view, rx, |(), update| {
            updates.push(update);
            async { Ok(()) }
        })
        .await?;

        assert_eq!(value.as_str(), "abort");
        assert!(started.elapsed() < Duration::from_secs(60));
        assert_eq!(updates, vec![ViewUpdate::Resolved(value.clone())]);

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(!view.on_timeout());
        assert_eq!(view.terminal_value(), Some(&value));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_answers_every_event() -> Result<()> {
        let mut view = topic_view();
        let (tx, rx) = mpsc::unbounded();
        tx.unbounded_send(Incoming {
            user: STRANGER,
            event: select("B"),
            handle: "stranger",
        })
        .unwrap();
        tx.unbounded_send(Incoming {
            user: OWNER,
            event: select("B"),
            handle: "owner",
        })
        .unwrap();
        drop(tx);

        let mut answered = Vec::new();
        let value = drive(&mut view, rx, |handle, update| {
            answered.push((handle, matches!(update, ViewUpdate::Refresh { .. })));
            async { Ok(()) }
        })
        .await?;

        assert_eq!(answered, vec![("stranger", false), ("owner", true)]);
        assert_eq!(active_label(&view), "B");
        // The stream ended, which counts as a timeout
        assert_eq!(value, TerminalValue::Timeout);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_selection_extends_timeout() -> Result<()> {
        let mut view = topic_view();
        let (tx, rx) = mpsc::unbounded();
        let started = Instant::now();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(50)).await;
            tx.unbounded_send(Incoming {
                user: OWNER,
                event: select("B"),
                handle: (),
            })
            .unwrap();
            tokio::time::sleep(Duration::from_secs(200)).await;
            drop(tx);
        });

        let mut answered_at = Vec::new();
        let value = drive(&mut view, rx, |(), update| {
            answered_at.push((started.elapsed().as_secs(), update));
            async { Ok(()) }
        })
        .await?;

        assert_eq!(value, TerminalValue::Timeout);
        // Still open at t=100, expires 60s after the selection
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(110));
        assert!(elapsed < Duration::from_secs(111));
        assert_eq!(answered_at.len(), 1);
        assert_eq!(answered_at[0].0, 50);
        assert!(matches!(answered_at[0].1, ViewUpdate::Refresh { .. }));
        assert_eq!(active_label(&view), "B");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_rejects_stranger_then_times_out() -> Result<()> {
        let mut view = topic_view();
        let (tx, rx) = mpsc::unbounded();
        let started = Instant::now();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            tx.unbounded_send(Incoming {
                user: STRANGER,
                event: select("B"),
                handle: (),
            })
            .unwrap();
            tokio::time::sleep(Duration::from_secs(200)).await;
            drop(tx);
        });

        let mut updates = Vec::new();
        let value = drive(&mut view, rx, |(), update| {
            updates.push(update);
            async { Ok(()) }
        })
        .await?;

        assert_eq!(value.as_str(), "timeout");
        assert_eq!(updates, vec![ViewUpdate::Rejected]);
        assert_eq!(active_label(&view), "A");
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(90));
        assert!(elapsed < Duration::from_secs(91));
        Ok(())
    }

    #[tokio::test]
    async fn test_drive_returns_immediately_when_resolved() -> Result<()> {
        let mut view = InteractionView::abort(OWNER, Duration::from_secs(60));
        view.resolve(TerminalValue::Widget("done".into()));
        let (_tx, rx) = mpsc::unbounded::<Incoming<()>>();

        let value = drive(&mut view, rx, |(), _| async { Ok(()) }).await?;

        assert_eq!(value.as_str(), "done");
        Ok(())
    }
}
