//! Selection widget - a single-choice select whose options each render content.
//!
//! Selecting an option marks it as active and swaps the message content for
//! whatever that option's render callback produces.

use crate::{
    core::embed::EmbedContent,
    errors::{Error, Result},
};
use std::fmt;

/// Produces the content shown while an option is active.
pub type RenderFn = Box<dyn Fn() -> EmbedContent + Send + Sync>;

/// One rendered select option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    /// Option label, also used as the option value
    pub label: String,
    /// Whether this is the currently active option
    pub active: bool,
}

/// Result of a successful selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Content produced by the selected option's callback
    pub content: EmbedContent,
    /// Refreshed option list with the new active label marked
    pub options: Vec<OptionEntry>,
}

/// A select menu with mutually exclusive, labeled options.
pub struct SelectionWidget {
    custom_id: String,
    placeholder: String,
    options: Vec<(String, RenderFn)>,
    active_label: String,
}

impl fmt::Debug for SelectionWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionWidget")
            .field("custom_id", &self.custom_id)
            .field("placeholder", &self.placeholder)
            .field("labels", &self.labels().collect::<Vec<_>>())
            .field("active_label", &self.active_label)
            .finish()
    }
}

impl SelectionWidget {
    /// Creates a select without options.
    pub fn new(
        custom_id: impl Into<String>,
        placeholder: impl Into<String>,
        active_label: impl Into<String>,
    ) -> Self {
        Self {
            custom_id: custom_id.into(),
            placeholder: placeholder.into(),
            options: Vec::new(),
            active_label: active_label.into(),
        }
    }

    /// Adds an option. Adding a label twice replaces its callback in place.
    #[must_use]
    pub fn option<F>(mut self, label: impl Into<String>, render: F) -> Self
    where
        F: Fn() -> EmbedContent + Send + Sync + 'static,
    {
        let label = label.into();
        let render: RenderFn = Box::new(render);
        match self.options.iter_mut().find(|(existing, _)| *existing == label) {
            Some(entry) => entry.1 = render,
            None => self.options.push((label, render)),
        }
        self
    }

    /// Component id Discord reports back on selection.
    #[must_use]
    pub fn custom_id(&self) -> &str {
        &self.custom_id
    }

    /// Text shown while nothing is picked.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Currently highlighted label.
    #[must_use]
    pub fn active_label(&self) -> &str {
        &self.active_label
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|(label, _)| label.as_str())
    }

    /// Renders every option in insertion order, marking `active`.
    #[must_use]
    pub fn render(&self, active: &str) -> Vec<OptionEntry> {
        self.labels()
            .map(|label| OptionEntry {
                label: label.to_string(),
                active: label == active,
            })
            .collect()
    }

    /// Renders the options with the current active label marked.
    #[must_use]
    pub fn render_current(&self) -> Vec<OptionEntry> {
        self.render(&self.active_label)
    }

    /// Content for the currently active option, if it is one of the options.
    #[must_use]
    pub fn current_content(&self) -> Option<EmbedContent> {
        self.options
            .iter()
            .find(|(label, _)| *label == self.active_label)
            .map(|(_, render)| render())
    }

    /// Activates `label` and renders its content.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSelection`] if `label` is not an option. The
    /// active label is left unchanged in that case.
    pub fn on_select(&mut self, label: &str) -> Result<Selection> {
        let content = self
            .options
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, render)| render())
            .ok_or_else(|| Error::InvalidSelection {
                label: label.to_string(),
            })?;

        label.clone_into(&mut self.active_label);
        Ok(Selection {
            content,
            options: self.render(label),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn titled(title: &'static str) -> impl Fn() -> EmbedContent + Send + Sync {
        move || EmbedContent::new().title(title)
    }

    fn widget() -> SelectionWidget {
        SelectionWidget::new("select_topic", "Choose topic ...", "A")
            .option("A", titled("content A"))
            .option("B", titled("content B"))
    }

    #[test]
    fn test_render_marks_active_label_in_order() {
        let select = widget().option("C", titled("content C"));

        let options = select.render("B");
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        assert_eq!(
            options.iter().filter(|o| o.active).count(),
            1,
            "exactly one option is highlighted"
        );
        assert!(options[1].active);
    }

    #[test]
    fn test_select_switches_content() {
        let mut select = widget();

        let selection = select.on_select("B").unwrap();

        assert_eq!(select.active_label(), "B");
        assert_eq!(selection.content, titled("content B")());
        assert!(selection.options[1].active);
        assert!(!selection.options[0].active);
    }

    #[test]
    fn test_select_unknown_label_leaves_state() {
        let mut select = widget();

        let result = select.on_select("Z");

        assert!(matches!(result, Err(Error::InvalidSelection { ref label }) if label == "Z"));
        assert_eq!(select.active_label(), "A");
    }

    #[test]
    fn test_duplicate_label_replaces_callback() {
        let mut select = widget().option("A", titled("newer A"));

        assert_eq!(select.labels().collect::<Vec<_>>(), vec!["A", "B"]);
        let selection = select.on_select("A").unwrap();
        assert_eq!(selection.content.title.as_deref(), Some("newer A"));
    }

    #[test]
    fn test_current_content() {
        let select = widget();
        assert_eq!(select.current_content(), Some(titled("content A")()));

        let dangling = SelectionWidget::new("select_topic", "Choose topic ...", "missing")
            .option("A", titled("content A"));
        assert!(dangling.current_content().is_none());
    }
}
