//! Action button - writes its identity as the view's outcome when pressed.

use crate::core::view::TerminalValue;

/// Visual style of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    /// Blurple
    Primary,
    /// Grey
    #[default]
    Secondary,
    /// Green
    Success,
    /// Red
    Danger,
}

/// A single-shot button. Pressing it resolves the owning view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    custom_id: String,
    label: String,
    style: ButtonStyle,
}

impl ActionButton {
    /// Creates a button whose identity is `custom_id`.
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style,
        }
    }

    /// Identity reported as the terminal value.
    #[must_use]
    pub fn custom_id(&self) -> &str {
        &self.custom_id
    }

    /// Button caption.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Button style.
    #[must_use]
    pub const fn style(&self) -> ButtonStyle {
        self.style
    }

    /// The value the owning view resolves to when this button is pressed.
    #[must_use]
    pub fn activate(&self) -> TerminalValue {
        TerminalValue::Widget(self.custom_id.clone())
    }
}
