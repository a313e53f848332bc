//! Embed content that can be rendered without touching the Discord API.

/// A single embed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    /// Field heading
    pub name: String,
    /// Field body
    pub value: String,
    /// Whether Discord may place the field next to others
    pub inline: bool,
}

/// Rich message content, converted to a `CreateEmbed` by the bot layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedContent {
    /// Embed title
    pub title: Option<String>,
    /// Text below the title
    pub description: Option<String>,
    /// Sidebar color as `0xRRGGBB`
    pub color: Option<u32>,
    /// Fields in display order
    pub fields: Vec<EmbedField>,
}

impl EmbedContent {
    /// Creates an empty embed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the sidebar color.
    #[must_use]
    pub const fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Looks up a field by its heading.
    #[must_use]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}
