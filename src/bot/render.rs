//! Conversion of core content into serenity builders.

use crate::core::{button::ButtonStyle, embed::EmbedContent, view::WidgetLayout};
use poise::serenity_prelude as serenity;

/// Emoji marking the active option of a select.
pub const ACTIVE_OPTION_EMOJI: char = '🔹';

/// Discord allows at most five buttons per action row.
const BUTTONS_PER_ROW: usize = 5;

/// Builds a serenity embed.
#[must_use]
pub fn embed(content: &EmbedContent) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new();
    if let Some(title) = &content.title {
        embed = embed.title(title);
    }
    if let Some(description) = &content.description {
        embed = embed.description(description);
    }
    if let Some(color) = content.color {
        embed = embed.color(color);
    }
    embed.fields(
        content
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.value.clone(), field.inline)),
    )
}

const fn button_style(style: ButtonStyle) -> serenity::ButtonStyle {
    match style {
        ButtonStyle::Primary => serenity::ButtonStyle::Primary,
        ButtonStyle::Secondary => serenity::ButtonStyle::Secondary,
        ButtonStyle::Success => serenity::ButtonStyle::Success,
        ButtonStyle::Danger => serenity::ButtonStyle::Danger,
    }
}

/// Lays widgets out in action rows.
///
/// Each select gets its own row; consecutive buttons share rows.
#[must_use]
pub fn components(layout: &[WidgetLayout]) -> Vec<serenity::CreateActionRow> {
    let mut rows = Vec::new();
    let mut buttons = Vec::new();

    for widget in layout {
        match widget {
            WidgetLayout::Select {
                custom_id,
                placeholder,
                options,
            } => {
                if !buttons.is_empty() {
                    rows.push(serenity::CreateActionRow::Buttons(std::mem::take(&mut buttons)));
                }
                let options = options
                    .iter()
                    .map(|option| {
                        let entry = serenity::CreateSelectMenuOption::new(&option.label, &option.label);
                        if option.active {
                            entry.emoji(ACTIVE_OPTION_EMOJI)
                        } else {
                            entry
                        }
                    })
                    .collect();
                rows.push(serenity::CreateActionRow::SelectMenu(
                    serenity::CreateSelectMenu::new(
                        custom_id,
                        serenity::CreateSelectMenuKind::String { options },
                    )
                    .placeholder(placeholder)
                    .min_values(1)
                    .max_values(1),
                ));
            }
            WidgetLayout::Button {
                custom_id,
                label,
                style,
            } => {
                if buttons.len() == BUTTONS_PER_ROW {
                    rows.push(serenity::CreateActionRow::Buttons(std::mem::take(&mut buttons)));
                }
                buttons.push(
                    serenity::CreateButton::new(custom_id)
                        .label(label)
                        .style(button_style(*style)),
                );
            }
        }
    }

    if !buttons.is_empty() {
        rows.push(serenity::CreateActionRow::Buttons(buttons));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::select::OptionEntry;

    fn button(id: &str) -> WidgetLayout {
        WidgetLayout::Button {
            custom_id: id.to_string(),
            label: id.to_string(),
            style: ButtonStyle::Secondary,
        }
    }

    fn select() -> WidgetLayout {
        WidgetLayout::Select {
            custom_id: "select_topic".to_string(),
            placeholder: "Choose topic ...".to_string(),
            options: vec![OptionEntry {
                label: "A".to_string(),
                active: true,
            }],
        }
    }

    fn row_kinds(rows: &[serenity::CreateActionRow]) -> Vec<(&'static str, usize)> {
        rows.iter()
            .map(|row| match row {
                serenity::CreateActionRow::Buttons(buttons) => ("buttons", buttons.len()),
                serenity::CreateActionRow::SelectMenu(_) => ("select", 1),
                _ => ("other", 0),
            })
            .collect()
    }

    #[test]
    fn test_select_gets_own_row() {
        let rows = components(&[button("a"), select(), button("b"), button("c")]);
        assert_eq!(
            row_kinds(&rows),
            vec![("buttons", 1), ("select", 1), ("buttons", 2)]
        );
    }

    #[test]
    fn test_buttons_wrap_after_five() {
        let layout: Vec<_> = (0..7).map(|i| button(&i.to_string())).collect();
        assert_eq!(row_kinds(&components(&layout)), vec![("buttons", 5), ("buttons", 2)]);
    }

    #[test]
    fn test_empty_layout() {
        assert!(components(&[]).is_empty());
    }
}
