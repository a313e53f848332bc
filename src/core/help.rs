//! Help content - the main help menu, per-topic pages and the guild welcome text.

use crate::core::{embed::EmbedContent, select::SelectionWidget, view::topic_select};

/// Bullet used in front of every listed command.
pub const BULLET: &str = "🔸";

/// Topic shown first, listing every section.
pub const MAIN_TOPIC: &str = "Main menu";

/// A group of related commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpSection {
    /// Topic label in the select menu
    pub topic: &'static str,
    /// Field heading in the embed
    pub heading: &'static str,
    /// `(command, description)` pairs
    pub commands: &'static [(&'static str, &'static str)],
}

impl HelpSection {
    /// The section's command list, one bullet per line.
    #[must_use]
    pub fn render(&self) -> String {
        self.commands
            .iter()
            .map(|(command, description)| format!("{BULLET} `{command}` : {description}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// All help sections in display order.
pub const SECTIONS: [HelpSection; 5] = [
    HelpSection {
        topic: "Reminders",
        heading: "REMINDERS",
        commands: &[
            ("/list", "List all your active reminders"),
            ("/rm", "Manage custom reminders"),
        ],
    },
    HelpSection {
        topic: "Command tracking",
        heading: "COMMAND TRACKING",
        commands: &[("/stats", "Shows your command stats")],
    },
    HelpSection {
        topic: "User settings",
        heading: "USER SETTINGS",
        commands: &[
            ("/on` / `/off", "Turn the bot on/off"),
            ("/settings", "Check your settings"),
            ("/donor", "Set your EPIC RPG donor tier"),
            ("/enable` / `/disable", "Enable/disable specific reminders"),
            ("/dnd on` / `off", "Turn DND mode on/off (disables pings)"),
            (
                "/hardmode on` / `off",
                "Turn hardmode mode on/off (tells your partner to hunt solo)",
            ),
            ("/heal on` / `off", "Turn heal warning on/off"),
            ("/message", "Change the reminder messages"),
            ("/pet-helper on` / `off", "Turn the pet catch helper on/off"),
            ("/ruby", "Check your current ruby count"),
            ("/ruby on` / `off", "Turn the ruby counter on/off"),
            ("/tr-helper on` / `off", "Turn the training helper on/off"),
            ("/last-tt", "Manually change your last TT time"),
        ],
    },
    HelpSection {
        topic: "Partner settings",
        heading: "PARTNER SETTINGS",
        commands: &[
            ("/partner", "Set your marriage partner"),
            ("/partner donor", "Set your partner's EPIC RPG donor tier"),
            (
                "/partner channel",
                "Set the channel for incoming lootbox alerts",
            ),
        ],
    },
    HelpSection {
        topic: "Guild settings",
        heading: "GUILD SETTINGS",
        commands: &[
            ("rpg guild list", "Add/update your guild"),
            ("/guild leaderboard", "Check the weekly raid leaderboard"),
            ("/guild channel", "Set the channel for guild reminders"),
            (
                "/guild reminders on` / `off",
                "Turn guild reminders on or off",
            ),
            ("/guild stealth", "Set your stealth threshold"),
        ],
    },
];

/// Main menu embed with every section.
#[must_use]
pub fn main_help(user_name: &str, color: u32) -> EmbedContent {
    SECTIONS.iter().fold(
        EmbedContent::new()
            .title("NAVI")
            .description(format!("Hey! **{user_name}**! Hello!"))
            .color(color),
        |embed, section| embed.field(section.heading, section.render(), false),
    )
}

/// Embed for a single section.
#[must_use]
pub fn section_help(section: &HelpSection, color: u32) -> EmbedContent {
    EmbedContent::new()
        .title(format!("NAVI HELP - {}", section.heading))
        .color(color)
        .field(section.heading, section.render(), false)
}

/// Topic select offering the main menu and every section, with the main
/// menu active.
#[must_use]
pub fn help_select(user_name: &str, color: u32) -> SelectionWidget {
    let user_name = user_name.to_string();
    SECTIONS.iter().fold(
        topic_select(MAIN_TOPIC).option(MAIN_TOPIC, move || main_help(&user_name, color)),
        |select, &section| select.option(section.topic, move || section_help(&section, color)),
    )
}

/// Greeting sent to a guild's system channel when Navi joins it.
#[must_use]
pub fn welcome_message(guild_name: &str) -> String {
    format!(
        "Hey! **{guild_name}**! I'm here to remind you to do your Epic RPG commands!\n\n\
         Note that reminders are off by default. If you want to get reminded, please use \
         `/on` to activate me.\n\
         Use `/help` to see everything I can do."
    )
}
