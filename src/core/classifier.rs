//! Command failure classification.
//!
//! Failures are matched against [`Category::DECISION_ORDER`]; the first
//! matching category decides the user-facing notice. Only unclassified
//! failures are persisted for operator review.

use crate::{config::BotConfig, core::embed::EmbedContent};
use std::time::Duration;
use thiserror::Error;

/// A failed command invocation, reduced to what classification needs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Failure {
    /// Command used in a DM while guild-only, or in a guild while DM-only
    #[error("This command is not available in this context")]
    WrongContext {
        /// Whether the invocation came from a guild
        in_guild: bool,
    },
    /// The user lacks permissions for the command
    #[error("{detail}")]
    MissingPermissions {
        /// Missing permissions
        detail: String,
    },
    /// An argument could not be parsed
    #[error("{detail}")]
    BadArgument {
        /// Parser message
        detail: String,
    },
    /// More arguments were passed than the command takes
    #[error("{detail}")]
    TooManyArguments {
        /// Parser message
        detail: String,
    },
    /// The bot lacks permissions in the channel
    #[error("Bot is missing permissions: {detail}")]
    BotMissingPermissions {
        /// Missing permissions
        detail: String,
    },
    /// The command is on cooldown for this user
    #[error("Command on cooldown, retry after {retry_after:?}")]
    Cooldown {
        /// Time left until the command can be used again
        retry_after: Duration,
        /// Configured cooldown period, if known
        period: Option<Duration>,
    },
    /// The user has not activated the bot yet
    #[error("User has not activated Navi yet")]
    FirstTimeUser,
    /// Anything else
    #[error("{detail}")]
    Other {
        /// Error text
        detail: String,
    },
}

/// Failure categories, each mapped to one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Command unavailable in DMs or in this server
    Unavailable,
    /// Missing permission, bad argument or too many arguments
    Usage,
    /// Bot lacks channel permissions
    BotPermissions,
    /// Cooldown active
    Cooldown,
    /// User not yet onboarded
    Onboarding,
    /// Nothing above matched
    Unclassified,
}

impl Category {
    /// Categories in the order they are tried.
    pub const DECISION_ORDER: [Self; 6] = [
        Self::Unavailable,
        Self::Usage,
        Self::BotPermissions,
        Self::Cooldown,
        Self::Onboarding,
        Self::Unclassified,
    ];

    /// Whether `failure` falls into this category.
    #[must_use]
    pub const fn matches(self, failure: &Failure) -> bool {
        match self {
            Self::Unavailable => matches!(failure, Failure::WrongContext { .. }),
            Self::Usage => matches!(
                failure,
                Failure::MissingPermissions { .. }
                    | Failure::BadArgument { .. }
                    | Failure::TooManyArguments { .. }
            ),
            Self::BotPermissions => matches!(failure, Failure::BotMissingPermissions { .. }),
            Self::Cooldown => matches!(failure, Failure::Cooldown { .. }),
            Self::Onboarding => matches!(failure, Failure::FirstTimeUser),
            Self::Unclassified => true,
        }
    }
}

/// Finds the first category in [`Category::DECISION_ORDER`] matching `failure`.
#[must_use]
pub fn classify(failure: &Failure) -> Category {
    Category::DECISION_ORDER
        .into_iter()
        .find(|category| category.matches(failure))
        .unwrap_or(Category::Unclassified)
}

/// Who invoked the failing command, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Full command name including parent commands
    pub command_name: String,
    /// Discord user ID
    pub user_id: u64,
    /// Display name used in notices
    pub user_name: String,
    /// Guild the command ran in, None for DMs
    pub guild_id: Option<u64>,
}

/// Private reply sent to the invoking user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Plain text
    Text(String),
    /// Error embed
    Embed(EmbedContent),
}

/// What to do about a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Matched category
    pub category: Category,
    /// Reply for the user, if any
    pub notice: Option<Notice>,
    /// Whether the failure goes to the error log
    pub persist: bool,
}

/// Classifies `failure` and builds the response for `invocation`.
#[must_use]
pub fn decide(failure: &Failure, invocation: &Invocation, config: &BotConfig) -> Outcome {
    let category = classify(failure);
    let user = &invocation.user_name;

    let notice = match (category, failure) {
        (Category::Unavailable, Failure::WrongContext { in_guild: false }) => Some(Notice::Text(
            "I'm sorry, this command is not available in DMs.".to_string(),
        )),
        (Category::Unavailable, _) => Some(Notice::Text(
            "I'm sorry, this command is not available in this server.".to_string(),
        )),
        (Category::Usage, _) => Some(Notice::Embed(error_embed(invocation, failure))),
        (Category::BotPermissions, _) => Some(Notice::Text(
            "You can't use this command in this channel.\n\
             To enable this, I need the permission `View Channel` / `Read Messages` in this channel."
                .to_string(),
        )),
        (
            Category::Cooldown,
            Failure::Cooldown {
                retry_after,
                period,
            },
        ) => {
            let first_line = period.map_or_else(
                || format!("**{user}**, this command is on cooldown."),
                |period| {
                    format!(
                        "**{user}**, you can only use this command every {} seconds.",
                        period.as_secs()
                    )
                },
            );
            Some(Notice::Text(format!(
                "{first_line}\nYou have to wait another **{:.1}s**.",
                retry_after.as_secs_f64()
            )))
        }
        (Category::Onboarding, _) => Some(Notice::Text(format!(
            "**{user}**, looks like I don't know you yet.\n\
             Use `/enable` to activate me first."
        ))),
        (Category::Unclassified, _) => (config.debug_mode || config.is_dev(invocation.user_id))
            .then(|| Notice::Embed(error_embed(invocation, failure))),
        (Category::Cooldown, _) => None,
    };

    Outcome {
        category,
        notice,
        persist: category == Category::Unclassified,
    }
}

/// Embed echoing the command name and error text.
#[must_use]
pub fn error_embed(invocation: &Invocation, failure: &Failure) -> EmbedContent {
    EmbedContent::new()
        .title("An error occured")
        .field("Command", format!("`{}`", invocation.command_name), false)
        .field("Error", format!("```\n{failure}\n```"), false)
}
