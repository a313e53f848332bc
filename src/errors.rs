//! Unified error type for Navi.
//!
//! Unauthorized interactions and callbacks on an already-resolved view are not
//! errors. They come back from [`crate::core::view::InteractionView::handle`] as
//! [`crate::core::view::ViewUpdate`] values instead.

use poise::serenity_prelude as serenity;
use thiserror::Error;

/// All errors that can occur inside the bot.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable was missing or malformed
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Discord API or gateway error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<serenity::Error>),

    /// A select menu reported a label that is not one of its options
    #[error("'{label}' is not one of the available options")]
    InvalidSelection {
        /// The rejected label
        label: String,
    },

    /// An interaction referenced a component the view does not own
    #[error("No widget with id '{custom_id}' is attached to this view")]
    UnknownWidget {
        /// The component id sent by Discord
        custom_id: String,
    },

    /// The invoking user has not activated the bot yet
    #[error("User has not activated Navi yet")]
    FirstTimeUser,
}

impl From<serenity::Error> for Error {
    fn from(value: serenity::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
