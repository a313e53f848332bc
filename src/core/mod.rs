//! Core logic - framework-agnostic views, widgets, error classification and
//! message content. The bot layer translates these types to and from Discord.

/// Information shown by `/about`
pub mod about;
/// Single-shot buttons
pub mod button;
/// Ordered decision table for command failures
pub mod classifier;
/// Framework-agnostic embed description
pub mod embed;
/// Persistence of unclassified command failures
pub mod error_log;
/// Help topics and the guild welcome text
pub mod help;
/// Option selects
pub mod select;
/// Interaction views and their timeout-aware driver
pub mod view;
