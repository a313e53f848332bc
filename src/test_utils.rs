//! Shared test utilities for Navi.
//!
//! Helpers for setting up test databases and building the values most tests
//! need, with sensible defaults.

use crate::{core::classifier::Invocation, errors::Result};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// An invocation of `/help` by user 42 in guild 7.
#[must_use]
pub fn sample_invocation() -> Invocation {
    Invocation {
        command_name: "help".to_string(),
        user_id: 42,
        user_name: "miriel".to_string(),
        guild_id: Some(7),
    }
}
