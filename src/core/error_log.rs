//! Error log business logic - persists unclassified command failures.
//!
//! Operators read the log to find bugs; users never see these rows.

use crate::{
    core::classifier::{Failure, Invocation},
    entities::{ErrorLog, error_log},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use tracing::info;

/// Appends a failure to the error log.
///
/// The stored text is the failure's display form, and the date is the current
/// UTC time.
pub async fn log_error(
    db: &DatabaseConnection,
    failure: &Failure,
    invocation: &Invocation,
) -> Result<error_log::Model> {
    let entry = error_log::ActiveModel {
        date: Set(chrono::Utc::now()),
        command_name: Set(invocation.command_name.clone()),
        user_id: Set(invocation.user_id.to_string()),
        guild_id: Set(invocation.guild_id.map(|id| id.to_string())),
        error: Set(failure.to_string()),
        ..Default::default()
    };

    let model = entry.insert(db).await?;
    info!(
        id = model.id,
        command = %model.command_name,
        "Logged unclassified command error"
    );
    Ok(model)
}

/// Returns up to `limit` error log entries, newest first.
pub async fn get_recent_errors(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<error_log::Model>> {
    ErrorLog::find()
        .order_by_desc(error_log::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}
