//! Error log entity - Command failures kept for operator review.
//!
//! Only failures the error classifier could not match end up here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Error log database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "errors")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the failure happened
    pub date: DateTimeUtc,
    /// Full name of the failing command (including parent commands)
    pub command_name: String,
    /// Discord user ID of the invoking user
    pub user_id: String,
    /// Discord guild ID, None for direct messages
    pub guild_id: Option<String>,
    /// Rendered error text
    pub error: String,
}

/// The error log has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
