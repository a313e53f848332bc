//! Entity module - Contains the SeaORM entity definitions for the database.
//! Navi only stores the error log; guild and user data live elsewhere.

pub mod error_log;

pub use error_log::{Column as ErrorLogColumn, Entity as ErrorLog, Model as ErrorLogModel};
