//! Discord command implementations.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General commands (help, about)
pub mod general;

// Export commands
pub use general::*;
