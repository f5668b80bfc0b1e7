//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Admin commands for the access-flag store
pub mod admin;

/// Company listing, detail and history commands
pub mod company;

/// Feedback relay to the admin
pub mod feedback;

/// General utility commands
pub mod general;

// Export commands
pub use admin::*;
pub use company::*;
pub use feedback::*;
pub use general::*;
