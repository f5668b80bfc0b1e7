//! Discord interaction handlers
//!
//! This module provides the access guard and result publishing shared by gated
//! commands, plus the button/select-menu loop behind `/company list`.

/// Access guard for gated commands
pub mod access_gate;
/// Interactive listing session (buttons and sort menu)
pub mod listing_session;
/// Publishing gated command results
pub mod reply;
