//! Core business logic - framework-agnostic listing, aggregation and access checks.
//!
//! Nothing in here talks to Discord. The bot layer calls these functions and turns
//! their results into messages.

/// Access gate and the traits it is built on
pub mod access;
/// SeaORM-backed access-flag store
pub mod access_flags;
/// Income/expense totals and contributor leaderboard
pub mod aggregate;
/// Sortable, paginated company listing
pub mod listing;
/// Text formatting for listings and reports
pub mod report;
/// Lookback windows and timestamp filtering
pub mod window;
