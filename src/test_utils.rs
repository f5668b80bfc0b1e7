//! Shared test utilities for `CompanyBuddy`.
//!
//! This module provides record builders with sensible defaults, an in-memory
//! database setup, and fakes for the access gate's store and history traits.

#![allow(clippy::unwrap_used)]

use crate::{
    core::access::{AccessStore, PurchaseHistory},
    errors::{Error, Result},
    models::{CompanyRecord, TransactionRecord},
};
use sea_orm::{DatabaseConnection, DbErr};
use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Timestamp used by [`tx`] when the test does not care about time.
pub const DEFAULT_TRADED_AT: &str = "2026-10-14T00:00:00Z";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all store tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a company record.
pub fn company(id: &str, name: &str, assets: i64, salary: i64) -> CompanyRecord {
    CompanyRecord {
        id: id.to_string(),
        name: name.to_string(),
        assets,
        salary,
    }
}

/// Creates `n` companies with distinct ids and unordered assets/salaries.
pub fn sample_companies(n: usize) -> Vec<CompanyRecord> {
    (0..n)
        .map(|i| {
            let seed = i64::try_from(i).unwrap();
            company(
                &format!("company{i:03}"),
                &format!("Company {i}"),
                (seed * 7919) % 1000,
                (seed * 104_729) % 500,
            )
        })
        .collect()
}

/// Creates a history entry at [`DEFAULT_TRADED_AT`].
pub fn tx(user_id: Option<&str>, amount: i64) -> TransactionRecord {
    tx_at(user_id, amount, DEFAULT_TRADED_AT)
}

/// Creates a history entry with an explicit raw timestamp.
pub fn tx_at(user_id: Option<&str>, amount: i64, traded_at: &str) -> TransactionRecord {
    TransactionRecord {
        user_id: user_id.map(str::to_string),
        amount,
        traded_at: traded_at.to_string(),
        reason: None,
    }
}

/// Creates a purchase-history entry with a reason.
pub fn tx_with_reason(amount: i64, reason: &str) -> TransactionRecord {
    TransactionRecord {
        reason: Some(reason.to_string()),
        ..tx(None, amount)
    }
}

/// In-memory [`AccessStore`] that can be told to fail reads or writes.
#[derive(Debug, Default)]
pub struct FakeStore {
    flags: Mutex<HashMap<String, bool>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl FakeStore {
    /// Store pre-populated with one flag.
    pub fn with_flag(user_id: &str, has_access: bool) -> Self {
        let store = Self::default();
        store
            .flags
            .lock()
            .unwrap()
            .insert(user_id.to_string(), has_access);
        store
    }

    /// Store whose lookups always fail.
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Store whose grants always fail.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Current flag for a user.
    pub fn flag(&self, user_id: &str) -> Option<bool> {
        self.flags.lock().unwrap().get(user_id).copied()
    }
}

impl AccessStore for FakeStore {
    async fn lookup(&self, user_id: &str) -> Result<Option<bool>> {
        if self.fail_reads {
            return Err(Error::Database(DbErr::Custom("read failed".to_string())));
        }
        Ok(self.flag(user_id))
    }

    async fn grant(&self, user_id: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Database(DbErr::Custom("write failed".to_string())));
        }
        self.flags
            .lock()
            .unwrap()
            .insert(user_id.to_string(), true);
        Ok(())
    }
}

/// [`PurchaseHistory`] returning canned entries, or failing like an unavailable API.
#[derive(Debug, Default)]
pub struct FakeHistory {
    entries: Option<Vec<TransactionRecord>>,
    calls: AtomicUsize,
}

impl FakeHistory {
    /// History that returns `entries` for every user.
    pub fn with_entries(entries: Vec<TransactionRecord>) -> Self {
        Self {
            entries: Some(entries),
            calls: AtomicUsize::new(0),
        }
    }

    /// History whose endpoint always answers 503.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Number of probes made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PurchaseHistory for FakeHistory {
    async fn purchase_history(&self, _user_id: &str) -> Result<Vec<TransactionRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries.clone().ok_or(Error::Upstream {
            endpoint: "history",
            status: 503,
        })
    }
}
