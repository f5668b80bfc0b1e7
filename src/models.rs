//! Record shapes returned by the company API.
//!
//! These are immutable snapshots fetched per request. Nothing here is persisted.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length every company id must have.
pub const COMPANY_ID_LEN: usize = 10;

/// A company as returned by the listing and detail endpoints.
///
/// The position of a record in the listing response is its creation order;
/// there is no explicit timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Ten-character company id
    pub id: String,
    /// Display name
    pub name: String,
    /// Capital held by the company, in coins
    pub assets: i64,
    /// Salary paid to members, in coins
    pub salary: i64,
}

/// One entry of a company or user transaction history.
///
/// `traded_at` is kept as the raw string sent by the API; it is parsed when the
/// entry is filtered by time window, and entries that fail to parse are dropped
/// there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// User who made the transaction, if known
    #[serde(default, alias = "user_id", alias = "actorId")]
    pub user_id: Option<String>,
    /// Signed amount; positive is income, negative is expense
    pub amount: i64,
    /// Raw timestamp string
    #[serde(default, alias = "traded_at")]
    pub traded_at: String,
    /// Free-text reason attached by the API
    #[serde(default)]
    pub reason: Option<String>,
}

/// A validated company id.
///
/// Constructing one is the only way to call the per-company endpoints, so a
/// bad id is rejected before any network call happens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompanyId(String);

impl CompanyId {
    /// Validates `raw` as a company id.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCompanyId`] unless `raw` is exactly
    /// [`COMPANY_ID_LEN`] characters long.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.chars().count() != COMPANY_ID_LEN {
            return Err(Error::InvalidCompanyId {
                id: raw.to_string(),
                expected: COMPANY_ID_LEN,
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
