//! Access gate for paid commands.
//!
//! A user has access once their purchase history on the company API shows the
//! product purchase. The first successful verification is cached in the access-flag
//! store so later checks skip the remote probe.

#![allow(async_fn_in_trait)]

use crate::{errors::Result, models::TransactionRecord};
use tracing::{debug, info, warn};

/// Cached entitlement flags, keyed by user id.
pub trait AccessStore {
    /// Returns the stored flag for `user_id`, or `None` if nothing is stored.
    async fn lookup(&self, user_id: &str) -> Result<Option<bool>>;

    /// Records that `user_id` has access.
    async fn grant(&self, user_id: &str) -> Result<()>;
}

/// Source of a user's purchase history.
pub trait PurchaseHistory {
    /// Fetches every history entry for `user_id`.
    async fn purchase_history(&self, user_id: &str) -> Result<Vec<TransactionRecord>>;
}

/// What identifies the product purchase in a user's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRule {
    /// Price of the product in coins; the history entry carries `-price`
    pub price: i64,
    /// Substring the entry's reason must contain
    pub marker: String,
}

impl PurchaseRule {
    /// Whether `entry` is the product purchase.
    #[must_use]
    pub fn matches(&self, entry: &TransactionRecord) -> bool {
        entry.amount == -self.price
            && entry
                .reason
                .as_deref()
                .is_some_and(|reason| reason.contains(&self.marker))
    }
}

/// Outcome of the access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum AccessDecision {
    /// The user may continue
    Allowed,
    /// The user has not bought the product, or it could not be verified
    Denied,
}

impl AccessDecision {
    /// `true` for [`AccessDecision::Allowed`].
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Decides whether `user_id` may run a gated command.
///
/// A cached positive flag wins without a remote call. Otherwise the purchase history
/// is probed; any failure there denies access. A confirmed purchase is written back
/// to the store, and a failed write is only logged, so the next check simply probes
/// again.
pub async fn check_access<S, H>(
    store: &S,
    history: &H,
    rule: &PurchaseRule,
    user_id: &str,
) -> AccessDecision
where
    S: AccessStore,
    H: PurchaseHistory,
{
    match store.lookup(user_id).await {
        Ok(Some(true)) => {
            debug!("Access flag cached for user {user_id}");
            return AccessDecision::Allowed;
        }
        Ok(_) => {}
        Err(e) => warn!("Access flag lookup failed for user {user_id}: {e}"),
    }

    let entries = match history.purchase_history(user_id).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Purchase history probe failed for user {user_id}: {e}");
            return AccessDecision::Denied;
        }
    };

    if !entries.iter().any(|entry| rule.matches(entry)) {
        debug!("No qualifying purchase found for user {user_id}");
        return AccessDecision::Denied;
    }

    info!("Verified purchase for user {user_id}");
    if let Err(e) = store.grant(user_id).await {
        warn!("Failed to cache access flag for user {user_id}: {e}");
    }
    AccessDecision::Allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakeHistory, FakeStore, tx_with_reason};

    fn rule() -> PurchaseRule {
        PurchaseRule {
            price: 1000,
            marker: "company-buddy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_cached_flag_skips_remote_probe() {
        let store = FakeStore::with_flag("u1", true);
        let history = FakeHistory::failing();

        let decision = check_access(&store, &history, &rule(), "u1").await;

        assert_eq!(decision, AccessDecision::Allowed);
        assert_eq!(history.calls(), 0);
    }

    #[tokio::test]
    async fn test_purchase_found_grants_and_caches() {
        let store = FakeStore::default();
        let history = FakeHistory::with_entries(vec![
            tx_with_reason(-1000, "bought company-buddy license"),
        ]);

        let decision = check_access(&store, &history, &rule(), "u1").await;

        assert!(decision.is_allowed());
        assert_eq!(store.flag("u1"), Some(true));
    }

    #[tokio::test]
    async fn test_wrong_price_or_marker_denies() {
        let store = FakeStore::default();
        let history = FakeHistory::with_entries(vec![
            tx_with_reason(-999, "bought company-buddy license"),
            tx_with_reason(-1000, "bought something else"),
            tx_with_reason(1000, "refund company-buddy"),
        ]);

        let decision = check_access(&store, &history, &rule(), "u1").await;

        assert_eq!(decision, AccessDecision::Denied);
        assert_eq!(store.flag("u1"), None);
    }

    #[tokio::test]
    async fn test_remote_failure_fails_closed() {
        let store = FakeStore::default();
        let history = FakeHistory::failing();

        let decision = check_access(&store, &history, &rule(), "u1").await;

        assert_eq!(decision, AccessDecision::Denied);
        assert_eq!(history.calls(), 1);
    }

    #[tokio::test]
    async fn test_stored_false_flag_is_rechecked_remotely() {
        let store = FakeStore::with_flag("u1", false);
        let history = FakeHistory::with_entries(vec![tx_with_reason(-1000, "company-buddy")]);

        let decision = check_access(&store, &history, &rule(), "u1").await;

        assert!(decision.is_allowed());
        assert_eq!(history.calls(), 1);
        assert_eq!(store.flag("u1"), Some(true));
    }

    #[tokio::test]
    async fn test_failed_grant_still_allows_and_retries_next_time() {
        let store = FakeStore::failing_writes();
        let history = FakeHistory::with_entries(vec![tx_with_reason(-1000, "company-buddy")]);

        assert!(check_access(&store, &history, &rule(), "u1").await.is_allowed());
        assert!(check_access(&store, &history, &rule(), "u1").await.is_allowed());

        // Nothing was cached, so both checks hit the remote history
        assert_eq!(history.calls(), 2);
        assert_eq!(store.flag("u1"), None);
    }

    #[tokio::test]
    async fn test_store_read_failure_falls_back_to_probe() {
        let store = FakeStore::failing_reads();
        let history = FakeHistory::with_entries(vec![tx_with_reason(-1000, "company-buddy")]);

        assert!(check_access(&store, &history, &rule(), "u1").await.is_allowed());
        assert_eq!(history.calls(), 1);
    }

    #[tokio::test]
    async fn test_gate_works_against_sqlite_store() -> crate::errors::Result<()> {
        let db = crate::test_utils::setup_test_db().await?;
        let history = FakeHistory::with_entries(vec![tx_with_reason(-1000, "company-buddy")]);

        assert!(check_access(&db, &history, &rule(), "u1").await.is_allowed());
        assert_eq!(db.lookup("u1").await?, Some(true));

        // Second check is served from the table
        assert!(check_access(&db, &history, &rule(), "u1").await.is_allowed());
        assert_eq!(history.calls(), 1);
        Ok(())
    }

    #[test]
    fn test_rule_requires_reason() {
        let mut entry = tx_with_reason(-1000, "company-buddy");
        entry.reason = None;
        assert!(!rule().matches(&entry));
    }
}
