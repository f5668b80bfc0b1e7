//! History aggregation - income/expense totals and the contributor leaderboard.

use crate::models::TransactionRecord;
use std::collections::HashMap;

/// Running total for a single contributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActorSummary {
    /// Sum of the contributor's positive amounts
    pub total: i64,
    /// Number of positive-amount entries by the contributor
    pub count: u64,
}

/// Totals for one filtered history window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregationResult {
    /// Sum of all positive amounts
    pub total_income: i64,
    /// Absolute value of the sum of all negative amounts
    pub total_expense: i64,
    /// Contributors ordered by descending entry count, ties in first-seen order
    pub per_actor: Vec<(String, ActorSummary)>,
}

impl AggregationResult {
    /// Income minus expense.
    #[must_use]
    pub const fn net(&self) -> i64 {
        self.total_income - self.total_expense
    }

    /// Looks up one contributor's summary.
    #[must_use]
    pub fn actor(&self, actor_id: &str) -> Option<&ActorSummary> {
        self.per_actor
            .iter()
            .find(|(id, _)| id == actor_id)
            .map(|(_, summary)| summary)
    }
}

/// Reduces history entries into an [`AggregationResult`].
///
/// Every entry counts toward the totals. Only entries with a user id and a positive
/// amount count toward the leaderboard.
///
/// Sums saturate at `i64::MAX` so an out-of-range amount from the API cannot
/// overflow a total.
pub fn aggregate<'a, I>(entries: I) -> AggregationResult
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut result = AggregationResult::default();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        if entry.amount >= 0 {
            result.total_income = result.total_income.saturating_add(entry.amount);
        } else {
            result.total_expense = result
                .total_expense
                .saturating_add(entry.amount.saturating_neg());
        }

        let Some(actor) = entry.user_id.as_deref() else {
            continue;
        };
        if entry.amount <= 0 {
            continue;
        }

        let slot = *index.entry(actor).or_insert_with(|| {
            result
                .per_actor
                .push((actor.to_string(), ActorSummary::default()));
            result.per_actor.len() - 1
        });
        let summary = &mut result.per_actor[slot].1;
        summary.total = summary.total.saturating_add(entry.amount);
        summary.count += 1;
    }

    // Stable sort keeps first-seen order among equal counts
    result
        .per_actor
        .sort_by(|(_, a), (_, b)| b.count.cmp(&a.count));
    result
}
