//! Report formatting.
//!
//! Turns listing pages, company details and aggregation results into plain text
//! fields. The bot layer only wraps these strings in embeds.

use crate::{
    core::{aggregate::AggregationResult, listing::ListingPage},
    models::CompanyRecord,
};

/// Maximum number of contributors shown in a history report.
pub const LEADERBOARD_LIMIT: usize = 10;

/// A titled block of text, rendered as one embed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field title
    pub name: String,
    /// Field body
    pub value: String,
}

impl Field {
    fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Formats a coin amount like `1,234,567 coins`.
#[must_use]
pub fn format_coins(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped} coins")
}

/// One listing entry: `Name (id)` over assets and salary.
#[must_use]
pub fn company_field(company: &CompanyRecord) -> Field {
    Field::new(
        format!("{} ({})", company.name, company.id),
        format!(
            "Assets: {}\nSalary: {}",
            format_coins(company.assets),
            format_coins(company.salary)
        ),
    )
}

/// Fields for the `/company info` view.
#[must_use]
pub fn company_detail_fields(company: &CompanyRecord) -> Vec<Field> {
    vec![
        Field::new("ID", format!("`{}`", company.id)),
        Field::new("Assets", format_coins(company.assets)),
        Field::new("Salary", format_coins(company.salary)),
    ]
}

/// Fields for every company on a listing page.
#[must_use]
pub fn listing_fields(page: &ListingPage<'_>) -> Vec<Field> {
    page.entries.iter().map(company_field).collect()
}

/// Footer for a listing page: page indicator and sort mode.
#[must_use]
pub fn listing_footer(page: &ListingPage<'_>) -> String {
    format!("{} • Sorted by: {}", page.indicator(), page.sort_mode.label())
}

/// Fields for a history report.
///
/// The contributor leaderboard is left out entirely when nobody contributed.
#[must_use]
pub fn history_fields(result: &AggregationResult) -> Vec<Field> {
    let mut fields = vec![
        Field::new("Income", format_coins(result.total_income)),
        Field::new("Expense", format_coins(result.total_expense)),
        Field::new("Net", format_coins(result.net())),
    ];
    if let Some(board) = format_leaderboard(result, LEADERBOARD_LIMIT) {
        fields.push(Field::new("Top contributors", board));
    }
    fields
}

/// Numbered contributor lines, or `None` if there are none.
#[must_use]
pub fn format_leaderboard(result: &AggregationResult, limit: usize) -> Option<String> {
    if result.per_actor.is_empty() {
        return None;
    }
    let lines: Vec<String> = result
        .per_actor
        .iter()
        .take(limit)
        .enumerate()
        .map(|(rank, (actor, summary))| {
            let trades = if summary.count == 1 { "trade" } else { "trades" };
            format!(
                "{}. <@{actor}> +{} ({} {trades})",
                rank + 1,
                format_coins(summary.total),
                summary.count
            )
        })
        .collect();
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{aggregate::aggregate, listing::Listing},
        test_utils::{company, sample_companies, tx},
    };

    #[test]
    fn test_format_coins_groups_thousands() {
        assert_eq!(format_coins(0), "0 coins");
        assert_eq!(format_coins(999), "999 coins");
        assert_eq!(format_coins(1000), "1,000 coins");
        assert_eq!(format_coins(1_234_567), "1,234,567 coins");
        assert_eq!(format_coins(-45_000), "-45,000 coins");
        assert_eq!(format_coins(i64::MIN), "-9,223,372,036,854,775,808 coins");
    }

    #[test]
    fn test_company_field() {
        let field = company_field(&company("abcdefghij", "Acme", 50_000, 1200));
        assert_eq!(field.name, "Acme (abcdefghij)");
        assert_eq!(field.value, "Assets: 50,000 coins\nSalary: 1,200 coins");
    }

    #[test]
    fn test_listing_footer_and_fields() {
        let listing = Listing::new(sample_companies(12), 5, "owner");
        let page = listing.render();
        assert_eq!(listing_fields(&page).len(), 5);
        assert_eq!(listing_footer(&page), "Page 1/3 • Sorted by: Creation order");
    }

    #[test]
    fn test_history_fields_include_leaderboard() {
        let log = vec![tx(Some("1"), 100), tx(Some("2"), -40), tx(Some("1"), 100)];
        let fields = history_fields(&aggregate(&log));

        assert_eq!(fields.len(), 4);
        assert_eq!(fields[2].value, "160 coins");
        assert_eq!(fields[3].value, "1. <@1> +200 coins (2 trades)");
    }

    #[test]
    fn test_history_fields_omit_empty_leaderboard() {
        let log = vec![tx(None, 100), tx(Some("2"), -40)];
        let fields = history_fields(&aggregate(&log));
        assert_eq!(fields.len(), 3);
        assert!(fields.iter().all(|f| f.name != "Top contributors"));
    }

    #[test]
    fn test_leaderboard_respects_limit() {
        let log: Vec<_> = (0..15).map(|i| tx(Some(i.to_string().as_str()), 1)).collect();
        let board = format_leaderboard(&aggregate(&log), 3).unwrap_or_default();
        assert_eq!(board.lines().count(), 3);
        assert!(board.starts_with("1. <@0> +1 coins (1 trade)"));
    }
}
