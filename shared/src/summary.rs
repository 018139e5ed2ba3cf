//! Summary statistics over raw record lists: straightforward reductions used
//! by the dashboard next to the chart.

use crate::TransactionRecord;
use chrono::DateTime;

/// Sum of all amounts in a list
pub fn total(records: &[TransactionRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Total income minus total expenses
pub fn balance(incomes: &[TransactionRecord], expenses: &[TransactionRecord]) -> f64 {
    total(incomes) - total(expenses)
}

/// Smallest amount in a list, None when empty
pub fn min_amount(records: &[TransactionRecord]) -> Option<f64> {
    records.iter().map(|r| r.amount).reduce(f64::min)
}

/// Largest amount in a list, None when empty
pub fn max_amount(records: &[TransactionRecord]) -> Option<f64> {
    records.iter().map(|r| r.amount).reduce(f64::max)
}

/// The three most recently created records across both lists, newest first.
/// Records whose `created_at` cannot be parsed sort last.
pub fn recent_history(
    incomes: &[TransactionRecord],
    expenses: &[TransactionRecord],
) -> Vec<TransactionRecord> {
    let mut merged: Vec<TransactionRecord> =
        incomes.iter().chain(expenses.iter()).cloned().collect();
    merged.sort_by_key(|record| {
        std::cmp::Reverse(
            DateTime::parse_from_rfc3339(&record.created_at)
                .map(|dt| dt.timestamp_millis())
                .unwrap_or(i64::MIN),
        )
    });
    merged.truncate(3);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, amount: f64, created_at: &str) -> TransactionRecord {
        TransactionRecord {
            id: id.to_string(),
            title: id.to_string(),
            amount,
            date: "2024-01-01".to_string(),
            category: "general".to_string(),
            description: String::new(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_totals_and_balance() {
        let incomes = vec![
            record("i1", 100.0, "2024-01-01T10:00:00Z"),
            record("i2", 50.0, "2024-01-02T10:00:00Z"),
        ];
        let expenses = vec![record("e1", 30.0, "2024-01-03T10:00:00Z")];

        assert_eq!(total(&incomes), 150.0);
        assert_eq!(total(&expenses), 30.0);
        assert_eq!(balance(&incomes, &expenses), 120.0);
        assert_eq!(total(&[]), 0.0);
    }

    #[test]
    fn test_min_max_amount() {
        let records = vec![
            record("a", 5.0, "2024-01-01T10:00:00Z"),
            record("b", 12.5, "2024-01-01T11:00:00Z"),
            record("c", 0.5, "2024-01-01T12:00:00Z"),
        ];

        assert_eq!(min_amount(&records), Some(0.5));
        assert_eq!(max_amount(&records), Some(12.5));
        assert_eq!(min_amount(&[]), None);
        assert_eq!(max_amount(&[]), None);
    }

    #[test]
    fn test_recent_history_takes_newest_three_across_lists() {
        let incomes = vec![
            record("i1", 1.0, "2024-01-01T00:00:00Z"),
            record("i2", 2.0, "2024-01-04T00:00:00Z"),
        ];
        let expenses = vec![
            record("e1", 3.0, "2024-01-02T00:00:00Z"),
            record("e2", 4.0, "2024-01-03T00:00:00Z"),
        ];

        let history = recent_history(&incomes, &expenses);

        let ids: Vec<&str> = history.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["i2", "e2", "e1"]);
    }

    #[test]
    fn test_recent_history_unparsable_created_at_sorts_last() {
        let incomes = vec![record("bad", 1.0, "whenever")];
        let expenses = vec![
            record("e1", 2.0, "2024-01-01T00:00:00Z"),
            record("e2", 3.0, "2024-01-02T00:00:00Z"),
        ];

        let history = recent_history(&incomes, &expenses);

        let ids: Vec<&str> = history.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["e2", "e1", "bad"]);
    }
}
