//! The service history view.

use serde::Serialize;

use crate::record::MaintenanceRecord;

/// A record as shown in the history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    /// 1-based position of the record in the store (insertion order).
    pub entry: usize,
    /// The record itself.
    #[serde(flatten)]
    pub record: MaintenanceRecord,
}

/// Order `records` most recent service first.
///
/// Records serviced on the same day keep their insertion order.
#[must_use]
pub fn sorted(records: &[MaintenanceRecord]) -> Vec<HistoryRow> {
    let mut rows: Vec<HistoryRow> = records
        .iter()
        .enumerate()
        .map(|(i, record)| HistoryRow {
            entry: i + 1,
            record: record.clone(),
        })
        .collect();
    // `sort_by` is stable.
    rows.sort_by(|a, b| b.record.service_date.cmp(&a.record.service_date));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::{date, record};

    #[test]
    fn test_sorted_descending() {
        let records = vec![
            record("A", date(2024, 1, 1), 100),
            record("B", date(2024, 3, 1), 300),
            record("C", date(2024, 2, 1), 200),
        ];

        let parts: Vec<_> = sorted(&records)
            .into_iter()
            .map(|row| row.record.part_or_service)
            .collect();
        assert_eq!(parts, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let same_day = date(2024, 4, 4);
        let records = vec![
            record("first", same_day, 1),
            record("older", date(2023, 1, 1), 0),
            record("second", same_day, 2),
            record("third", same_day, 3),
        ];

        let rows = sorted(&records);
        let entries: Vec<_> = rows.iter().map(|r| r.entry).collect();
        assert_eq!(entries, vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_output_is_non_increasing() {
        let records: Vec<_> = [7u32, 3, 9, 3, 1, 9, 5]
            .into_iter()
            .map(|d| record("x", date(2024, 5, d), d))
            .collect();

        let rows = sorted(&records);
        assert_eq!(rows.len(), records.len());
        assert!(rows
            .windows(2)
            .all(|w| w[0].record.service_date >= w[1].record.service_date));
    }

    #[test]
    fn test_empty() {
        assert!(sorted(&[]).is_empty());
    }

    #[test]
    fn test_row_serializes_flat() {
        let rows = sorted(&[record("Oil", date(2024, 1, 1), 100)]);
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["entry"], 1);
        assert_eq!(json["part_or_service"], "Oil");
        assert_eq!(json["service_date"], "2024-01-01");
    }
}
