use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// A financial statement as delivered upstream: line items by fiscal period.
///
/// Rows are keyed by the provider's line-item label, columns by the period's
/// end date. A cell may be absent even when both its row and its column exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStatement {
    periods: BTreeSet<NaiveDate>,
    rows: BTreeMap<String, BTreeMap<NaiveDate, f64>>,
}

impl RawStatement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cell. The period column is registered even when `value` is `None`.
    pub fn insert(&mut self, label: impl Into<String>, period: NaiveDate, value: Option<f64>) {
        self.periods.insert(period);
        let row = self.rows.entry(label.into()).or_default();
        if let Some(v) = value {
            row.insert(period, v);
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, period: NaiveDate, value: f64) -> Self {
        self.insert(label, period, Some(value));
        self
    }

    /// True when the statement has no period columns at all.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// The most recent period end date, chosen by date rather than by column position.
    pub fn latest_period(&self) -> Option<NaiveDate> {
        self.periods.last().copied()
    }

    /// Period end dates, most recent first.
    pub fn periods(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.periods.iter().rev().copied()
    }

    /// Line-item labels present in the statement.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn has_row(&self, label: &str) -> bool {
        self.rows.contains_key(label)
    }

    /// The value reported for `label` in `period`, if any.
    pub fn value(&self, label: &str, period: NaiveDate) -> Option<f64> {
        self.rows.get(label)?.get(&period).copied()
    }
}
