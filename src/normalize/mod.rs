//! Statement normalization: pick the most recent period of a [`RawStatement`]
//! and read a fixed set of canonical fields out of it.
//!
//! Missing line items become `0.0`, so ratio math downstream never fails on a
//! lookup. A statement with no periods at all normalizes to an empty record.

mod fields;

pub use fields::{BALANCE_FIELDS, CASH_FLOW_FIELDS, FieldMap, FieldSpec, INCOME_FIELDS};

use chrono::Datelike;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::source::RawStatement;

/// One statement reduced to canonical fields for a single fiscal period.
///
/// Field order follows the [`FieldMap`] it was built from. Values are always
/// finite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedStatement {
    fiscal_year: Option<i32>,
    values: Vec<(&'static str, f64)>,
}

impl NormalizedStatement {
    /// The "no data available" statement.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a statement from explicit values. Non-finite values are stored as `0.0`.
    pub fn new(
        fiscal_year: i32,
        values: impl IntoIterator<Item = (&'static str, f64)>,
    ) -> Self {
        Self {
            fiscal_year: Some(fiscal_year),
            values: values
                .into_iter()
                .map(|(k, v)| (k, if v.is_finite() { v } else { 0.0 }))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fiscal_year.is_none() && self.values.is_empty()
    }

    /// Calendar year of the selected period's end date.
    pub fn fiscal_year(&self) -> Option<i32> {
        self.fiscal_year
    }

    /// The value of a canonical field; `None` only when the statement does not carry that field.
    pub fn get(&self, field: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, v)| *v)
    }

    /// Canonical fields in field-map order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().copied()
    }
}

impl Serialize for NormalizedStatement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.values.len() + usize::from(self.fiscal_year.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        if let Some(year) = self.fiscal_year {
            map.serialize_entry("fiscal_year", &year)?;
        }
        map.end()
    }
}

/// Reduces `raw` to the canonical fields of `map` for its most recent period.
///
/// For each field the first label with a finite value in that period wins;
/// otherwise the field is `0.0`. Pure: the same input always yields the same output.
pub fn normalize(raw: &RawStatement, map: &FieldMap) -> NormalizedStatement {
    let Some(period) = raw.latest_period() else {
        return NormalizedStatement::empty();
    };

    let values = map
        .fields
        .iter()
        .map(|spec| {
            let value = spec
                .labels
                .iter()
                .find_map(|label| raw.value(label, period).filter(|v| v.is_finite()))
                .unwrap_or(0.0);
            (spec.name, value)
        })
        .collect();

    NormalizedStatement {
        fiscal_year: Some(period.year()),
        values,
    }
}
