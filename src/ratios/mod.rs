//! Percentage ratios derived from a normalized income statement and balance sheet.
//!
//! Every ratio is a row in [`RATIOS`]; adding one is a table change. Each row is
//! guarded on its own, so a zero denominator drops that ratio and nothing else.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::normalize::NormalizedStatement;

/// Where a ratio operand is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Income(&'static str),
    Balance(&'static str),
}

impl Operand {
    fn resolve(self, income: &NormalizedStatement, balance: &NormalizedStatement) -> Option<f64> {
        match self {
            Self::Income(field) => income.get(field),
            Self::Balance(field) => balance.get(field),
        }
    }
}

/// One derived ratio: `numerator / denominator * 100`, computed only when `guard` holds.
#[derive(Debug, Clone, Copy)]
pub struct RatioDef {
    pub name: &'static str,
    pub numerator: Operand,
    pub denominator: Operand,
    pub guard: fn(f64, f64) -> bool,
}

/// Missing fields are stored as zero, so a zero operand is treated as unreported.
pub fn both_reported(numerator: f64, denominator: f64) -> bool {
    numerator != 0.0 && denominator != 0.0
}

pub const RATIOS: &[RatioDef] = &[
    RatioDef {
        name: "gross_margin",
        numerator: Operand::Income("gross_profit"),
        denominator: Operand::Income("total_revenue"),
        guard: both_reported,
    },
    RatioDef {
        name: "net_margin",
        numerator: Operand::Income("net_income"),
        denominator: Operand::Income("total_revenue"),
        guard: both_reported,
    },
    RatioDef {
        name: "roe",
        numerator: Operand::Income("net_income"),
        denominator: Operand::Balance("total_equity"),
        guard: both_reported,
    },
    RatioDef {
        name: "roa",
        numerator: Operand::Income("net_income"),
        denominator: Operand::Balance("total_assets"),
        guard: both_reported,
    },
    RatioDef {
        name: "debt_to_assets",
        numerator: Operand::Balance("total_liabilities"),
        denominator: Operand::Balance("total_assets"),
        guard: both_reported,
    },
    RatioDef {
        name: "equity_ratio",
        numerator: Operand::Balance("total_equity"),
        denominator: Operand::Balance("total_assets"),
        guard: both_reported,
    },
];

/// Ratio name to percentage value, holding only the ratios that could be computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatioSet {
    values: Vec<(&'static str, f64)>,
}

impl RatioSet {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().copied()
    }
}

impl Serialize for RatioSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// Evaluates the built-in [`RATIOS`] table.
pub fn compute_ratios(income: &NormalizedStatement, balance: &NormalizedStatement) -> RatioSet {
    compute_with(RATIOS, income, balance)
}

/// Evaluates an arbitrary ratio table. Either statement being empty yields an empty set.
pub fn compute_with(
    table: &[RatioDef],
    income: &NormalizedStatement,
    balance: &NormalizedStatement,
) -> RatioSet {
    if income.is_empty() || balance.is_empty() {
        return RatioSet::default();
    }

    let values = table
        .iter()
        .filter_map(|def| {
            let num = def.numerator.resolve(income, balance)?;
            let den = def.denominator.resolve(income, balance)?;
            if !(def.guard)(num, den) {
                return None;
            }
            let pct = num / den * 100.0;
            pct.is_finite().then_some((def.name, pct))
        })
        .collect();

    RatioSet { values }
}
