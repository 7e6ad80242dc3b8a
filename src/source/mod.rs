//! The data-source seam: raw statement tables, raw quote fields, and the
//! [`DataSource`] trait the updater pulls them through.
//!
//! [`yahoo::YahooSource`] is the production implementation; tests plug in
//! in-memory sources.

mod statement;
pub mod yahoo;

pub use statement::RawStatement;

use crate::core::FsError;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// The three financial statements a company reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Income,
    Balance,
    CashFlow,
}

impl StatementKind {
    /// All statement kinds, in report order.
    pub const ALL: [Self; 3] = [Self::Income, Self::Balance, Self::CashFlow];

    /// The key this statement is stored under in a company record.
    pub const fn record_key(self) -> &'static str {
        match self {
            Self::Income => "income_statement",
            Self::Balance => "balance_sheet",
            Self::CashFlow => "cash_flow",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_key())
    }
}

/// Reporting frequency requested from the upstream API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Frequency {
    #[default]
    Annual,
    Quarterly,
}

impl Frequency {
    pub(crate) const fn prefix(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }
}

/// Quote fields exactly as the provider reported them; anything may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQuote {
    pub long_name: Option<String>,
    pub regular_market_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume: Option<f64>,
    pub avg_volume: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub price_to_book: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub beta: Option<f64>,
}

/// Boxed future returned by [`DataSource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, FsError>> + Send + 'a>>;

/// A provider of quote and statement data for ticker symbols.
///
/// Implemented by [`yahoo::YahooSource`]. The trait is object safe so the
/// updater can hold any provider behind a `Box<dyn DataSource>`.
pub trait DataSource: Send + Sync {
    /// Fetches the current quote fields for `symbol`.
    fn quote<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, RawQuote>;

    /// Fetches one raw financial statement for `symbol`.
    ///
    /// A provider that has no data for the statement returns an empty
    /// [`RawStatement`] rather than an error.
    fn statement<'a>(
        &'a self,
        symbol: &'a str,
        kind: StatementKind,
    ) -> SourceFuture<'a, RawStatement>;
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn quote<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, RawQuote> {
        (**self).quote(symbol)
    }

    fn statement<'a>(
        &'a self,
        symbol: &'a str,
        kind: StatementKind,
    ) -> SourceFuture<'a, RawStatement> {
        (**self).statement(symbol, kind)
    }
}
