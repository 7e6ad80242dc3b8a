//! The per-symbol record written by the exporters.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::normalize::{FieldMap, NormalizedStatement, normalize};
use crate::ratios::{RatioSet, compute_ratios};
use crate::source::{RawQuote, RawStatement, StatementKind};

/// Timestamp format used inside documents.
pub const UPDATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Timestamp format used in output file names.
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Quote fields with the missing-data policy applied: numbers default to `0.0`,
/// the company name to `"N/A"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockInfo {
    pub symbol: String,
    pub company_name: String,
    pub current_price: f64,
    pub previous_close: f64,
    pub market_cap: f64,
    pub volume: f64,
    pub avg_volume: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub year_high: f64,
    pub year_low: f64,
    pub pe_ratio: f64,
    pub pb_ratio: f64,
    pub dividend_yield: f64,
    pub beta: f64,
    pub update_time: String,
}

impl StockInfo {
    pub fn from_quote(symbol: &str, quote: RawQuote, update_time: impl Into<String>) -> Self {
        let num = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(0.0);
        Self {
            symbol: symbol.to_string(),
            company_name: quote.long_name.unwrap_or_else(|| "N/A".to_string()),
            current_price: num(quote.regular_market_price),
            previous_close: num(quote.previous_close),
            market_cap: num(quote.market_cap),
            volume: num(quote.volume),
            avg_volume: num(quote.avg_volume),
            day_high: num(quote.day_high),
            day_low: num(quote.day_low),
            year_high: num(quote.fifty_two_week_high),
            year_low: num(quote.fifty_two_week_low),
            pe_ratio: num(quote.trailing_pe),
            pb_ratio: num(quote.price_to_book),
            dividend_yield: num(quote.dividend_yield),
            beta: num(quote.beta),
            update_time: update_time.into(),
        }
    }
}

/// The three normalized statements of one fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialData {
    pub symbol: String,
    pub income_statement: NormalizedStatement,
    pub balance_sheet: NormalizedStatement,
    pub cash_flow: NormalizedStatement,
    pub update_time: String,
}

impl FinancialData {
    pub fn statement(&self, kind: StatementKind) -> &NormalizedStatement {
        match kind {
            StatementKind::Income => &self.income_statement,
            StatementKind::Balance => &self.balance_sheet,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }
}

/// Everything fetched and derived for one symbol in one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRecord {
    pub stock_info: StockInfo,
    pub financial_data: FinancialData,
    pub financial_ratios: RatioSet,
    #[serde(skip)]
    pub fetched_at: DateTime<Local>,
}

/// Raw inputs for one symbol, as returned by a data source.
#[derive(Debug, Clone, Default)]
pub struct RawCompanyData {
    pub quote: RawQuote,
    pub income: RawStatement,
    pub balance: RawStatement,
    pub cash_flow: RawStatement,
}

impl CompanyRecord {
    /// Normalizes the raw statements, derives ratios, and stamps the record.
    pub fn assemble(symbol: &str, raw: RawCompanyData, fetched_at: DateTime<Local>) -> Self {
        let update_time = fetched_at.format(UPDATE_TIME_FORMAT).to_string();

        let income = normalize(&raw.income, FieldMap::for_kind(StatementKind::Income));
        let balance = normalize(&raw.balance, FieldMap::for_kind(StatementKind::Balance));
        let cash_flow = normalize(&raw.cash_flow, FieldMap::for_kind(StatementKind::CashFlow));
        let financial_ratios = compute_ratios(&income, &balance);

        Self {
            stock_info: StockInfo::from_quote(symbol, raw.quote, update_time.clone()),
            financial_data: FinancialData {
                symbol: symbol.to_string(),
                income_statement: income,
                balance_sheet: balance,
                cash_flow,
                update_time,
            },
            financial_ratios,
            fetched_at,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.stock_info.symbol
    }

    /// Stem shared by all output files of this record, e.g. `PDD_data_20240102_093000`.
    pub fn file_stem(&self) -> String {
        format!(
            "{}_data_{}",
            self.symbol(),
            self.fetched_at.format(FILE_STAMP_FORMAT)
        )
    }
}
