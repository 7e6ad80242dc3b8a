//! finsight: periodic company-fundamentals reports from Yahoo Finance.
//!
//! For each symbol on a watchlist the crate fetches a quote and the income,
//! balance and cash-flow statements, reduces each statement to a fixed set of
//! canonical fields for its most recent period, derives percentage ratios, and
//! writes the result as JSON and as a multi-sheet spreadsheet.
//!
//! ```no_run
//! use finsight::{FsClient, Updater, UpdaterConfig, YahooSource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), finsight::FsError> {
//! let source = YahooSource::new(FsClient::new()?);
//! let updater = Updater::new(source, UpdaterConfig::default());
//! let report = updater.update_all().await;
//! println!("{} updated, {} failed", report.updated.len(), report.failed.len());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod export;
pub mod normalize;
pub mod ratios;
pub mod record;
pub mod schedule;
pub mod source;
pub mod updater;

pub use crate::core::{FsClient, FsClientBuilder, FsError};
pub use export::{Exporter, JsonExporter, XlsxExporter};
pub use normalize::{FieldMap, FieldSpec, NormalizedStatement, normalize};
pub use ratios::{RATIOS, RatioDef, RatioSet, compute_ratios};
pub use record::{CompanyRecord, FinancialData, RawCompanyData, StockInfo};
pub use schedule::{Schedule, Scheduler};
pub use source::yahoo::YahooSource;
pub use source::{DataSource, Frequency, RawQuote, RawStatement, StatementKind};
pub use updater::{BatchReport, Company, UpdateOutcome, Updater, UpdaterConfig};
