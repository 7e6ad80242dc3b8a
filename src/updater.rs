//! The per-symbol pipeline (fetch, normalize, derive, export) and the batch
//! driver that runs it over a watchlist.
//!
//! Failures never escape a symbol: a fetch error aborts only that symbol, an
//! export error only that file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::core::FsError;
use crate::export::{Exporter, default_exporters};
use crate::record::{CompanyRecord, RawCompanyData};
use crate::source::{DataSource, StatementKind};

/// A tracked company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub symbol: String,
    pub name: String,
}

impl Company {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// The built-in watchlist.
pub fn default_watchlist() -> Vec<Company> {
    vec![
        Company::new("PDD", "拼多多"),
        Company::new("BABA", "阿里巴巴"),
        Company::new("JD", "京东"),
        Company::new("TME", "腾讯音乐"),
        Company::new("NIO", "蔚来"),
    ]
}

const MAX_SYMBOL_LEN: usize = 16;

/// Checks that `symbol` looks like a ticker: ASCII alphanumerics plus `.`, `-`
/// and `^`, starting with an alphanumeric or `^`.
///
/// Symbols end up in request paths and output file names, so anything else is refused.
///
/// # Errors
///
/// `FsError::Data` naming the rejected symbol.
pub fn validate_symbol(symbol: &str) -> Result<(), FsError> {
    let valid_first = symbol
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '^');
    let valid_rest = symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^'));
    if valid_first && valid_rest && symbol.len() <= MAX_SYMBOL_LEN {
        Ok(())
    } else {
        Err(FsError::Data(format!("invalid ticker symbol {symbol:?}")))
    }
}

/// Reads a watchlist from a JSON array of `{"symbol": ..., "name": ...}` objects.
///
/// # Errors
///
/// Fails if the file cannot be read, is not such an array, or lists a symbol
/// that [`validate_symbol`] rejects.
pub fn load_watchlist(path: &Path) -> Result<Vec<Company>, FsError> {
    let text = std::fs::read_to_string(path)?;
    let companies: Vec<Company> = serde_json::from_str(&text)?;
    for company in &companies {
        validate_symbol(&company.symbol)?;
    }
    Ok(companies)
}

/// Where and how the updater writes its output.
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    /// Directory that receives the JSON and spreadsheet files; created on demand.
    pub out_dir: PathBuf,
    /// Pause between two symbols of a batch.
    pub pause: Duration,
    pub companies: Vec<Company>,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("data_templates"),
            pause: Duration::from_secs(2),
            companies: default_watchlist(),
        }
    }
}

/// Result of one successful symbol update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub symbol: String,
    /// Files that were written.
    pub written: Vec<PathBuf>,
    /// Exporters that failed; their errors were logged.
    pub failed_exports: usize,
    /// Number of ratios that could be derived.
    pub ratios: usize,
}

/// Summary of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub updated: Vec<UpdateOutcome>,
    pub failed: Vec<(String, FsError)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.updated.iter().all(|o| o.failed_exports == 0)
    }
}

/// Drives the pipeline for the configured companies.
pub struct Updater<S> {
    source: S,
    config: UpdaterConfig,
    exporters: Vec<Box<dyn Exporter>>,
}

impl<S: DataSource> Updater<S> {
    /// An updater writing JSON and spreadsheet files.
    pub fn new(source: S, config: UpdaterConfig) -> Self {
        Self {
            source,
            config,
            exporters: default_exporters(),
        }
    }

    /// Replaces the exporters.
    #[must_use]
    pub fn with_exporters(mut self, exporters: Vec<Box<dyn Exporter>>) -> Self {
        self.exporters = exporters;
        self
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    pub fn companies(&self) -> &[Company] {
        &self.config.companies
    }

    /// Fetches the quote and the three statements for `symbol`, one after another.
    ///
    /// # Errors
    ///
    /// The first failing upstream call.
    pub async fn fetch(&self, symbol: &str) -> Result<RawCompanyData, FsError> {
        let quote = self.source.quote(symbol).await?;
        let income = self.source.statement(symbol, StatementKind::Income).await?;
        let balance = self.source.statement(symbol, StatementKind::Balance).await?;
        let cash_flow = self.source.statement(symbol, StatementKind::CashFlow).await?;
        Ok(RawCompanyData {
            quote,
            income,
            balance,
            cash_flow,
        })
    }

    /// Runs the full pipeline for one company.
    ///
    /// # Errors
    ///
    /// Only fetch failures; export failures are logged and counted in the outcome.
    #[tracing::instrument(skip(self, company), fields(symbol = %company.symbol))]
    pub async fn update_company(&self, company: &Company) -> Result<UpdateOutcome, FsError> {
        info!(name = %company.name, "updating company data");

        let raw = match self.fetch(&company.symbol).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(name = %company.name, error = %e, "update failed");
                return Err(e);
            }
        };

        let record = CompanyRecord::assemble(&company.symbol, raw, Local::now());
        if record.financial_ratios.is_empty() {
            warn!("no ratios could be derived");
        }

        let (written, failed_exports) = self.export(&record);
        info!(
            name = %company.name,
            files = written.len(),
            failed_exports,
            "update complete"
        );

        Ok(UpdateOutcome {
            symbol: company.symbol.clone(),
            written,
            failed_exports,
            ratios: record.financial_ratios.len(),
        })
    }

    fn export(&self, record: &CompanyRecord) -> (Vec<PathBuf>, usize) {
        if let Err(e) = std::fs::create_dir_all(&self.config.out_dir) {
            error!(
                dir = %self.config.out_dir.display(),
                error = %e,
                "cannot create output directory"
            );
            return (Vec::new(), self.exporters.len());
        }

        let mut written = Vec::with_capacity(self.exporters.len());
        let mut failed = 0;
        for exporter in &self.exporters {
            match exporter.export(record, &self.config.out_dir) {
                Ok(path) => written.push(path),
                Err(e) => {
                    failed += 1;
                    error!(format = exporter.extension(), error = %e, "export failed");
                }
            }
        }
        (written, failed)
    }

    /// Updates every company in order, pausing between symbols.
    pub async fn update_all(&self) -> BatchReport {
        let started = Local::now();
        info!(companies = self.config.companies.len(), "starting batch update");

        let mut report = BatchReport::default();
        for (i, company) in self.config.companies.iter().enumerate() {
            if i > 0 && !self.config.pause.is_zero() {
                tokio::time::sleep(self.config.pause).await;
            }
            match self.update_company(company).await {
                Ok(outcome) => report.updated.push(outcome),
                Err(e) => report.failed.push((company.symbol.clone(), e)),
            }
        }

        info!(
            updated = report.updated.len(),
            failed = report.failed.len(),
            elapsed_secs = (Local::now() - started).num_seconds(),
            "batch update complete"
        );
        report
    }

    /// Updates the watchlist company with the given symbol (case-insensitive).
    ///
    /// # Errors
    ///
    /// `FsError::UnknownSymbol` when the symbol is not on the watchlist, or the
    /// fetch error of that company.
    pub async fn update_symbol(&self, symbol: &str) -> Result<UpdateOutcome, FsError> {
        let Some(company) = self
            .config
            .companies
            .iter()
            .find(|c| c.symbol.eq_ignore_ascii_case(symbol))
        else {
            error!(symbol, "company not found in watchlist");
            return Err(FsError::UnknownSymbol(symbol.to_string()));
        };
        self.update_company(company).await
    }
}
