//! Yahoo Finance implementation of [`DataSource`].
//!
//! Quotes come from the v7 quote API; statements from the
//! fundamentals-timeseries API, which needs no cookie or crumb.

mod quote;
mod timeseries;
mod wire;

use crate::core::FsClient;
use crate::source::{DataSource, Frequency, RawQuote, RawStatement, SourceFuture, StatementKind};

/// Yahoo-backed data source.
///
/// # Example
///
/// ```no_run
/// # use finsight::{FsClient, YahooSource, DataSource, StatementKind};
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = YahooSource::new(FsClient::new()?);
/// let income = source.statement("PDD", StatementKind::Income).await?;
/// println!("latest period: {:?}", income.latest_period());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct YahooSource {
    client: FsClient,
    frequency: Frequency,
}

impl YahooSource {
    /// Creates a source that requests annual statements.
    pub fn new(client: FsClient) -> Self {
        Self {
            client,
            frequency: Frequency::Annual,
        }
    }

    /// Switches between annual and quarterly statements.
    #[must_use]
    pub const fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }
}

impl DataSource for YahooSource {
    fn quote<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, RawQuote> {
        Box::pin(quote::fetch_quote(&self.client, symbol))
    }

    fn statement<'a>(
        &'a self,
        symbol: &'a str,
        kind: StatementKind,
    ) -> SourceFuture<'a, RawStatement> {
        Box::pin(timeseries::fetch_statement(
            &self.client,
            symbol,
            kind,
            self.frequency,
        ))
    }
}
