#![allow(dead_code)]

use chrono::NaiveDate;
use finsight::{
    DataSource, FsClient, FsError, RawQuote, RawStatement, StatementKind, YahooSource,
    source::SourceFuture,
};
use httpmock::{Method::GET, Mock, MockServer};
use std::collections::HashMap;
use std::{fs, path::Path};
use url::Url;

pub const INCOME_TYPES: &str =
    "annualTotalRevenue,annualGrossProfit,annualOperatingIncome,annualNetIncome,annualEBITDA";
pub const BALANCE_TYPES: &str = "annualTotalAssets,annualTotalLiabilitiesNetMinorityInterest,\
annualStockholdersEquity,annualCashAndCashEquivalents,annualTotalDebt";
pub const CASH_FLOW_TYPES: &str = "annualOperatingCashFlow,annualInvestingCashFlow,\
annualFinancingCashFlow,annualFreeCashFlow,annualCapitalExpenditure";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(endpoint: &str, symbol: &str, ext: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filename = format!("{}_{}.{}", endpoint, symbol, ext);
    let path = dir.join(&filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// A client whose endpoints all point at the mock server.
pub fn client_for(server: &MockServer) -> FsClient {
    FsClient::builder()
        .base_quote_v7(Url::parse(&format!("{}/v7/finance/quote", server.base_url())).unwrap())
        .base_timeseries(
            Url::parse(&format!(
                "{}/ws/fundamentals-timeseries/v1/finance/timeseries/",
                server.base_url()
            ))
            .unwrap(),
        )
        .build()
        .unwrap()
}

pub fn source_for(server: &MockServer) -> YahooSource {
    YahooSource::new(client_for(server))
}

pub fn mock_quote_v7<'a>(server: &'a MockServer, symbol: &'a str) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/v7/finance/quote")
            .query_param("symbols", symbol);
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("quote_v7", symbol, "json"));
    })
}

pub fn mock_timeseries<'a>(
    server: &'a MockServer,
    symbol: &'a str,
    kind: StatementKind,
) -> Mock<'a> {
    let types = match kind {
        StatementKind::Income => INCOME_TYPES,
        StatementKind::Balance => BALANCE_TYPES,
        StatementKind::CashFlow => CASH_FLOW_TYPES,
    };
    server.mock(|when, then| {
        when.method(GET)
            .path(format!(
                "/ws/fundamentals-timeseries/v1/finance/timeseries/{}",
                symbol
            ))
            .query_param("symbol", symbol)
            .query_param("type", types)
            .query_param_exists("period1")
            .query_param_exists("period2");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture(&format!("timeseries_{kind}_annual"), symbol, "json"));
    })
}

/// Mocks every endpoint a full company update touches.
pub fn mock_company<'a>(server: &'a MockServer, symbol: &'a str) -> Vec<Mock<'a>> {
    let mut mocks = vec![mock_quote_v7(server, symbol)];
    mocks.extend(StatementKind::ALL.map(|kind| mock_timeseries(server, symbol, kind)));
    mocks
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// In-memory source; symbols without an entry fail with `NotFound`.
#[derive(Default)]
pub struct StaticSource {
    companies: HashMap<String, StaticCompany>,
}

#[derive(Clone, Default)]
pub struct StaticCompany {
    pub quote: RawQuote,
    pub income: RawStatement,
    pub balance: RawStatement,
    pub cash_flow: RawStatement,
}

impl StaticSource {
    pub fn with(mut self, symbol: &str, company: StaticCompany) -> Self {
        self.companies.insert(symbol.to_string(), company);
        self
    }

    fn lookup(&self, symbol: &str) -> Result<&StaticCompany, FsError> {
        self.companies.get(symbol).ok_or_else(|| FsError::NotFound {
            url: format!("memory://{symbol}"),
        })
    }
}

impl DataSource for StaticSource {
    fn quote<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, RawQuote> {
        Box::pin(async move { self.lookup(symbol).map(|c| c.quote.clone()) })
    }

    fn statement<'a>(
        &'a self,
        symbol: &'a str,
        kind: StatementKind,
    ) -> SourceFuture<'a, RawStatement> {
        Box::pin(async move {
            let company = self.lookup(symbol)?;
            Ok(match kind {
                StatementKind::Income => company.income.clone(),
                StatementKind::Balance => company.balance.clone(),
                StatementKind::CashFlow => company.cash_flow.clone(),
            })
        })
    }
}

/// A company with a full set of statements for fiscal 2023.
pub fn sample_company() -> StaticCompany {
    let fy = d(2023, 12, 31);
    StaticCompany {
        quote: RawQuote {
            long_name: Some("Sample Holdings".into()),
            regular_market_price: Some(100.0),
            market_cap: Some(1.0e9),
            ..RawQuote::default()
        },
        income: RawStatement::new()
            .with("Total Revenue", fy, 1000.0)
            .with("Gross Profit", fy, 400.0)
            .with("Net Income", fy, 100.0),
        balance: RawStatement::new()
            .with("Total Assets", fy, 2000.0)
            .with("Total Liabilities Net Minority Interest", fy, 1500.0)
            .with("Stockholders Equity", fy, 500.0),
        cash_flow: RawStatement::new().with("Operating Cash Flow", fy, 150.0),
    }
}
