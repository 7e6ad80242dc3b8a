use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::core::wire::{finite, from_raw};
use crate::core::{FsClient, FsError, net};
use crate::source::{Frequency, RawStatement, StatementKind};

use super::wire::{TimeseriesData, TimeseriesEnvelope, TimeseriesValue};

const INCOME_KEYS: &[&str] = &[
    "TotalRevenue",
    "GrossProfit",
    "OperatingIncome",
    "NetIncome",
    "EBITDA",
];

const BALANCE_KEYS: &[&str] = &[
    "TotalAssets",
    "TotalLiabilitiesNetMinorityInterest",
    "StockholdersEquity",
    "CashAndCashEquivalents",
    "TotalDebt",
];

const CASH_FLOW_KEYS: &[&str] = &[
    "OperatingCashFlow",
    "InvestingCashFlow",
    "FinancingCashFlow",
    "FreeCashFlow",
    "CapitalExpenditure",
];

/// How far back the timeseries request reaches.
const LOOKBACK_DAYS: i64 = 365 * 5;

pub(crate) const fn keys_for(kind: StatementKind) -> &'static [&'static str] {
    match kind {
        StatementKind::Income => INCOME_KEYS,
        StatementKind::Balance => BALANCE_KEYS,
        StatementKind::CashFlow => CASH_FLOW_KEYS,
    }
}

/// Fetches one statement from `/ws/fundamentals-timeseries` and lays it out
/// as a [`RawStatement`] keyed by un-prefixed line-item names.
#[tracing::instrument(skip(client), err)]
pub(crate) async fn fetch_statement(
    client: &FsClient,
    symbol: &str,
    kind: StatementKind,
    frequency: Frequency,
) -> Result<RawStatement, FsError> {
    let prefix = frequency.prefix();
    let type_str = keys_for(kind)
        .iter()
        .map(|k| format!("{prefix}{k}"))
        .collect::<Vec<_>>()
        .join(",");

    let end = Utc::now();
    let start = end
        .checked_sub_signed(Duration::days(LOOKBACK_DAYS))
        .map_or(0, |dt| dt.timestamp());

    let mut url = client.base_timeseries().join(symbol)?;
    url.query_pairs_mut()
        .append_pair("symbol", symbol)
        .append_pair("type", &type_str)
        .append_pair("period1", &start.to_string())
        .append_pair("period2", &end.timestamp().to_string());

    let resp = client.send(client.http().get(url)).await?;
    let endpoint = format!("timeseries_{kind}_{prefix}");
    let body = net::get_text(resp, &endpoint, symbol, "json").await?;

    let statement = parse_statement(&body, prefix)?;
    let statement = if kind == StatementKind::CashFlow {
        fill_free_cash_flow(statement)
    } else {
        statement
    };

    tracing::debug!(
        symbol,
        %kind,
        periods = statement.periods().count(),
        rows = statement.labels().count(),
        "statement received"
    );
    Ok(statement)
}

/// Turns a timeseries response body into a [`RawStatement`].
pub(crate) fn parse_statement(body: &str, prefix: &str) -> Result<RawStatement, FsError> {
    let envelope: TimeseriesEnvelope = serde_json::from_str(body)?;
    let Some(node) = envelope.timeseries else {
        return Ok(RawStatement::new());
    };

    if let Some(err) = node.error.filter(|e| !e.is_null()) {
        return Err(FsError::Data(format!("yahoo timeseries error: {err}")));
    }

    let mut statement = RawStatement::new();
    for item in node.result.unwrap_or_default() {
        add_series(&mut statement, item, prefix)?;
    }
    Ok(statement)
}

fn add_series(
    statement: &mut RawStatement,
    mut item: TimeseriesData,
    prefix: &str,
) -> Result<(), FsError> {
    let key = item
        .meta
        .and_then(|m| m.types)
        .and_then(|mut t| t.pop())
        .or_else(|| item.values.keys().next().cloned());
    let Some(key) = key else {
        return Ok(());
    };
    let Some(values_json) = item.values.remove(&key) else {
        // Yahoo lists the requested type in `meta` even when it has no data.
        return Ok(());
    };

    let label = key.strip_prefix(prefix).unwrap_or(&key).to_string();
    let values: Vec<Option<TimeseriesValue>> = serde_json::from_value(values_json)?;
    let timestamps = item.timestamp.unwrap_or_default();

    for (i, value) in values.into_iter().enumerate() {
        let Some(value) = value else { continue };
        let period = value
            .as_of_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .or_else(|| {
                timestamps
                    .get(i)
                    .and_then(|ts| DateTime::<Utc>::from_timestamp(*ts, 0))
                    .map(|dt| dt.date_naive())
            });
        let Some(period) = period else {
            tracing::warn!(label = %label, index = i, "timeseries entry without a date; skipped");
            continue;
        };
        statement.insert(label.clone(), period, finite(from_raw(value.reported_value)));
    }
    Ok(())
}

/// Derives free cash flow where it is missing; capex is reported negative.
fn fill_free_cash_flow(mut statement: RawStatement) -> RawStatement {
    let periods: Vec<NaiveDate> = statement.periods().collect();
    for period in periods {
        if statement.value("FreeCashFlow", period).is_some() {
            continue;
        }
        if let (Some(ocf), Some(capex)) = (
            statement.value("OperatingCashFlow", period),
            statement.value("CapitalExpenditure", period),
        ) {
            statement.insert("FreeCashFlow", period, Some(ocf + capex));
        }
    }
    statement
}
