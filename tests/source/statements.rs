use crate::common::{d, mock_timeseries, setup_server, source_for};
use finsight::{DataSource, FieldMap, StatementKind, normalize};

#[tokio::test]
async fn income_statement_from_timeseries() {
    let server = setup_server();
    let mock = mock_timeseries(&server, "PDD", StatementKind::Income);

    let raw = source_for(&server)
        .statement("PDD", StatementKind::Income)
        .await
        .unwrap();
    mock.assert();

    assert_eq!(raw.latest_period(), Some(d(2023, 12, 31)));
    assert_eq!(
        raw.periods().collect::<Vec<_>>(),
        vec![d(2023, 12, 31), d(2022, 12, 31)]
    );
    assert_eq!(raw.value("TotalRevenue", d(2022, 12, 31)), Some(130_557_589_000.0));
    assert_eq!(raw.value("OperatingIncome", d(2022, 12, 31)), None);
    assert_eq!(
        raw.labels().collect::<Vec<_>>(),
        ["GrossProfit", "NetIncome", "OperatingIncome", "TotalRevenue"]
    );
    assert!(!raw.has_row("annualTotalRevenue"));
    assert!(!raw.has_row("EBITDA"));

    let income = normalize(&raw, FieldMap::for_kind(StatementKind::Income));
    assert_eq!(income.fiscal_year(), Some(2023));
    assert_eq!(income.get("total_revenue"), Some(200_000_000_000.0));
    assert_eq!(income.get("gross_profit"), Some(120_000_000_000.0));
    assert_eq!(income.get("net_income"), Some(40_000_000_000.0));
    assert_eq!(income.get("ebitda"), Some(0.0));
}

#[tokio::test]
async fn balance_sheet_reads_liabilities_net_of_minority_interest() {
    let server = setup_server();
    let _mock = mock_timeseries(&server, "PDD", StatementKind::Balance);

    let raw = source_for(&server)
        .statement("PDD", StatementKind::Balance)
        .await
        .unwrap();
    let balance = normalize(&raw, FieldMap::for_kind(StatementKind::Balance));

    assert_eq!(balance.get("total_assets"), Some(400_000_000_000.0));
    assert_eq!(balance.get("total_liabilities"), Some(150_000_000_000.0));
    assert_eq!(balance.get("total_equity"), Some(250_000_000_000.0));
    assert_eq!(balance.get("total_debt"), Some(10_000_000_000.0));
}

#[tokio::test]
async fn cash_flow_derives_missing_free_cash_flow() {
    let server = setup_server();
    let _mock = mock_timeseries(&server, "PDD", StatementKind::CashFlow);

    let raw = source_for(&server)
        .statement("PDD", StatementKind::CashFlow)
        .await
        .unwrap();
    let cash_flow = normalize(&raw, FieldMap::for_kind(StatementKind::CashFlow));

    assert_eq!(cash_flow.get("operating_cash_flow"), Some(60_000_000_000.0));
    assert_eq!(cash_flow.get("investing_cash_flow"), Some(-20_000_000_000.0));
    assert_eq!(cash_flow.get("free_cash_flow"), Some(59_000_000_000.0));
}

#[tokio::test]
async fn empty_timeseries_is_an_empty_statement() {
    let server = setup_server();
    let _mock = server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/ws/fundamentals-timeseries/v1/finance/timeseries/NEWCO");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"timeseries":{"result":[],"error":null}}"#);
    });

    let raw = source_for(&server)
        .statement("NEWCO", StatementKind::Balance)
        .await
        .unwrap();
    assert!(raw.is_empty());
    assert!(normalize(&raw, FieldMap::for_kind(StatementKind::Balance)).is_empty());
}
