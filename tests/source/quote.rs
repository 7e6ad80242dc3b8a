use crate::common::{mock_quote_v7, setup_server, source_for};
use finsight::{DataSource, FsError};
use httpmock::Method::GET;

#[tokio::test]
async fn quote_maps_v7_fields() {
    let server = setup_server();
    let mock = mock_quote_v7(&server, "PDD");

    let quote = source_for(&server).quote("PDD").await.unwrap();
    mock.assert();

    assert_eq!(quote.long_name.as_deref(), Some("PDD Holdings Inc."));
    assert_eq!(quote.regular_market_price, Some(142.5));
    assert_eq!(quote.previous_close, Some(140.1));
    assert_eq!(quote.volume, Some(7_412_300.0));
    assert_eq!(quote.avg_volume, Some(9_120_450.0));
    assert_eq!(quote.fifty_two_week_high, Some(164.69));
    assert_eq!(quote.trailing_pe, Some(18.4));
    assert_eq!(quote.beta, Some(0.71));
    assert_eq!(quote.dividend_yield, None);
}

#[tokio::test]
async fn quote_with_empty_result_is_missing_data() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v7/finance/quote")
            .query_param("symbols", "ZZZZ");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"quoteResponse":{"result":[],"error":null}}"#);
    });

    let err = source_for(&server).quote("ZZZZ").await.unwrap_err();
    mock.assert();
    assert!(matches!(err, FsError::MissingData(_)), "got {err:?}");
}

#[tokio::test]
async fn quote_error_payload_is_data_error() {
    let server = setup_server();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/v7/finance/quote");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"quoteResponse":{"result":null,"error":{"code":"Bad Request"}}}"#);
    });

    let err = source_for(&server).quote("PDD").await.unwrap_err();
    assert!(matches!(err, FsError::Data(_)), "got {err:?}");
}
