use crate::common::{setup_server, source_for};
use finsight::{DataSource, FsError, StatementKind};
use httpmock::Method::GET;

#[tokio::test]
async fn quote_404_maps_to_not_found() {
    let server = setup_server();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/v7/finance/quote");
        then.status(404).body("not found");
    });

    let err = source_for(&server).quote("NOPE").await.unwrap_err();
    assert!(matches!(err, FsError::NotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn timeseries_429_maps_to_rate_limited() {
    let server = setup_server();
    let _mock = server.mock(|when, then| {
        when.method(GET)
            .path("/ws/fundamentals-timeseries/v1/finance/timeseries/PDD");
        then.status(429).body("Too Many Requests");
    });

    let err = source_for(&server)
        .statement("PDD", StatementKind::Income)
        .await
        .unwrap_err();
    assert!(matches!(err, FsError::RateLimited { .. }), "got {err:?}");
}

#[tokio::test]
async fn timeseries_5xx_maps_to_server_error() {
    let server = setup_server();
    let _mock = server.mock(|when, then| {
        when.method(GET)
            .path("/ws/fundamentals-timeseries/v1/finance/timeseries/PDD");
        then.status(503).body("unavailable");
    });

    let err = source_for(&server)
        .statement("PDD", StatementKind::CashFlow)
        .await
        .unwrap_err();
    match err {
        FsError::ServerError { status, .. } => assert_eq!(status, 503),
        other => panic!("expected ServerError, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_json_error() {
    let server = setup_server();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/v7/finance/quote");
        then.status(200).body("<html>consent</html>");
    });

    let err = source_for(&server).quote("PDD").await.unwrap_err();
    assert!(matches!(err, FsError::Json(_)), "got {err:?}");
}
