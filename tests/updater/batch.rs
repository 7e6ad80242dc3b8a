use crate::common::{StaticCompany, StaticSource, sample_company};
use finsight::{
    Company, CompanyRecord, Exporter, FsError, JsonExporter, RawStatement, Updater,
    UpdaterConfig,
};
use std::path::Path;
use std::time::Duration;

fn config(dir: &Path, symbols: &[&str]) -> UpdaterConfig {
    UpdaterConfig {
        out_dir: dir.to_path_buf(),
        pause: Duration::ZERO,
        companies: symbols.iter().map(|s| Company::new(*s, *s)).collect(),
    }
}

fn json_only() -> Vec<Box<dyn Exporter>> {
    vec![Box::new(JsonExporter)]
}

struct BrokenExporter;

impl Exporter for BrokenExporter {
    fn extension(&self) -> &'static str {
        "broken"
    }

    fn write(&self, _record: &CompanyRecord, _path: &Path) -> Result<(), FsError> {
        Err(FsError::Data("disk on fire".into()))
    }
}

#[tokio::test]
async fn failing_symbol_does_not_stop_the_batch() {
    let out = tempfile::tempdir().unwrap();
    let source = StaticSource::default()
        .with("AAA", sample_company())
        .with("CCC", sample_company());
    let updater = Updater::new(source, config(out.path(), &["AAA", "BBB", "CCC"]));

    let report = updater.update_all().await;

    let updated: Vec<_> = report.updated.iter().map(|o| o.symbol.as_str()).collect();
    assert_eq!(updated, ["AAA", "CCC"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "BBB");
    assert!(matches!(report.failed[0].1, FsError::NotFound { .. }));
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 4);
}

#[tokio::test]
async fn unknown_symbol_is_rejected() {
    let out = tempfile::tempdir().unwrap();
    let source = StaticSource::default().with("AAA", sample_company());
    let updater = Updater::new(source, config(out.path(), &["AAA"]));
    assert_eq!(updater.config().out_dir, out.path());

    let err = updater.update_symbol("ZZZ").await.unwrap_err();
    assert!(matches!(err, FsError::UnknownSymbol(ref s) if s == "ZZZ"));
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn export_failure_is_counted_not_raised() {
    let out = tempfile::tempdir().unwrap();
    let source = StaticSource::default().with("AAA", sample_company());
    let exporters: Vec<Box<dyn Exporter>> = vec![Box::new(BrokenExporter), Box::new(JsonExporter)];
    let updater = Updater::new(source, config(out.path(), &["AAA"])).with_exporters(exporters);

    let outcome = updater.update_symbol("AAA").await.unwrap();
    assert_eq!(outcome.failed_exports, 1);
    assert_eq!(outcome.written.len(), 1);
    assert!(outcome.written[0].exists());
}

#[tokio::test]
async fn unwritable_output_dir_fails_every_export() {
    let out = tempfile::tempdir().unwrap();
    let blocker = out.path().join("not_a_dir");
    std::fs::write(&blocker, b"file").unwrap();

    let source = StaticSource::default().with("AAA", sample_company());
    let updater = Updater::new(source, config(&blocker, &["AAA"]));

    let report = updater.update_all().await;
    assert_eq!(report.updated.len(), 1);
    assert!(report.updated[0].written.is_empty());
    assert_eq!(report.updated[0].failed_exports, 2);
    assert!(!report.is_clean());
}

#[tokio::test]
async fn missing_balance_sheet_yields_no_ratios() {
    let out = tempfile::tempdir().unwrap();
    let company = StaticCompany {
        balance: RawStatement::new(),
        ..sample_company()
    };
    let source = StaticSource::default().with("AAA", company);
    let updater = Updater::new(source, config(out.path(), &["AAA"]))
        .with_exporters(json_only());

    let outcome = updater.update_symbol("AAA").await.unwrap();
    assert_eq!(outcome.ratios, 0);

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&outcome.written[0]).unwrap()).unwrap();
    assert_eq!(doc["financial_data"]["balance_sheet"], serde_json::json!({}));
    assert_eq!(doc["financial_ratios"], serde_json::json!({}));
    assert_eq!(doc["stock_info"]["company_name"], "Sample Holdings");
}

#[tokio::test]
async fn sample_company_ratios() {
    let out = tempfile::tempdir().unwrap();
    let source = StaticSource::default().with("AAA", sample_company());
    let updater = Updater::new(source, config(out.path(), &["AAA"]))
        .with_exporters(json_only());

    let raw = updater.fetch("AAA").await.unwrap();
    let record = CompanyRecord::assemble("AAA", raw, chrono::Local::now());

    let ratios = &record.financial_ratios;
    assert_eq!(ratios.get("gross_margin"), Some(40.0));
    assert_eq!(ratios.get("net_margin"), Some(10.0));
    assert_eq!(ratios.get("roe"), Some(20.0));
    assert_eq!(ratios.get("roa"), Some(5.0));
    assert_eq!(ratios.get("debt_to_assets"), Some(75.0));
    assert_eq!(ratios.get("equity_ratio"), Some(25.0));
}
