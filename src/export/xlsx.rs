use std::path::Path;

use rust_xlsxwriter::{ColNum, Workbook, Worksheet, XlsxError};
use serde_json::Value;

use super::Exporter;
use crate::core::FsError;
use crate::record::CompanyRecord;
use crate::source::StatementKind;

/// Multi-sheet workbook: one single-row table per section of the record.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExporter;

pub(crate) const SHEET_NAMES: [&str; 5] = [
    "Stock_Info",
    "Income_Statement",
    "Balance_Sheet",
    "Cash_Flow",
    "Financial_Ratios",
];

impl Exporter for XlsxExporter {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn write(&self, record: &CompanyRecord, path: &Path) -> Result<(), FsError> {
        let mut workbook = Workbook::new();
        for (name, section) in SHEET_NAMES.into_iter().zip(sections(record)?) {
            let sheet = workbook.add_worksheet();
            sheet.set_name(name)?;
            write_single_row(sheet, &section)?;
        }
        workbook.save(path)?;
        tracing::info!(path = %path.display(), "spreadsheet written");
        Ok(())
    }
}

fn sections(record: &CompanyRecord) -> Result<[Value; 5], FsError> {
    let data = &record.financial_data;
    Ok([
        serde_json::to_value(&record.stock_info)?,
        serde_json::to_value(data.statement(StatementKind::Income))?,
        serde_json::to_value(data.statement(StatementKind::Balance))?,
        serde_json::to_value(data.statement(StatementKind::CashFlow))?,
        serde_json::to_value(&record.financial_ratios)?,
    ])
}

/// Header row of field names, one row of values below. Non-objects leave the sheet blank.
fn write_single_row(sheet: &mut Worksheet, section: &Value) -> Result<(), XlsxError> {
    let Some(fields) = section.as_object() else {
        return Ok(());
    };
    for (i, (key, value)) in fields.iter().enumerate() {
        let Ok(col) = ColNum::try_from(i) else { break };
        sheet.write_string(0, col, key)?;
        match value {
            Value::Number(n) => {
                if let Some(f) = n.as_f64() {
                    sheet.write_number(1, col, f)?;
                }
            }
            Value::String(s) => {
                sheet.write_string(1, col, s)?;
            }
            Value::Bool(b) => {
                sheet.write_boolean(1, col, *b)?;
            }
            Value::Null => {}
            other => {
                sheet.write_string(1, col, other.to_string())?;
            }
        }
    }
    Ok(())
}
