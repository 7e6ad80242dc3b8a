use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::Exporter;
use crate::core::FsError;
use crate::record::CompanyRecord;

/// Pretty-printed UTF-8 JSON; non-ASCII text is written as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, record: &CompanyRecord, path: &Path) -> Result<(), FsError> {
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut out, record)?;
        out.write_all(b"\n")?;
        out.flush()?;
        tracing::info!(path = %path.display(), "json written");
        Ok(())
    }
}
