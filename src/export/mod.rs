//! Writers that persist a [`CompanyRecord`] to disk.

mod json;
mod xlsx;

pub use json::JsonExporter;
pub use xlsx::XlsxExporter;

use std::path::{Path, PathBuf};

use crate::core::FsError;
use crate::record::CompanyRecord;

/// A file format a record can be written in.
pub trait Exporter: Send + Sync {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    /// Writes `record` to exactly `path`.
    ///
    /// # Errors
    ///
    /// Any I/O or encoding failure.
    fn write(&self, record: &CompanyRecord, path: &Path) -> Result<(), FsError>;

    /// Writes `record` into `dir` as `<file_stem>.<extension>` and returns the path.
    ///
    /// # Errors
    ///
    /// Any I/O or encoding failure.
    fn export(&self, record: &CompanyRecord, dir: &Path) -> Result<PathBuf, FsError> {
        let path = dir.join(format!("{}.{}", record.file_stem(), self.extension()));
        self.write(record, &path)?;
        Ok(path)
    }
}

/// The JSON and spreadsheet exporters.
pub fn default_exporters() -> Vec<Box<dyn Exporter>> {
    vec![Box::new(JsonExporter), Box::new(XlsxExporter)]
}
