mod csv_io;
mod persist;

use std::path::Path;

use crate::error::LoadError;
use crate::models::Dataset;

pub use csv_io::{read_csv, read_csv_from_bytes, read_delimited};
pub use persist::{
    read_class_statistics, save_results, write_class_statistics, write_report_json,
    write_summary_statistics, ClassStatRow, SavedArtifacts, CLASS_STATISTICS_FILE,
    SUMMARY_STATISTICS_FILE,
};

/// Trait for reading a meteorite dataset from a file.
pub trait DatasetReader {
    fn read(&self, path: &Path) -> Result<Dataset, LoadError>;
}

/// Delimited text reader (CSV or TSV).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFormat {
    pub delimiter: u8,
}

impl CsvFormat {
    pub fn comma() -> Self {
        Self { delimiter: b',' }
    }

    pub fn tab() -> Self {
        Self { delimiter: b'\t' }
    }

    /// Pick the delimiter from a file extension; `.tsv` is tab-separated,
    /// everything else comma-separated.
    pub fn for_path(path: &Path) -> Self {
        let is_tsv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
        if is_tsv {
            Self::tab()
        } else {
            Self::comma()
        }
    }
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self::comma()
    }
}

impl DatasetReader for CsvFormat {
    fn read(&self, path: &Path) -> Result<Dataset, LoadError> {
        read_delimited(path, self.delimiter)
    }
}
