use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::LoadError;
use crate::models::{ClassColumn, ColumnInfo, ColumnKind, Dataset, Record, Schema};

/// Values treated as missing, compared case-insensitively.
const MISSING_MARKERS: &[&str] = &["", "na", "n/a", "nan", "null", "none"];

fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value.to_ascii_lowercase().as_str())
}

/// Positions of the columns the record needs.
struct ColumnIndex {
    name: usize,
    class: usize,
    mass: usize,
    reclat: usize,
    reclong: usize,
    fall: Option<usize>,
    year: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<(Self, Schema), LoadError> {
        let position = |name: &str| headers.iter().position(|h| h == name);
        let required = |name: &str| {
            position(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        let class_column = ClassColumn::resolve(headers.iter())
            .ok_or_else(|| LoadError::MissingColumn("recclass".to_string()))?;

        let index = ColumnIndex {
            name: required("name")?,
            class: required(class_column.header())?,
            mass: required("mass")?,
            reclat: required("reclat")?,
            reclong: required("reclong")?,
            fall: position("fall"),
            year: position("year"),
        };
        let schema = Schema {
            class_column,
            has_year: index.year.is_some(),
            has_fall: index.fall.is_some(),
        };
        Ok((index, schema))
    }
}

/// Running non-null count and type inference for one source column.
struct ColumnProfile {
    name: String,
    non_null: usize,
    numeric: bool,
}

impl ColumnProfile {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            non_null: 0,
            numeric: true,
        }
    }

    fn observe(&mut self, value: &str) {
        if is_missing(value) {
            return;
        }
        self.non_null += 1;
        if self.numeric && value.parse::<f64>().is_err() {
            self.numeric = false;
        }
    }

    fn finish(self) -> ColumnInfo {
        ColumnInfo {
            name: self.name,
            non_null: self.non_null,
            kind: if self.numeric {
                ColumnKind::Numeric
            } else {
                ColumnKind::Text
            },
        }
    }
}

/// Parse a required-numeric field. Present but unparseable values are malformed input.
fn parse_measure(row: usize, column: &str, value: Option<&str>) -> Result<Option<f64>, LoadError> {
    match value {
        None => Ok(None),
        Some(v) => match v.parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(Some(x)),
            _ => Err(LoadError::Malformed {
                row,
                column: column.to_string(),
                value: v.to_string(),
            }),
        },
    }
}

/// Coerce a year to a number; anything unparseable becomes missing.
fn coerce_year(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|y| y.is_finite())
}

fn parse_csv_records<R: Read>(rdr: &mut csv::Reader<R>, name: &str) -> Result<Dataset, LoadError> {
    let headers = rdr.headers()?.clone();
    let (index, schema) = ColumnIndex::resolve(&headers)?;
    debug!(?schema, "resolved dataset schema");

    let mut profiles: Vec<ColumnProfile> = headers.iter().map(ColumnProfile::new).collect();
    let mut records = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let row = result?;
        let row_number = i + 1;

        for (profile, value) in profiles.iter_mut().zip(row.iter()) {
            profile.observe(value);
        }
        // Short rows leave the trailing profiles untouched, which counts them as missing.

        let field = |idx: usize| row.get(idx).filter(|v| !is_missing(v));
        let text = |idx: Option<usize>| idx.and_then(field).map(str::to_string);

        records.push(Record {
            name: field(index.name).unwrap_or_default().to_string(),
            class: text(Some(index.class)),
            mass: parse_measure(row_number, "mass", field(index.mass))?,
            reclat: parse_measure(row_number, "reclat", field(index.reclat))?,
            reclong: parse_measure(row_number, "reclong", field(index.reclong))?,
            fall: text(index.fall),
            year: coerce_year(index.year.and_then(field)),
        });
    }

    info!(
        rows = records.len(),
        class_column = %schema.class_column,
        "loaded meteorite dataset '{name}'"
    );

    Ok(Dataset {
        name: name.to_string(),
        schema,
        columns: profiles.into_iter().map(ColumnProfile::finish).collect(),
        records,
    })
}

fn reader_builder(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter);
    builder
}

/// Read a meteorite dataset from a delimited file.
pub fn read_delimited(path: impl AsRef<Path>, delimiter: u8) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let mut rdr = reader_builder(delimiter).from_path(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    parse_csv_records(&mut rdr, &name)
}

/// Read a meteorite dataset from a CSV file.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    read_delimited(path, b',')
}

/// Read a meteorite dataset from CSV bytes.
pub fn read_csv_from_bytes(data: &[u8], name: &str) -> Result<Dataset, LoadError> {
    let mut rdr = reader_builder(b',').from_reader(data);
    parse_csv_records(&mut rdr, name)
}
