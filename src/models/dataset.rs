use serde::{Deserialize, Serialize};

use super::Record;

/// Which source column supplies the meteorite classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassColumn {
    RecClass,
    Class,
}

impl ClassColumn {
    /// Header name in the source file.
    pub fn header(&self) -> &'static str {
        match self {
            ClassColumn::RecClass => "recclass",
            ClassColumn::Class => "class",
        }
    }

    /// Pick the class column from a header row, preferring `recclass`.
    pub fn resolve<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut found = None;
        for h in headers {
            match h {
                "recclass" => return Some(ClassColumn::RecClass),
                "class" => found = Some(ClassColumn::Class),
                _ => {}
            }
        }
        found
    }
}

impl std::fmt::Display for ClassColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// Source schema, resolved once at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub class_column: ClassColumn,
    pub has_year: bool,
    pub has_fall: bool,
}

/// Inferred type of a source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Text,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Text => write!(f, "text"),
        }
    }
}

/// Per-column profile of the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    pub kind: ColumnKind,
}

/// The full meteorite dataset. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Name or identifier, usually the file stem
    pub name: String,
    pub schema: Schema,
    /// Source columns in header order
    pub columns: Vec<ColumnInfo>,
    /// All rows, in source order
    pub records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from normalized records. Column profiles are derived
    /// from the record fields.
    pub fn from_records(name: impl Into<String>, schema: Schema, records: Vec<Record>) -> Self {
        let count = |f: &dyn Fn(&Record) -> bool| records.iter().filter(|r| f(r)).count();

        let mut columns = vec![
            ColumnInfo {
                name: "name".to_string(),
                non_null: records.len(),
                kind: ColumnKind::Text,
            },
            ColumnInfo {
                name: schema.class_column.header().to_string(),
                non_null: count(&|r| r.class.is_some()),
                kind: ColumnKind::Text,
            },
            ColumnInfo {
                name: "mass".to_string(),
                non_null: count(&|r| r.mass.is_some()),
                kind: ColumnKind::Numeric,
            },
        ];
        if schema.has_fall {
            columns.push(ColumnInfo {
                name: "fall".to_string(),
                non_null: count(&|r| r.fall.is_some()),
                kind: ColumnKind::Text,
            });
        }
        if schema.has_year {
            columns.push(ColumnInfo {
                name: "year".to_string(),
                non_null: count(&|r| r.year.is_some()),
                kind: ColumnKind::Numeric,
            });
        }
        columns.push(ColumnInfo {
            name: "reclat".to_string(),
            non_null: count(&|r| r.reclat.is_some()),
            kind: ColumnKind::Numeric,
        });
        columns.push(ColumnInfo {
            name: "reclong".to_string(),
            non_null: count(&|r| r.reclong.is_some()),
            kind: ColumnKind::Numeric,
        });

        Self {
            name: name.into(),
            schema,
            columns,
            records,
        }
    }

    /// Total number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names in header order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Whether both the `year` and `fall` columns were present in the source.
    pub fn has_year_and_fall(&self) -> bool {
        self.schema.has_year && self.schema.has_fall
    }
}
