mod dataset;
mod record;

pub use dataset::{ClassColumn, ColumnInfo, ColumnKind, Dataset, Schema};
pub use record::Record;
