use crate::models::{Dataset, Record};

/// A record known to carry mass and coordinates.
#[derive(Debug, Clone, Copy)]
pub struct CleanRecord<'a> {
    pub record: &'a Record,
    pub mass: f64,
    pub reclat: f64,
    pub reclong: f64,
}

impl<'a> CleanRecord<'a> {
    fn from_record(record: &'a Record) -> Option<Self> {
        Some(Self {
            mass: record.mass?,
            reclat: record.reclat?,
            reclong: record.reclong?,
            record,
        })
    }
}

/// The rows of a dataset with mass, latitude and longitude all present.
#[derive(Debug, Clone)]
pub struct CleanedDataset<'a> {
    pub rows: Vec<CleanRecord<'a>>,
}

impl<'a> CleanedDataset<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn masses(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.mass).collect()
    }
}

/// Keep only the records with mass and both coordinates, in source order.
pub fn clean(dataset: &Dataset) -> CleanedDataset<'_> {
    CleanedDataset {
        rows: dataset
            .records
            .iter()
            .filter_map(CleanRecord::from_record)
            .collect(),
    }
}
