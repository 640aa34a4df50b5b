use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};

use super::cleaner::CleanedDataset;
use crate::models::Dataset;

/// Descriptive statistics of meteorite mass, in grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassStatistics {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    /// Sample standard deviation; absent with fewer than two values
    pub std_dev: Option<f64>,
}

impl MassStatistics {
    /// Mean mass in kilograms.
    pub fn mean_kg(&self) -> f64 {
        self.mean / 1000.0
    }
}

/// Arithmetic mean of latitude and longitude.
///
/// This is a plain average of degrees, not a spherical centroid, so it drifts
/// for points spread across the antimeridian or near the poles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Bounding box of the cleaned coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

/// Range and mean of the valid numeric years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearStatistics {
    pub count: usize,
    pub earliest: f64,
    pub latest: f64,
    pub mean: f64,
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mass statistics over the cleaned rows, or `None` when there are none.
pub fn mass_statistics(cleaned: &CleanedDataset) -> Option<MassStatistics> {
    if cleaned.is_empty() {
        return None;
    }
    let masses = cleaned.masses();
    let (min, max) = min_max(&masses);
    let std_dev = if masses.len() >= 2 {
        Some(masses.iter().std_dev())
    } else {
        None
    };
    let median = Data::new(masses.clone()).median();

    Some(MassStatistics {
        count: masses.len(),
        mean: mean(&masses),
        min,
        max,
        median,
        std_dev,
    })
}

/// Mean latitude and longitude over the cleaned rows, or `None` when there are none.
pub fn mean_coordinates(cleaned: &CleanedDataset) -> Option<MeanCoordinates> {
    if cleaned.is_empty() {
        return None;
    }
    let lats: Vec<f64> = cleaned.rows.iter().map(|r| r.reclat).collect();
    let longs: Vec<f64> = cleaned.rows.iter().map(|r| r.reclong).collect();
    Some(MeanCoordinates {
        latitude: mean(&lats),
        longitude: mean(&longs),
    })
}

/// Latitude and longitude extremes over the cleaned rows.
pub fn coordinate_bounds(cleaned: &CleanedDataset) -> Option<CoordinateBounds> {
    if cleaned.is_empty() {
        return None;
    }
    let lats: Vec<f64> = cleaned.rows.iter().map(|r| r.reclat).collect();
    let longs: Vec<f64> = cleaned.rows.iter().map(|r| r.reclong).collect();
    let (min_latitude, max_latitude) = min_max(&lats);
    let (min_longitude, max_longitude) = min_max(&longs);
    Some(CoordinateBounds {
        min_latitude,
        max_latitude,
        min_longitude,
        max_longitude,
    })
}

/// Year statistics over every record with a valid year.
pub fn year_statistics(dataset: &Dataset) -> Option<YearStatistics> {
    let years: Vec<f64> = dataset.records.iter().filter_map(|r| r.year).collect();
    if years.is_empty() {
        return None;
    }
    let (earliest, latest) = min_max(&years);
    Some(YearStatistics {
        count: years.len(),
        earliest,
        latest,
        mean: mean(&years),
    })
}
