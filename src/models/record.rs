use serde::{Deserialize, Serialize};

/// A single meteorite observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Meteorite name (e.g., "Allende")
    pub name: String,
    /// Classification label, from either the `recclass` or `class` column
    pub class: Option<String>,
    /// Mass in grams
    pub mass: Option<f64>,
    /// Latitude in degrees
    pub reclat: Option<f64>,
    /// Longitude in degrees
    pub reclong: Option<f64>,
    /// Fall type ("Fell" or "Found")
    pub fall: Option<String>,
    /// Year of fall or find, coerced to a number
    pub year: Option<f64>,
}

impl Record {
    /// Create a record with only a name; every other field is missing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: None,
            mass: None,
            reclat: None,
            reclong: None,
            fall: None,
            year: None,
        }
    }

    /// Decade bucket of the year: `floor(year / 10) * 10`.
    ///
    /// Years whose decade does not fit in an `i64` have no bucket.
    ///
    /// # Examples
    ///
    /// ```
    /// use meteorite_stats::Record;
    ///
    /// let mut rec = Record::new("Allende");
    /// rec.year = Some(1969.0);
    /// assert_eq!(rec.decade(), Some(1960));
    /// ```
    pub fn decade(&self) -> Option<i64> {
        let bucket = (self.year? / 10.0).floor();
        if !(i64::MIN as f64..i64::MAX as f64).contains(&bucket) {
            return None;
        }
        (bucket as i64).checked_mul(10)
    }

    /// True when mass, latitude and longitude are all present.
    pub fn is_complete(&self) -> bool {
        self.mass.is_some() && self.reclat.is_some() && self.reclong.is_some()
    }
}
