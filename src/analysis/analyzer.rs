use serde::{Deserialize, Serialize};

use crate::analysis::{
    class_distribution, clean, coordinate_bounds, decade_distribution, fall_type_distribution,
    mass_statistics, mean_coordinates, top_by_mass, year_statistics, CategoryCount,
    CategoryDistribution, CleanRecord, CleanedDataset, CoordinateBounds, DecadeCount,
    MassStatistics, MeanCoordinates, YearStatistics,
};
use crate::models::{Dataset, Record};

/// The seven headline metrics written to the summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub average_mass_grams: Option<f64>,
    pub average_mass_kg: Option<f64>,
    pub mean_latitude: Option<f64>,
    pub mean_longitude: Option<f64>,
    pub total_records: usize,
    pub cleaned_records: usize,
    pub unique_classes: usize,
}

impl SummaryStatistics {
    /// Compute the summary metrics for a dataset.
    pub fn compute(dataset: &Dataset) -> Self {
        let cleaned = clean(dataset);
        let mass = mass_statistics(&cleaned);
        let coords = mean_coordinates(&cleaned);
        Self {
            average_mass_grams: mass.as_ref().map(|m| m.mean),
            average_mass_kg: mass.as_ref().map(|m| m.mean_kg()),
            mean_latitude: coords.as_ref().map(|c| c.latitude),
            mean_longitude: coords.as_ref().map(|c| c.longitude),
            total_records: dataset.len(),
            cleaned_records: cleaned.len(),
            unique_classes: class_distribution(dataset).len(),
        }
    }

    /// Metric key and value pairs in table order.
    pub fn rows(&self) -> [(&'static str, Option<f64>); 7] {
        [
            ("average_mass_grams", self.average_mass_grams),
            ("average_mass_kg", self.average_mass_kg),
            ("mean_latitude", self.mean_latitude),
            ("mean_longitude", self.mean_longitude),
            ("total_records", Some(self.total_records as f64)),
            ("cleaned_records", Some(self.cleaned_records as f64)),
            ("unique_classes", Some(self.unique_classes as f64)),
        ]
    }
}

/// Fall types, year range and decade counts, available only when the source
/// carries both a `year` and a `fall` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearAnalysis {
    pub fall_distribution: CategoryDistribution,
    pub years: Option<YearStatistics>,
    pub decades: Vec<DecadeCount>,
}

/// Sizes of the ranked lists in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Entries in each of the most/least common class lists
    pub top_classes: usize,
    /// Entries in the heaviest meteorites list
    pub heavy_count: usize,
    /// Rows shown by the preview
    pub preview_rows: usize,
    /// Decades listed in the year analysis
    pub decade_rows: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_classes: 10,
            heavy_count: 5,
            preview_rows: 5,
            decade_rows: 10,
        }
    }
}

/// Every aggregate for a dataset, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub dataset: String,
    pub summary: SummaryStatistics,
    pub mass: Option<MassStatistics>,
    pub coordinates: Option<MeanCoordinates>,
    pub bounds: Option<CoordinateBounds>,
    pub class_distribution: CategoryDistribution,
    pub year_analysis: Option<YearAnalysis>,
    pub heaviest: Vec<Record>,
}

/// Unified analysis API over a shared dataset.
///
/// Nothing is cached: each call recomputes from the dataset, which is never
/// modified.
pub struct Analyzer<'a> {
    dataset: &'a Dataset,
}

impl<'a> Analyzer<'a> {
    /// Create a new Analyzer for the given dataset.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Rows with mass and both coordinates.
    pub fn cleaned(&self) -> CleanedDataset<'a> {
        clean(self.dataset)
    }

    pub fn mass_statistics(&self) -> Option<MassStatistics> {
        mass_statistics(&self.cleaned())
    }

    pub fn mean_coordinates(&self) -> Option<MeanCoordinates> {
        mean_coordinates(&self.cleaned())
    }

    pub fn coordinate_bounds(&self) -> Option<CoordinateBounds> {
        coordinate_bounds(&self.cleaned())
    }

    /// Class frequencies against the full row count.
    pub fn class_distribution(&self) -> CategoryDistribution {
        class_distribution(self.dataset)
    }

    pub fn top_classes(&self, n: usize) -> Vec<CategoryCount> {
        self.class_distribution().top(n).to_vec()
    }

    pub fn bottom_classes(&self, n: usize) -> Vec<CategoryCount> {
        self.class_distribution().bottom(n).to_vec()
    }

    pub fn fall_type_distribution(&self) -> CategoryDistribution {
        fall_type_distribution(self.dataset)
    }

    pub fn year_statistics(&self) -> Option<YearStatistics> {
        year_statistics(self.dataset)
    }

    pub fn decade_distribution(&self) -> Vec<DecadeCount> {
        decade_distribution(self.dataset)
    }

    /// Fall and year breakdown, or `None` when the source lacks either column.
    pub fn year_analysis(&self) -> Option<YearAnalysis> {
        if !self.dataset.has_year_and_fall() {
            return None;
        }
        Some(YearAnalysis {
            fall_distribution: self.fall_type_distribution(),
            years: self.year_statistics(),
            decades: self.decade_distribution(),
        })
    }

    /// The `n` heaviest cleaned records.
    pub fn top_by_mass(&self, n: usize) -> Vec<CleanRecord<'a>> {
        top_by_mass(&self.cleaned(), n)
    }

    pub fn summary(&self) -> SummaryStatistics {
        SummaryStatistics::compute(self.dataset)
    }

    /// Compute every aggregate at once.
    pub fn report(&self, settings: &ReportSettings) -> StatisticsReport {
        let cleaned = self.cleaned();
        StatisticsReport {
            dataset: self.dataset.name.clone(),
            summary: self.summary(),
            mass: mass_statistics(&cleaned),
            coordinates: mean_coordinates(&cleaned),
            bounds: coordinate_bounds(&cleaned),
            class_distribution: self.class_distribution(),
            year_analysis: self.year_analysis(),
            heaviest: top_by_mass(&cleaned, settings.heavy_count)
                .into_iter()
                .map(|r| r.record.clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassColumn, Schema};

    fn record(class: &str, mass: Option<f64>, lat: Option<f64>, long: Option<f64>) -> Record {
        let mut rec = Record::new(format!("{class} sample"));
        rec.class = Some(class.to_string());
        rec.mass = mass;
        rec.reclat = lat;
        rec.reclong = long;
        rec
    }

    fn scenario(has_year: bool, has_fall: bool) -> Dataset {
        Dataset::from_records(
            "Analyzer Test",
            Schema {
                class_column: ClassColumn::RecClass,
                has_year,
                has_fall,
            },
            vec![
                record("L5", Some(100.0), Some(10.0), Some(20.0)),
                record("L6", Some(300.0), None, Some(20.0)),
                record("L5", Some(200.0), Some(5.0), Some(5.0)),
            ],
        )
    }

    #[test]
    fn test_summary_scenario() {
        let ds = scenario(false, false);
        let summary = Analyzer::new(&ds).summary();
        assert_eq!(summary.average_mass_grams, Some(150.0));
        assert_eq!(summary.average_mass_kg, Some(0.15));
        assert_eq!(summary.mean_latitude, Some(7.5));
        assert_eq!(summary.mean_longitude, Some(12.5));
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.cleaned_records, 2);
        assert_eq!(summary.unique_classes, 2);
    }

    #[test]
    fn test_summary_rows_keys() {
        let ds = scenario(false, false);
        let keys: Vec<&str> = Analyzer::new(&ds)
            .summary()
            .rows()
            .iter()
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(
            keys,
            vec![
                "average_mass_grams",
                "average_mass_kg",
                "mean_latitude",
                "mean_longitude",
                "total_records",
                "cleaned_records",
                "unique_classes",
            ]
        );
    }

    #[test]
    fn test_percentages_use_full_dataset() {
        let ds = scenario(false, false);
        let analyzer = Analyzer::new(&ds);
        // The L6 row is dropped by cleaning but still counts here.
        assert_eq!(analyzer.cleaned().len(), 2);
        let dist = analyzer.class_distribution();
        assert_eq!(dist.total_records, 3);
        assert_eq!(dist.get("L6").unwrap().percentage, 33.33);
    }

    #[test]
    fn test_year_analysis_requires_both_columns() {
        assert!(Analyzer::new(&scenario(true, false)).year_analysis().is_none());
        assert!(Analyzer::new(&scenario(false, true)).year_analysis().is_none());
        assert!(Analyzer::new(&scenario(true, true)).year_analysis().is_some());
    }

    #[test]
    fn test_top_by_mass_uses_cleaned_rows() {
        let ds = scenario(false, false);
        let top = Analyzer::new(&ds).top_by_mass(5);
        // 300 g row has no latitude, so 200 g leads.
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].mass, 200.0);
    }

    #[test]
    fn test_top_and_bottom_classes() {
        let ds = scenario(false, false);
        let analyzer = Analyzer::new(&ds);
        assert_eq!(analyzer.top_classes(1)[0].label, "L5");
        assert_eq!(analyzer.bottom_classes(1)[0].label, "L6");
    }

    #[test]
    fn test_report_is_idempotent() {
        let ds = scenario(true, true);
        let analyzer = Analyzer::new(&ds);
        let settings = ReportSettings::default();
        assert_eq!(analyzer.report(&settings), analyzer.report(&settings));
    }

    #[test]
    fn test_report_heaviest_respects_settings() {
        let ds = scenario(false, false);
        let settings = ReportSettings {
            heavy_count: 1,
            ..ReportSettings::default()
        };
        let report = Analyzer::new(&ds).report(&settings);
        assert_eq!(report.heaviest.len(), 1);
        assert_eq!(report.heaviest[0].mass, Some(200.0));
        assert_eq!(report.dataset, "Analyzer Test");
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::from_records(
            "Empty",
            Schema {
                class_column: ClassColumn::Class,
                has_year: true,
                has_fall: true,
            },
            Vec::new(),
        );
        let analyzer = Analyzer::new(&ds);
        assert!(analyzer.mass_statistics().is_none());
        assert!(analyzer.class_distribution().is_empty());
        let summary = analyzer.summary();
        assert_eq!(summary.total_records, 0);
        assert!(summary.average_mass_grams.is_none());
        let analysis = analyzer.year_analysis().unwrap();
        assert!(analysis.years.is_none());
        assert!(analysis.decades.is_empty());
    }
}
