mod analyzer;
mod cleaner;
mod distribution;
mod ranking;
mod statistics;

pub use analyzer::{Analyzer, ReportSettings, StatisticsReport, SummaryStatistics, YearAnalysis};
pub use cleaner::{clean, CleanRecord, CleanedDataset};
pub use distribution::{
    class_distribution, decade_distribution, fall_type_distribution, percentage, CategoryCount,
    CategoryDistribution, DecadeCount,
};
pub use ranking::top_by_mass;
pub use statistics::{
    coordinate_bounds, mass_statistics, mean_coordinates, year_statistics, CoordinateBounds,
    MassStatistics, MeanCoordinates, YearStatistics,
};
