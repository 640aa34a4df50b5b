use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{Analyzer, CategoryDistribution, StatisticsReport, SummaryStatistics};
use crate::error::PersistError;
use crate::models::Dataset;

/// File name of the per-class table.
pub const CLASS_STATISTICS_FILE: &str = "meteorite_class_statistics.csv";
/// File name of the key/value summary table.
pub const SUMMARY_STATISTICS_FILE: &str = "meteorite_summary_statistics.csv";

/// One row of the class statistics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStatRow {
    pub class: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    metric: &'a str,
    value: Option<f64>,
}

/// Paths of the files written by [`save_results`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedArtifacts {
    pub class_statistics: PathBuf,
    pub summary_statistics: PathBuf,
}

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> PersistError + '_ {
    move |source| PersistError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PersistError + '_ {
    move |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write the class distribution as `class,count,percentage`, overwriting `path`.
pub fn write_class_statistics(
    distribution: &CategoryDistribution,
    path: impl AsRef<Path>,
) -> Result<(), PersistError> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path).map_err(csv_error(path))?;

    for entry in &distribution.entries {
        wtr.serialize(ClassStatRow {
            class: entry.label.clone(),
            count: entry.count,
            percentage: entry.percentage,
        })
        .map_err(csv_error(path))?;
    }

    wtr.flush().map_err(io_error(path))?;
    Ok(())
}

/// Read a class statistics table written by [`write_class_statistics`].
pub fn read_class_statistics(path: impl AsRef<Path>) -> Result<Vec<ClassStatRow>, PersistError> {
    let path = path.as_ref();
    let read_error = |source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = csv::Reader::from_path(path).map_err(read_error)?;
    rdr.deserialize()
        .collect::<Result<Vec<ClassStatRow>, _>>()
        .map_err(read_error)
}

/// Write the seven summary metrics as `metric,value`, overwriting `path`.
///
/// Values are written as floats; a metric with no data is an empty field.
pub fn write_summary_statistics(
    summary: &SummaryStatistics,
    path: impl AsRef<Path>,
) -> Result<(), PersistError> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path).map_err(csv_error(path))?;

    for (metric, value) in summary.rows() {
        wtr.serialize(SummaryRow { metric, value })
            .map_err(csv_error(path))?;
    }

    wtr.flush().map_err(io_error(path))?;
    Ok(())
}

/// Compute the class and summary tables for `dataset` and write both into `dir`.
pub fn save_results(
    dataset: &Dataset,
    dir: impl AsRef<Path>,
) -> Result<SavedArtifacts, PersistError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(io_error(dir))?;

    let analyzer = Analyzer::new(dataset);
    let artifacts = SavedArtifacts {
        class_statistics: dir.join(CLASS_STATISTICS_FILE),
        summary_statistics: dir.join(SUMMARY_STATISTICS_FILE),
    };

    write_class_statistics(&analyzer.class_distribution(), &artifacts.class_statistics)?;
    write_summary_statistics(&analyzer.summary(), &artifacts.summary_statistics)?;

    info!(
        class_statistics = %artifacts.class_statistics.display(),
        summary_statistics = %artifacts.summary_statistics.display(),
        "saved statistics"
    );
    Ok(artifacts)
}

/// Write the full statistics report as JSON.
pub fn write_report_json(
    report: &StatisticsReport,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), PersistError> {
    let path = path.as_ref();
    let json_error = |source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    };
    let content = if pretty {
        serde_json::to_string_pretty(report).map_err(json_error)?
    } else {
        serde_json::to_string(report).map_err(json_error)?
    };
    std::fs::write(path, content).map_err(io_error(path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassColumn, Record, Schema};

    fn record(class: &str, mass: Option<f64>, lat: Option<f64>, long: Option<f64>) -> Record {
        let mut rec = Record::new(format!("{class}-{mass:?}"));
        rec.class = Some(class.to_string());
        rec.mass = mass;
        rec.reclat = lat;
        rec.reclong = long;
        rec
    }

    fn sample_dataset() -> Dataset {
        Dataset::from_records(
            "persist",
            Schema {
                class_column: ClassColumn::RecClass,
                has_year: false,
                has_fall: false,
            },
            vec![
                record("L5", Some(100.0), Some(10.0), Some(20.0)),
                record("L6", Some(300.0), None, Some(20.0)),
                record("L5", Some(200.0), Some(5.0), Some(5.0)),
            ],
        )
    }

    #[test]
    fn test_class_statistics_exact_contents() {
        let ds = sample_dataset();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CLASS_STATISTICS_FILE);
        write_class_statistics(&Analyzer::new(&ds).class_distribution(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "class,count,percentage\nL5,2,66.67\nL6,1,33.33\n");
    }

    #[test]
    fn test_class_statistics_roundtrip() {
        let ds = sample_dataset();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classes.csv");
        let dist = Analyzer::new(&ds).class_distribution();
        write_class_statistics(&dist, &path).unwrap();

        let rows = read_class_statistics(&path).unwrap();
        assert_eq!(rows.len(), dist.entries.len());
        for (row, entry) in rows.iter().zip(&dist.entries) {
            assert_eq!(row.class, entry.label);
            assert_eq!(row.count, entry.count);
            assert_eq!(row.percentage, entry.percentage);
        }
    }

    #[test]
    fn test_read_class_statistics_errors_name_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.csv");
        let err = read_class_statistics(&missing).unwrap_err();
        assert!(matches!(err, PersistError::Read { ref path, .. } if path == &missing));
        assert!(err.to_string().starts_with("Failed to read"));

        let bad = dir.path().join("bad.csv");
        std::fs::write(&bad, "class,count,percentage\nL5,many,1.0\n").unwrap();
        let err = read_class_statistics(&bad).unwrap_err();
        assert!(err.to_string().contains("bad.csv"));
    }

    #[test]
    fn test_summary_statistics_exact_contents() {
        let ds = sample_dataset();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SUMMARY_STATISTICS_FILE);
        write_summary_statistics(&Analyzer::new(&ds).summary(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "metric,value\n\
             average_mass_grams,150.0\n\
             average_mass_kg,0.15\n\
             mean_latitude,7.5\n\
             mean_longitude,12.5\n\
             total_records,3.0\n\
             cleaned_records,2.0\n\
             unique_classes,2.0\n"
        );
    }

    #[test]
    fn test_summary_statistics_empty_values_without_data() {
        let ds = Dataset::from_records(
            "incomplete",
            sample_dataset().schema,
            vec![record("L5", None, Some(1.0), Some(1.0))],
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SUMMARY_STATISTICS_FILE);
        write_summary_statistics(&Analyzer::new(&ds).summary(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("average_mass_grams,\n"));
        assert!(content.contains("mean_longitude,\n"));
        assert!(content.contains("total_records,1.0\n"));
        assert!(!content.contains("NaN"));
    }

    #[test]
    fn test_save_results_writes_both_files() {
        let ds = sample_dataset();
        let dir = tempfile::tempdir().unwrap();
        let artifacts = save_results(&ds, dir.path()).unwrap();
        assert!(artifacts.class_statistics.ends_with(CLASS_STATISTICS_FILE));
        assert!(artifacts.summary_statistics.ends_with(SUMMARY_STATISTICS_FILE));
        assert!(artifacts.class_statistics.exists());
        assert!(artifacts.summary_statistics.exists());
    }

    #[test]
    fn test_save_results_overwrites_existing() {
        let ds = sample_dataset();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CLASS_STATISTICS_FILE), "stale contents\n").unwrap();
        save_results(&ds, dir.path()).unwrap();
        let content = std::fs::read_to_string(dir.path().join(CLASS_STATISTICS_FILE)).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.starts_with("class,count,percentage\n"));
    }

    #[test]
    fn test_save_results_creates_directory() {
        let ds = sample_dataset();
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("stats");
        save_results(&ds, &nested).unwrap();
        assert!(nested.join(SUMMARY_STATISTICS_FILE).exists());
    }

    #[test]
    fn test_write_failure_is_persist_error() {
        let ds = sample_dataset();
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "file").unwrap();
        let err = save_results(&ds, &blocker).unwrap_err();
        assert!(err.to_string().contains("not_a_dir"));
    }

    #[test]
    fn test_write_report_json() {
        let ds = sample_dataset();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = Analyzer::new(&ds).report(&Default::default());
        write_report_json(&report, &path, true).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["total_records"], 3);
        assert_eq!(value["class_distribution"]["entries"][0]["label"], "L5");
    }
}
