//! Plain-text reports shared by the console report and the chat bot.
//!
//! Counts use thousands separators and floats use fixed decimals. Every
//! missing aggregate renders as [`NO_DATA`] rather than a NaN.

use comfy_table::{presets::ASCII_MARKDOWN, Table};

use super::format::{format_grouped, group_thousands};
use crate::analysis::{
    coordinate_bounds, mass_statistics, mean_coordinates, top_by_mass, Analyzer, CategoryCount,
    CategoryDistribution, CleanRecord, CoordinateBounds, MassStatistics, MeanCoordinates,
    ReportSettings, SummaryStatistics, YearAnalysis,
};
use crate::error::PersistError;
use crate::io::SavedArtifacts;
use crate::models::Dataset;

pub const NO_DATA: &str = "No data available.";

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// First `rows` records as a text table.
pub fn format_preview(dataset: &Dataset, rows: usize) -> String {
    let shown = rows.min(dataset.len());
    let mut output = format!("First {shown} rows of data:\n\n");
    if shown == 0 {
        output.push_str(NO_DATA);
        return output;
    }

    let mut header = vec!["name", dataset.schema.class_column.header(), "mass"];
    if dataset.schema.has_fall {
        header.push("fall");
    }
    if dataset.schema.has_year {
        header.push("year");
    }
    header.extend(["reclat", "reclong"]);

    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN).set_header(header);

    for record in dataset.records.iter().take(shown) {
        let mut row = vec![
            record.name.clone(),
            record.class.clone().unwrap_or_else(|| "-".to_string()),
            optional(record.mass),
        ];
        if dataset.schema.has_fall {
            row.push(record.fall.clone().unwrap_or_else(|| "-".to_string()));
        }
        if dataset.schema.has_year {
            row.push(optional(record.year));
        }
        row.push(optional(record.reclat));
        row.push(optional(record.reclong));
        table.add_row(row);
    }

    output.push_str(&table.to_string());
    output
}

/// Column list, row count and per-column profile.
pub fn format_info(dataset: &Dataset) -> String {
    let mut lines = vec![
        "Dataset information:".to_string(),
        format!("Columns: {}", dataset.column_names().join(", ")),
        format!("Total rows: {}", group_thousands(dataset.len() as u64)),
        "Column types:".to_string(),
    ];
    for column in &dataset.columns {
        lines.push(format!(
            "  {:<12} {:>10} non-null  {}",
            column.name,
            group_thousands(column.non_null as u64),
            column.kind
        ));
    }
    lines.join("\n")
}

pub fn format_average_mass(stats: Option<&MassStatistics>) -> String {
    match stats {
        Some(s) => format!(
            "Average meteorite mass:\n\n{:.2} grams\n{:.2} kg",
            s.mean,
            s.mean_kg()
        ),
        None => format!("Average meteorite mass:\n\n{NO_DATA}"),
    }
}

pub fn format_average_coordinates(coords: Option<&MeanCoordinates>) -> String {
    match coords {
        Some(c) => format!(
            "Average landing point:\n\nMean latitude: {:.6}°\nMean longitude: {:.6}°",
            c.latitude, c.longitude
        ),
        None => format!("Average landing point:\n\n{NO_DATA}"),
    }
}

fn class_line(rank: usize, entry: &CategoryCount) -> String {
    format!(
        "{}. {:<20} - {:5.2}% ({} pcs)",
        rank,
        entry.label,
        entry.percentage,
        group_thousands(entry.count as u64)
    )
}

/// Unique class count plus the `n` most and least common classes.
pub fn format_class_statistics(distribution: &CategoryDistribution, n: usize) -> String {
    let mut lines = vec![
        "Meteorite class statistics:".to_string(),
        String::new(),
        format!("Unique classes: {}", distribution.len()),
        String::new(),
        format!("Top {n} most common classes:"),
        String::new(),
    ];
    lines.extend(
        distribution
            .top(n)
            .iter()
            .enumerate()
            .map(|(i, e)| class_line(i + 1, e)),
    );
    lines.push(String::new());
    lines.push(format!("Top {n} rarest classes:"));
    lines.push(String::new());
    lines.extend(
        distribution
            .bottom(n)
            .iter()
            .enumerate()
            .map(|(i, e)| class_line(i + 1, e)),
    );
    lines.join("\n")
}

/// Record counts, mass spread and the coordinate bounding box.
pub fn format_additional_statistics(
    summary: &SummaryStatistics,
    mass: Option<&MassStatistics>,
    bounds: Option<&CoordinateBounds>,
) -> String {
    let mut lines = vec![
        "Additional statistics:".to_string(),
        String::new(),
        format!(
            "Total records in dataset: {}",
            group_thousands(summary.total_records as u64)
        ),
        format!(
            "Records after cleaning (with mass and coordinates): {}",
            group_thousands(summary.cleaned_records as u64)
        ),
        String::new(),
        "Mass statistics:".to_string(),
        String::new(),
    ];

    match mass {
        Some(m) => {
            lines.push(format!("Minimum mass: {:.2} g", m.min));
            lines.push(format!("Maximum mass: {:.2} g", m.max));
            lines.push(format!("Median mass: {:.2} g", m.median));
            lines.push(match m.std_dev {
                Some(sd) => format!("Standard deviation: {sd:.2} g"),
                None => "Standard deviation: n/a".to_string(),
            });
        }
        None => lines.push(NO_DATA.to_string()),
    }

    lines.push(String::new());
    lines.push("Geographic distribution:".to_string());
    lines.push(String::new());

    match bounds {
        Some(b) => {
            lines.push(format!("Minimum latitude: {:.2}°", b.min_latitude));
            lines.push(format!("Maximum latitude: {:.2}°", b.max_latitude));
            lines.push(format!("Minimum longitude: {:.2}°", b.min_longitude));
            lines.push(format!("Maximum longitude: {:.2}°", b.max_longitude));
        }
        None => lines.push(NO_DATA.to_string()),
    }

    lines.join("\n")
}

/// Fall types, year range and the first `decade_rows` decades.
pub fn format_year_analysis(analysis: Option<&YearAnalysis>, decade_rows: usize) -> String {
    let Some(analysis) = analysis else {
        return "Year and fall type data are not available in the dataset.".to_string();
    };

    let mut lines = vec![
        "Year and fall analysis:".to_string(),
        String::new(),
        "Fall type distribution:".to_string(),
        String::new(),
    ];
    for entry in &analysis.fall_distribution.entries {
        lines.push(format!(
            "{}: {} ({:.2}%)",
            entry.label,
            group_thousands(entry.count as u64),
            entry.percentage
        ));
    }

    lines.push(String::new());
    lines.push("Year statistics:".to_string());
    lines.push(String::new());
    match &analysis.years {
        Some(y) => {
            lines.push(format!("Earliest year: {}", y.earliest.trunc() as i64));
            lines.push(format!("Latest year: {}", y.latest.trunc() as i64));
            lines.push(format!("Mean year: {:.0}", y.mean));
        }
        None => lines.push(NO_DATA.to_string()),
    }

    lines.push(String::new());
    lines.push(format!("Meteorites per decade (first {decade_rows}):"));
    lines.push(String::new());
    if analysis.decades.is_empty() {
        lines.push(NO_DATA.to_string());
    }
    for decade in analysis.decades.iter().take(decade_rows) {
        lines.push(format!(
            "{}s: {} meteorites",
            decade.decade,
            group_thousands(decade.count as u64)
        ));
    }

    lines.join("\n")
}

/// The heaviest records with mass, class and coordinates.
pub fn format_heaviest(records: &[CleanRecord], n: usize) -> String {
    let mut output = format!("Top {n} heaviest meteorites:\n\n");
    if records.is_empty() {
        output.push_str(NO_DATA);
        return output;
    }

    let entries: Vec<String> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. {}\n   Mass: {} g ({} kg)\n   Class: {}\n   Coordinates: {:.2}°, {:.2}°",
                i + 1,
                r.record.name,
                format_grouped(r.mass, 0),
                format_grouped(r.mass / 1000.0, 1),
                r.record.class.as_deref().unwrap_or("-"),
                r.reclat,
                r.reclong
            )
        })
        .collect();
    output.push_str(&entries.join("\n\n"));
    output
}

/// Confirmation listing the written files.
pub fn format_saved(artifacts: &SavedArtifacts) -> String {
    let name = |p: &std::path::Path| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| p.display().to_string())
    };
    format!(
        "Results saved to files:\n\n{}\n{}",
        name(&artifacts.class_statistics),
        name(&artifacts.summary_statistics)
    )
}

pub fn format_save_failure(err: &PersistError) -> String {
    format!("Error while saving: {err}")
}

/// Greeting with one line per command.
pub fn format_welcome(commands: &[(&str, &str)]) -> String {
    let mut lines = vec![
        "Welcome to the meteorite statistics bot!".to_string(),
        String::new(),
        "I can show various statistics from the meteorite landings dataset.".to_string(),
        String::new(),
        "Available commands:".to_string(),
        String::new(),
    ];
    lines.extend(
        commands
            .iter()
            .map(|(name, description)| format!("/{name} - {description}")),
    );
    lines.push(String::new());
    lines.push("Choose a command from the menu below.".to_string());
    lines.join("\n")
}

pub fn format_fallback() -> String {
    "Sorry, I did not understand your request. Use the commands from the menu below.".to_string()
}

pub fn format_all_stats_intro() -> String {
    "Loading full statistics...".to_string()
}

fn numbered(n: usize, section: String) -> String {
    format!("{n}. {section}")
}

/// The one-shot console report: preview, info, then seven numbered
/// sections separated by a rule.
///
/// `saved` is the outcome of persisting the result tables, or `None` when
/// saving was skipped.
pub fn full_report(
    dataset: &Dataset,
    settings: &ReportSettings,
    saved: Option<&Result<SavedArtifacts, PersistError>>,
) -> String {
    let analyzer = Analyzer::new(dataset);
    let cleaned = analyzer.cleaned();
    let mass = mass_statistics(&cleaned);

    let save_section = match saved {
        Some(Ok(artifacts)) => format!("Saving analysis results...\n\n{}", format_saved(artifacts)),
        Some(Err(err)) => format!("Saving analysis results...\n\n{}", format_save_failure(err)),
        None => "Saving analysis results...\n\nSkipped.".to_string(),
    };

    let sections = [
        format_preview(dataset, settings.preview_rows),
        format_info(dataset),
        numbered(1, format_average_mass(mass.as_ref())),
        numbered(2, format_average_coordinates(mean_coordinates(&cleaned).as_ref())),
        numbered(
            3,
            format_class_statistics(&analyzer.class_distribution(), settings.top_classes),
        ),
        numbered(
            4,
            format_additional_statistics(
                &analyzer.summary(),
                mass.as_ref(),
                coordinate_bounds(&cleaned).as_ref(),
            ),
        ),
        numbered(5, save_section),
        numbered(
            6,
            format_year_analysis(analyzer.year_analysis().as_ref(), settings.decade_rows),
        ),
        numbered(
            7,
            format_heaviest(&top_by_mass(&cleaned, settings.heavy_count), settings.heavy_count),
        ),
    ];

    let rule = format!("\n\n{}\n\n", "=".repeat(50));
    sections.join(&rule)
}
