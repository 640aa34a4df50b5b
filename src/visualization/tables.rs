use colored::Colorize;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement,
    Table,
};

use crate::analysis::{CategoryDistribution, CleanRecord, MassStatistics, SummaryStatistics};
use crate::report::{format_grouped, group_thousands};

fn heading(title: &str, width: usize) -> String {
    format!("\n{}\n{}\n", title.bold().green(), "=".repeat(width))
}

fn styled_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn number(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn or_dash(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format_grouped(v, decimals))
        .unwrap_or_else(|| "-".to_string())
}

/// Format the headline metrics as a string.
pub fn format_summary_table(summary: &SummaryStatistics, mass: Option<&MassStatistics>) -> String {
    let mut output = heading("Dataset Summary", 50);
    let mut table = styled_table(vec!["Metric", "Value", "Unit"]);

    let rows: [(&str, String, &str); 7] = [
        ("Total records", group_thousands(summary.total_records as u64), ""),
        ("Cleaned records", group_thousands(summary.cleaned_records as u64), ""),
        ("Unique classes", group_thousands(summary.unique_classes as u64), ""),
        ("Average mass", or_dash(summary.average_mass_grams, 2), "g"),
        ("Average mass", or_dash(summary.average_mass_kg, 2), "kg"),
        ("Mean latitude", or_dash(summary.mean_latitude, 6), "°"),
        ("Mean longitude", or_dash(summary.mean_longitude, 6), "°"),
    ];
    for (name, value, unit) in rows {
        table.add_row(vec![Cell::new(name), number(value), Cell::new(unit)]);
    }

    if let Some(m) = mass {
        let spread = [
            ("Median mass", m.median),
            ("Minimum mass", m.min),
            ("Maximum mass", m.max),
        ];
        for (name, value) in spread {
            table.add_row(vec![
                Cell::new(name),
                number(format_grouped(value, 2)),
                Cell::new("g"),
            ]);
        }
        table.add_row(vec![
            Cell::new("Mass std. deviation"),
            number(or_dash(m.std_dev, 2)),
            Cell::new("g"),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the headline metrics table.
pub fn print_summary_table(summary: &SummaryStatistics, mass: Option<&MassStatistics>) {
    println!("{}", format_summary_table(summary, mass));
}

/// Format the `n` most common classes as a string.
pub fn format_class_table(distribution: &CategoryDistribution, n: usize) -> String {
    let mut output = heading("Class Distribution", 50);
    output.push_str(&format!(
        "{}\n",
        format!(
            "{} unique classes across {} records",
            distribution.len(),
            group_thousands(distribution.total_records as u64)
        )
        .dimmed()
    ));

    let mut table = styled_table(vec!["#", "Class", "Count", "% of records"]);
    for (i, entry) in distribution.top(n).iter().enumerate() {
        table.add_row(vec![
            number((i + 1).to_string()),
            Cell::new(&entry.label),
            number(group_thousands(entry.count as u64)),
            number(format!("{:.2}%", entry.percentage)),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the class distribution table.
pub fn print_class_table(distribution: &CategoryDistribution, n: usize) {
    println!("{}", format_class_table(distribution, n));
}

/// Format the fall type breakdown as a string.
pub fn format_fall_table(distribution: &CategoryDistribution) -> String {
    let mut output = heading("Fall Types", 50);
    let mut table = styled_table(vec!["Fall", "Count", "% of records"]);
    for entry in &distribution.entries {
        table.add_row(vec![
            Cell::new(&entry.label),
            number(group_thousands(entry.count as u64)),
            number(format!("{:.2}%", entry.percentage)),
        ]);
    }
    output.push_str(&format!("{table}"));
    output
}

/// Print the fall type table.
pub fn print_fall_table(distribution: &CategoryDistribution) {
    println!("{}", format_fall_table(distribution));
}

/// Format the heaviest meteorites as a string.
pub fn format_heaviest_table(records: &[CleanRecord]) -> String {
    let mut output = heading("Heaviest Meteorites", 60);
    let mut table = styled_table(vec!["#", "Name", "Class", "Mass (kg)", "Latitude", "Longitude"]);
    for (i, r) in records.iter().enumerate() {
        table.add_row(vec![
            number((i + 1).to_string()),
            Cell::new(&r.record.name),
            Cell::new(r.record.class.as_deref().unwrap_or("-")),
            number(format_grouped(r.mass / 1000.0, 1)),
            number(format!("{:.2}", r.reclat)),
            number(format!("{:.2}", r.reclong)),
        ]);
    }
    output.push_str(&format!("{table}"));
    output
}

/// Print the heaviest meteorites table.
pub fn print_heaviest_table(records: &[CleanRecord]) {
    println!("{}", format_heaviest_table(records));
}
