use colored::Colorize;

use crate::analysis::DecadeCount;
use crate::report::group_thousands;

/// Format a text histogram of meteorites per decade as a string.
pub fn format_decade_histogram(decades: &[DecadeCount]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Meteorites per Decade".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if decades.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let max_count = decades.iter().map(|d| d.count).max().unwrap_or(0);
    let bar_width = 40;

    output.push_str(&format!("  {:>7}  {:>8}  Distribution\n", "Decade", "Count"));
    output.push_str(&format!("  {}\n", "-".repeat(60)));

    for decade in decades {
        let bar_len = if max_count > 0 {
            ((decade.count as f64 / max_count as f64) * bar_width as f64).round() as usize
        } else {
            0
        };
        // keep non-empty decades visible
        let bar_len = if decade.count > 0 { bar_len.max(1) } else { 0 };
        let bar = "\u{2588}".repeat(bar_len);

        output.push_str(&format!(
            "  {:>6}s  {:>8}  {}\n",
            decade.decade,
            group_thousands(decade.count as u64),
            bar.green()
        ));
    }

    output.push('\n');
    output
}

/// Print a text histogram of meteorites per decade.
pub fn print_decade_histogram(decades: &[DecadeCount]) {
    print!("{}", format_decade_histogram(decades));
}
