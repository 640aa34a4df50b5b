/// Insert `,` between groups of three digits.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format an integer count with thousands separators.
///
/// # Examples
///
/// ```
/// use meteorite_stats::report::group_thousands;
///
/// assert_eq!(group_thousands(45716), "45,716");
/// assert_eq!(group_thousands(999), "999");
/// ```
pub fn group_thousands(n: u64) -> String {
    group_digits(&n.to_string())
}

/// Format a float with `decimals` places and thousands separators in the
/// integer part.
///
/// # Examples
///
/// ```
/// use meteorite_stats::report::format_grouped;
///
/// assert_eq!(format_grouped(60_000_000.0, 0), "60,000,000");
/// assert_eq!(format_grouped(1234.56, 1), "1,234.6");
/// ```
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let plain = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut out = String::new();
    // -0.00 prints without a sign
    if value < 0.0 && plain.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
