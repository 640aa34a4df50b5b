use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::Dataset;

/// Round a share of `total` to a percentage with two decimals.
///
/// Ties round half away from zero. An empty total yields `0.0`.
///
/// # Examples
///
/// ```
/// use meteorite_stats::analysis::percentage;
///
/// assert_eq!(percentage(2, 3), 66.67);
/// assert_eq!(percentage(1, 8), 12.5);
/// assert_eq!(percentage(1005, 100_000), 1.01);
/// assert_eq!(percentage(5, 0), 0.0);
/// ```
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    // basis points, half up in integer arithmetic
    let (count, total) = (count as u128, total as u128);
    let basis_points = (count * 20_000 + total) / (2 * total);
    basis_points as f64 / 100.0
}

/// One category with its frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
    /// Share of all rows in the full dataset, two decimals
    pub percentage: f64,
}

/// Category frequencies ordered by descending count.
///
/// Percentages are taken against `total_records`, the full row count, so rows
/// with a missing label lower every share instead of being ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    pub total_records: usize,
    pub entries: Vec<CategoryCount>,
}

impl CategoryDistribution {
    /// Count labels, keeping first-occurrence order for equal counts.
    pub fn from_labels<'a>(
        labels: impl IntoIterator<Item = Option<&'a str>>,
        total_records: usize,
    ) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(&str, usize)> = Vec::new();

        for label in labels.into_iter().flatten() {
            match index.get(label) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(label, counts.len());
                    counts.push((label, 1));
                }
            }
        }

        // sort_by is stable, so ties stay in first-occurrence order
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            total_records,
            entries: counts
                .into_iter()
                .map(|(label, count)| CategoryCount {
                    label: label.to_string(),
                    count,
                    percentage: percentage(count, total_records),
                })
                .collect(),
        }
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most frequent entries, or all of them when fewer exist.
    pub fn top(&self, n: usize) -> &[CategoryCount] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// The `n` least frequent entries, still in descending order.
    pub fn bottom(&self, n: usize) -> &[CategoryCount] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn get(&self, label: &str) -> Option<&CategoryCount> {
        self.entries.iter().find(|e| e.label == label)
    }
}

/// Number of records in one decade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecadeCount {
    pub decade: i64,
    pub count: usize,
}

/// Class frequencies over the full dataset.
pub fn class_distribution(dataset: &Dataset) -> CategoryDistribution {
    CategoryDistribution::from_labels(
        dataset.records.iter().map(|r| r.class.as_deref()),
        dataset.len(),
    )
}

/// Fall type frequencies over the full dataset.
pub fn fall_type_distribution(dataset: &Dataset) -> CategoryDistribution {
    CategoryDistribution::from_labels(
        dataset.records.iter().map(|r| r.fall.as_deref()),
        dataset.len(),
    )
}

/// Record counts per decade, ascending. Records without a valid year are skipped.
pub fn decade_distribution(dataset: &Dataset) -> Vec<DecadeCount> {
    let mut decades: BTreeMap<i64, usize> = BTreeMap::new();
    for decade in dataset.records.iter().filter_map(|r| r.decade()) {
        *decades.entry(decade).or_default() += 1;
    }
    decades
        .into_iter()
        .map(|(decade, count)| DecadeCount { decade, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassColumn, Record, Schema};

    fn schema() -> Schema {
        Schema {
            class_column: ClassColumn::RecClass,
            has_year: true,
            has_fall: true,
        }
    }

    fn classed(class: Option<&str>) -> Record {
        let mut rec = Record::new("c");
        rec.class = class.map(str::to_string);
        rec
    }

    fn labels(dist: &CategoryDistribution) -> Vec<&str> {
        dist.entries.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(1, 1), 100.0);
        assert_eq!(percentage(0, 10), 0.0);
        // 1/8 = 12.5% exactly, no rounding involved
        assert_eq!(percentage(1, 8), 12.5);
    }

    #[test]
    fn test_percentage_half_rounds_away_from_zero() {
        // 1/16 = 6.25% exactly; 1/32 = 3.125% is a half case at the third decimal
        assert_eq!(percentage(1, 16), 6.25);
        assert_eq!(percentage(1, 32), 3.13);
    }

    #[test]
    fn test_percentage_decimal_ties_round_up() {
        // 1.005%, 12.345% and 0.125% are exact decimal halves
        assert_eq!(percentage(1005, 100_000), 1.01);
        assert_eq!(percentage(12_345, 100_000), 12.35);
        assert_eq!(percentage(125, 100_000), 0.13);
        assert_eq!(percentage(1004, 100_000), 1.0);
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(3, 0), 0.0);
    }

    #[test]
    fn test_class_distribution_scenario() {
        let ds = Dataset::from_records(
            "scenario",
            schema(),
            vec![classed(Some("L5")), classed(Some("L6")), classed(Some("L5"))],
        );
        let dist = class_distribution(&ds);
        assert_eq!(dist.total_records, 3);
        assert_eq!(labels(&dist), vec!["L5", "L6"]);
        assert_eq!(dist.entries[0].count, 2);
        assert_eq!(dist.entries[0].percentage, 66.67);
        assert_eq!(dist.entries[1].count, 1);
        assert_eq!(dist.entries[1].percentage, 33.33);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let ds = Dataset::from_records(
            "ties",
            schema(),
            vec![
                classed(Some("H5")),
                classed(Some("CM2")),
                classed(Some("L6")),
                classed(Some("L6")),
                classed(Some("CM2")),
                classed(Some("H5")),
                classed(Some("Iron")),
            ],
        );
        let dist = class_distribution(&ds);
        assert_eq!(labels(&dist), vec!["H5", "CM2", "L6", "Iron"]);
    }

    #[test]
    fn test_missing_classes_still_count_in_denominator() {
        let ds = Dataset::from_records(
            "missing",
            schema(),
            vec![classed(Some("L5")), classed(None), classed(None), classed(None)],
        );
        let dist = class_distribution(&ds);
        assert_eq!(dist.len(), 1);
        assert_eq!(dist.entries[0].percentage, 25.0);
    }

    #[test]
    fn test_top_and_bottom() {
        let records = ["a", "a", "a", "a", "b", "b", "b", "c", "c", "d"]
            .iter()
            .map(|c| classed(Some(c)))
            .collect();
        let ds = Dataset::from_records("tb", schema(), records);
        let dist = class_distribution(&ds);

        let top: Vec<&str> = dist.top(2).iter().map(|e| e.label.as_str()).collect();
        assert_eq!(top, vec!["a", "b"]);
        let bottom: Vec<&str> = dist.bottom(2).iter().map(|e| e.label.as_str()).collect();
        assert_eq!(bottom, vec!["c", "d"]);
    }

    #[test]
    fn test_top_and_bottom_with_fewer_classes() {
        let ds = Dataset::from_records(
            "few",
            schema(),
            vec![classed(Some("a")), classed(Some("b"))],
        );
        let dist = class_distribution(&ds);
        assert_eq!(dist.top(10).len(), 2);
        assert_eq!(dist.bottom(10).len(), 2);
    }

    #[test]
    fn test_fall_type_distribution() {
        let falls = [Some("Found"), Some("Fell"), Some("Found"), None];
        let records = falls
            .iter()
            .map(|f| {
                let mut rec = Record::new("f");
                rec.fall = f.map(str::to_string);
                rec
            })
            .collect();
        let ds = Dataset::from_records("falls", schema(), records);
        let dist = fall_type_distribution(&ds);
        assert_eq!(labels(&dist), vec!["Found", "Fell"]);
        assert_eq!(dist.get("Found").unwrap().percentage, 50.0);
        assert_eq!(dist.get("Fell").unwrap().percentage, 25.0);
    }

    #[test]
    fn test_decade_distribution_scenario() {
        let years = [Some(1980.0), None, None, Some(2001.0)];
        let records = years
            .iter()
            .map(|y| {
                let mut rec = Record::new("y");
                rec.year = *y;
                rec
            })
            .collect();
        let ds = Dataset::from_records("decades", schema(), records);
        let decades = decade_distribution(&ds);
        assert_eq!(
            decades,
            vec![
                DecadeCount {
                    decade: 1980,
                    count: 1
                },
                DecadeCount {
                    decade: 2000,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_decade_distribution_skips_unrepresentable_years() {
        let records = [1e19, 1975.0, f64::MAX]
            .iter()
            .map(|y| {
                let mut rec = Record::new("y");
                rec.year = Some(*y);
                rec
            })
            .collect();
        let ds = Dataset::from_records("huge", schema(), records);
        assert_eq!(
            decade_distribution(&ds),
            vec![DecadeCount {
                decade: 1970,
                count: 1
            }]
        );
    }

    #[test]
    fn test_decade_distribution_ascending() {
        let records = [2015.0, 1861.0, 1999.0, 1864.0]
            .iter()
            .map(|y| {
                let mut rec = Record::new("y");
                rec.year = Some(*y);
                rec
            })
            .collect();
        let ds = Dataset::from_records("order", schema(), records);
        let decades: Vec<i64> = decade_distribution(&ds).iter().map(|d| d.decade).collect();
        assert_eq!(decades, vec![1860, 1990, 2010]);
        assert_eq!(decade_distribution(&ds)[0].count, 2);
    }
}
