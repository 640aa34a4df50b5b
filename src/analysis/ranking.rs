use super::cleaner::{CleanRecord, CleanedDataset};

/// The `n` heaviest cleaned records, heaviest first.
///
/// Equal masses keep their source order.
pub fn top_by_mass<'a>(cleaned: &CleanedDataset<'a>, n: usize) -> Vec<CleanRecord<'a>> {
    let mut rows = cleaned.rows.clone();
    rows.sort_by(|a, b| b.mass.total_cmp(&a.mass));
    rows.truncate(n);
    rows
}
