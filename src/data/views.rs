use std::collections::BTreeSet;

use thiserror::Error;

use super::model::{CellValue, ListingTable};

// ---------------------------------------------------------------------------
// Derived views: filters and aggregations over the normalized table
// ---------------------------------------------------------------------------
//
// Every function here is a pure read-only derivation. Nothing mutates the
// table and nothing is cached; callers recompute whenever their inputs
// change.

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("no listings with a usable price")]
    EmptyTable,
}

/// Indices of listings whose `column` value is one of `selected`.
///
/// Order-preserving set membership. An empty selection means nothing is
/// selected, so the result is empty rather than "no filter".
pub fn indices_matching(
    table: &ListingTable,
    column: &str,
    selected: &BTreeSet<CellValue>,
) -> Vec<usize> {
    if selected.is_empty() {
        return Vec::new();
    }
    table
        .listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| selected.contains(listing.cell(column)))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of listings whose price lies in `[low, high]`, inclusive on
/// both ends.
pub fn indices_in_price_range(table: &ListingTable, low: f64, high: f64) -> Vec<usize> {
    table
        .listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| listing.price >= low && listing.price <= high)
        .map(|(i, _)| i)
        .collect()
}

/// Mean price per distinct value of `column`, restricted to `indices`.
///
/// Keys appear in first-seen order; a key only appears when at least one
/// listing carries it, so every mean is over a non-empty group.
pub fn mean_price_by(
    table: &ListingTable,
    indices: &[usize],
    column: &str,
) -> Vec<(CellValue, f64)> {
    let mut groups: Vec<(CellValue, f64, usize)> = Vec::new();
    for &i in indices {
        let listing = &table.listings[i];
        let key = listing.cell(column);
        match groups.iter_mut().find(|(k, _, _)| k == key) {
            Some((_, sum, count)) => {
                *sum += listing.price;
                *count += 1;
            }
            None => groups.push((key.clone(), listing.price, 1)),
        }
    }
    groups
        .into_iter()
        .map(|(key, sum, count)| (key, sum / count as f64))
        .collect()
}

/// Mean price per distinct `(col_a, col_b)` pair, restricted to `indices`.
/// Feeds the magnitude-encoded scatter chart.
pub fn mean_price_by_pair(
    table: &ListingTable,
    indices: &[usize],
    col_a: &str,
    col_b: &str,
) -> Vec<(CellValue, CellValue, f64)> {
    let mut groups: Vec<(CellValue, CellValue, f64, usize)> = Vec::new();
    for &i in indices {
        let listing = &table.listings[i];
        let a = listing.cell(col_a);
        let b = listing.cell(col_b);
        match groups.iter_mut().find(|(ka, kb, _, _)| ka == a && kb == b) {
            Some((_, _, sum, count)) => {
                *sum += listing.price;
                *count += 1;
            }
            None => groups.push((a.clone(), b.clone(), listing.price, 1)),
        }
    }
    groups
        .into_iter()
        .map(|(a, b, sum, count)| (a, b, sum / count as f64))
        .collect()
}

/// Distinct values of `column` among `indices`, in first-seen order.
pub fn distinct_values(table: &ListingTable, indices: &[usize], column: &str) -> Vec<CellValue> {
    let mut seen: Vec<CellValue> = Vec::new();
    for &i in indices {
        let val = table.listings[i].cell(column);
        if !seen.contains(val) {
            seen.push(val.clone());
        }
    }
    seen
}

/// `(min, max)` price over the whole table, truncated to integers. Seeds
/// the selectable price range. An empty table is an explicit error, never
/// a degenerate default range.
pub fn price_bounds(table: &ListingTable) -> Result<(i64, i64), ViewError> {
    if table.is_empty() {
        return Err(ViewError::EmptyTable);
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for listing in &table.listings {
        min = min.min(listing.price);
        max = max.max(listing.price);
    }
    Ok((min as i64, max as i64))
}

/// All indices of the table, for views that start from the full dataset.
pub fn all_indices(table: &ListingTable) -> Vec<usize> {
    (0..table.len()).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::{Listing, COL_BRAND, COL_CONDITION};

    fn listing(brand: &str, condition: &str, price: f64) -> Listing {
        let mut fields = BTreeMap::new();
        fields.insert(COL_BRAND.to_string(), CellValue::String(brand.to_string()));
        fields.insert(
            COL_CONDITION.to_string(),
            CellValue::String(condition.to_string()),
        );
        Listing { price, fields }
    }

    fn table(listings: Vec<Listing>) -> ListingTable {
        let mut distinct_values = BTreeMap::new();
        for l in &listings {
            for (col, val) in &l.fields {
                let seen: &mut Vec<CellValue> =
                    distinct_values.entry(col.clone()).or_default();
                if !seen.contains(val) {
                    seen.push(val.clone());
                }
            }
        }
        ListingTable {
            listings,
            column_names: Vec::new(),
            distinct_values,
            dropped_rows: 0,
        }
    }

    fn sample() -> ListingTable {
        table(vec![
            listing("Dell", "Used", 100.0),
            listing("HP", "New", 300.0),
            listing("Dell", "New", 200.0),
            listing("Acer", "Used", 50.0),
        ])
    }

    fn brand(name: &str) -> CellValue {
        CellValue::String(name.to_string())
    }

    #[test]
    fn empty_selection_yields_empty_result() {
        let t = sample();
        let selected = BTreeSet::new();
        assert!(indices_matching(&t, COL_BRAND, &selected).is_empty());
    }

    #[test]
    fn membership_filter_preserves_order() {
        let t = sample();
        let selected: BTreeSet<CellValue> = [brand("Dell"), brand("Acer")].into();
        assert_eq!(indices_matching(&t, COL_BRAND, &selected), vec![0, 2, 3]);
    }

    #[test]
    fn range_filter_is_inclusive_and_idempotent() {
        let t = sample();
        let once = indices_in_price_range(&t, 100.0, 300.0);
        assert_eq!(once, vec![0, 1, 2]);

        // Filtering the already-filtered subset by the same range again
        // changes nothing.
        let sub = table(once.iter().map(|&i| t.listings[i].clone()).collect());
        let twice = indices_in_price_range(&sub, 100.0, 300.0);
        assert_eq!(twice.len(), once.len());
        assert_eq!(twice, all_indices(&sub));
    }

    #[test]
    fn mean_by_key_groups_and_averages() {
        let t = sample();
        let means = mean_price_by(&t, &all_indices(&t), COL_BRAND);
        assert_eq!(
            means,
            vec![
                (brand("Dell"), 150.0),
                (brand("HP"), 300.0),
                (brand("Acer"), 50.0),
            ]
        );
    }

    #[test]
    fn mean_by_key_single_row_is_exact() {
        let t = sample();
        let means = mean_price_by(&t, &[1], COL_BRAND);
        assert_eq!(means, vec![(brand("HP"), 300.0)]);
    }

    #[test]
    fn mean_by_key_omits_absent_keys() {
        let t = sample();
        // Restrict to Dell rows only: HP and Acer must not appear, not even
        // with a zero mean.
        let means = mean_price_by(&t, &[0, 2], COL_BRAND);
        assert_eq!(means.len(), 1);
        assert_eq!(means[0].0, brand("Dell"));
    }

    #[test]
    fn mean_by_pair_builds_triples() {
        let t = sample();
        let triples = mean_price_by_pair(&t, &all_indices(&t), COL_BRAND, COL_CONDITION);
        assert_eq!(triples.len(), 4);
        assert_eq!(
            triples[0],
            (brand("Dell"), CellValue::String("Used".into()), 100.0)
        );
    }

    #[test]
    fn distinct_values_first_seen_order() {
        let t = sample();
        let brands = distinct_values(&t, &all_indices(&t), COL_BRAND);
        assert_eq!(brands, vec![brand("Dell"), brand("HP"), brand("Acer")]);
    }

    #[test]
    fn price_bounds_truncates() {
        let t = table(vec![
            listing("A", "x", 10.0),
            listing("B", "x", 25.0),
            listing("C", "x", 17.0),
        ]);
        assert_eq!(price_bounds(&t), Ok((10, 25)));

        let fractional = table(vec![listing("A", "x", 10.9), listing("B", "x", 25.5)]);
        assert_eq!(price_bounds(&fractional), Ok((10, 25)));
    }

    #[test]
    fn price_bounds_errors_on_empty_table() {
        let t = table(Vec::new());
        assert_eq!(price_bounds(&t), Err(ViewError::EmptyTable));
    }
}
