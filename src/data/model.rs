use std::collections::BTreeMap;
use std::fmt;

use super::normalize::clean_price;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a listing column
// ---------------------------------------------------------------------------

/// Required columns: every dataset must carry these, checked at load time.
pub const COL_BRAND: &str = "Brand";
pub const COL_TYPE: &str = "Type";
pub const COL_CONDITION: &str = "Condition";
pub const COL_PRICE: &str = "Price";

pub const REQUIRED_COLUMNS: [&str; 4] = [COL_BRAND, COL_TYPE, COL_CONDITION, COL_PRICE];

/// A dynamically-typed cell value covering the dtypes seen in listing files.
/// Used downstream as `BTreeSet` / `BTreeMap` keys, so it must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so CellValue can key ordered collections --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the cell as a price candidate.
    ///
    /// Numeric cells pass through directly; textual cells go through the
    /// full cleaning routine. Non-finite results are rejected so every
    /// retained listing carries a usable price.
    pub fn as_price(&self) -> Option<f64> {
        let price = match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => clean_price(s),
            _ => None,
        };
        price.filter(|p| p.is_finite())
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the dataset
// ---------------------------------------------------------------------------

/// A raw row as produced by the loader, before price normalization.
#[derive(Debug, Clone)]
pub struct RawListing {
    /// Raw `Price` cell, still in whatever shape the source file used.
    pub price: CellValue,
    /// Every other column: column_name → value.
    pub fields: BTreeMap<String, CellValue>,
}

/// A retained listing: normalized price plus pass-through columns.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Normalized price, always finite.
    pub price: f64,
    /// All columns except `Price`.
    pub fields: BTreeMap<String, CellValue>,
}

impl Listing {
    /// Cell for a column, `Null` when the row lacks it.
    pub fn cell(&self, column: &str) -> &CellValue {
        self.fields.get(column).unwrap_or(&CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// ListingTable – the complete normalized dataset
// ---------------------------------------------------------------------------

/// The full normalized dataset, immutable after construction.
#[derive(Debug, Clone)]
pub struct ListingTable {
    /// Retained listings, in source order.
    pub listings: Vec<Listing>,
    /// Source column names in file order (includes `Price`).
    pub column_names: Vec<String>,
    /// Per column: distinct values in first-seen order. Seeds filter widgets.
    pub distinct_values: BTreeMap<String, Vec<CellValue>>,
    /// Rows dropped because their price could not be normalized.
    pub dropped_rows: usize,
}

impl ListingTable {
    /// Normalize the raw rows into a table.
    ///
    /// Rows whose price cannot be normalized are dropped from the table
    /// entirely, not hidden per view; the count is kept for the UI.
    pub fn from_rows(column_names: Vec<String>, rows: Vec<RawListing>) -> Self {
        let total = rows.len();
        let listings: Vec<Listing> = rows
            .into_iter()
            .filter_map(|row| {
                row.price.as_price().map(|price| Listing {
                    price,
                    fields: row.fields,
                })
            })
            .collect();
        let dropped_rows = total - listings.len();

        let mut distinct_values: BTreeMap<String, Vec<CellValue>> = BTreeMap::new();
        for listing in &listings {
            for (col, val) in &listing.fields {
                // Cardinality is small (categorical columns), linear scan is fine.
                let seen = distinct_values.entry(col.clone()).or_default();
                if !seen.contains(val) {
                    seen.push(val.clone());
                }
            }
        }

        ListingTable {
            listings,
            column_names,
            distinct_values,
            dropped_rows,
        }
    }

    /// Distinct values of a column in first-seen order.
    pub fn distinct(&self, column: &str) -> &[CellValue] {
        self.distinct_values
            .get(column)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of retained listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the table retained no listings.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(price: &str, brand: &str) -> RawListing {
        let mut fields = BTreeMap::new();
        fields.insert(COL_BRAND.to_string(), CellValue::String(brand.to_string()));
        RawListing {
            price: CellValue::String(price.to_string()),
            fields,
        }
    }

    #[test]
    fn unparseable_rows_are_dropped_and_counted() {
        // "$100", "$50-$150", "free" → two retained rows at 100.0, one drop.
        let table = ListingTable::from_rows(
            vec![COL_BRAND.to_string(), COL_PRICE.to_string()],
            vec![raw("$100", "Dell"), raw("$50-$150", "HP"), raw("free", "Acer")],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.dropped_rows, 1);
        let mean: f64 =
            table.listings.iter().map(|l| l.price).sum::<f64>() / table.len() as f64;
        assert_eq!(mean, 100.0);
    }

    #[test]
    fn numeric_price_cells_pass_through() {
        let mut fields = BTreeMap::new();
        fields.insert(COL_BRAND.to_string(), CellValue::String("Dell".into()));
        let rows = vec![
            RawListing {
                price: CellValue::Integer(250),
                fields: fields.clone(),
            },
            RawListing {
                price: CellValue::Float(99.5),
                fields,
            },
        ];
        let table = ListingTable::from_rows(vec![], rows);
        assert_eq!(table.listings[0].price, 250.0);
        assert_eq!(table.listings[1].price, 99.5);
    }

    #[test]
    fn non_finite_prices_are_rejected() {
        let rows = vec![
            RawListing {
                price: CellValue::Float(f64::NAN),
                fields: BTreeMap::new(),
            },
            RawListing {
                price: CellValue::String("inf".into()),
                fields: BTreeMap::new(),
            },
        ];
        let table = ListingTable::from_rows(vec![], rows);
        assert!(table.is_empty());
        assert_eq!(table.dropped_rows, 2);
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let table = ListingTable::from_rows(
            vec![],
            vec![raw("1", "Dell"), raw("2", "HP"), raw("3", "Dell"), raw("4", "Acer")],
        );
        let brands: Vec<String> =
            table.distinct(COL_BRAND).iter().map(|v| v.to_string()).collect();
        assert_eq!(brands, ["Dell", "HP", "Acer"]);
    }
}
