use std::collections::BTreeSet;

use crate::color::ColorMap;
use crate::data::model::{CellValue, ListingTable, COL_BRAND, COL_TYPE};
use crate::data::views;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The dashboard tabs, mirroring the analyst workflow: browse, narrow
/// down, then summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    FullData,
    ByBrand,
    ByType,
    ByPrice,
    Charts,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::FullData,
        Tab::ByBrand,
        Tab::ByType,
        Tab::ByPrice,
        Tab::Charts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::FullData => "Full Data",
            Tab::ByBrand => "Filter by Brand",
            Tab::ByType => "Filter by Type",
            Tab::ByPrice => "Filter by Price",
            Tab::Charts => "Charts",
        }
    }
}

/// The full UI state, independent of rendering.
///
/// The table is immutable once loaded; filters and chart inputs are pure
/// selections over it, recomputed by the views layer on demand.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub table: Option<ListingTable>,

    /// Active tab.
    pub tab: Tab,

    /// Brand values currently selected on the brand tab.
    pub brand_selection: BTreeSet<CellValue>,

    /// Type values currently selected on the type tab.
    pub type_selection: BTreeSet<CellValue>,

    /// Inclusive price interval selected on the price tab.
    pub price_range: (f64, f64),

    /// Truncated (min, max) price over the whole table. None when the
    /// table kept no rows, which disables the range view.
    pub price_bounds: Option<(i64, i64)>,

    /// Type highlighted in the condition chart.
    pub chart_type: Option<CellValue>,

    /// Brand → colour for the charts.
    pub brand_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            tab: Tab::FullData,
            brand_selection: BTreeSet::new(),
            type_selection: BTreeSet::new(),
            price_range: (0.0, 0.0),
            price_bounds: None,
            chart_type: None,
            brand_colors: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table: seed selections, price range, colours.
    pub fn set_table(&mut self, table: ListingTable) {
        self.brand_selection = table.distinct(COL_BRAND).iter().cloned().collect();
        self.type_selection = table.distinct(COL_TYPE).iter().cloned().collect();

        match views::price_bounds(&table) {
            Ok((min, max)) => {
                self.price_bounds = Some((min, max));
                self.price_range = (min as f64, max as f64);
                self.status_message = None;
            }
            Err(e) => {
                // Every row was dropped; range-dependent views stay off.
                self.price_bounds = None;
                self.price_range = (0.0, 0.0);
                self.status_message = Some(e.to_string());
            }
        }

        self.chart_type = table.distinct(COL_TYPE).first().cloned();
        self.brand_colors = Some(ColorMap::new(table.distinct(COL_BRAND)));
        self.table = Some(table);
    }

    /// Mutable selection set for a categorical filter column, if it has one.
    pub fn selection_mut(&mut self, column: &str) -> Option<&mut BTreeSet<CellValue>> {
        match column {
            COL_BRAND => Some(&mut self.brand_selection),
            COL_TYPE => Some(&mut self.type_selection),
            _ => None,
        }
    }

    /// Select every distinct value of a filter column.
    pub fn select_all(&mut self, column: &str) {
        let all: Option<BTreeSet<CellValue>> = self
            .table
            .as_ref()
            .map(|t| t.distinct(column).iter().cloned().collect());
        if let (Some(all), Some(selection)) = (all, self.selection_mut(column)) {
            *selection = all;
        }
    }

    /// Clear a filter column's selection (an empty selection shows nothing).
    pub fn select_none(&mut self, column: &str) {
        if let Some(selection) = self.selection_mut(column) {
            selection.clear();
        }
    }

    /// Toggle a single value in a filter column.
    pub fn toggle_selection(&mut self, column: &str, value: &CellValue) {
        if let Some(selection) = self.selection_mut(column) {
            if selection.contains(value) {
                selection.remove(value);
            } else {
                selection.insert(value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::{Listing, RawListing};

    fn loaded_state() -> AppState {
        let mk = |brand: &str, kind: &str, price: &str| {
            let mut fields = BTreeMap::new();
            fields.insert(COL_BRAND.to_string(), CellValue::String(brand.into()));
            fields.insert(COL_TYPE.to_string(), CellValue::String(kind.into()));
            RawListing {
                price: CellValue::String(price.into()),
                fields,
            }
        };
        let table = ListingTable::from_rows(
            vec![],
            vec![mk("Dell", "Laptop", "$100"), mk("HP", "Desktop", "$200")],
        );
        let mut state = AppState::default();
        state.set_table(table);
        state
    }

    #[test]
    fn loading_seeds_selections_and_bounds() {
        let state = loaded_state();
        assert_eq!(state.brand_selection.len(), 2);
        assert_eq!(state.type_selection.len(), 2);
        assert_eq!(state.price_bounds, Some((100, 200)));
        assert_eq!(state.price_range, (100.0, 200.0));
        assert!(state.chart_type.is_some());
    }

    #[test]
    fn toggle_and_select_none() {
        let mut state = loaded_state();
        let dell = CellValue::String("Dell".into());
        state.toggle_selection(COL_BRAND, &dell);
        assert_eq!(state.brand_selection.len(), 1);
        state.select_none(COL_BRAND);
        assert!(state.brand_selection.is_empty());
        state.select_all(COL_BRAND);
        assert_eq!(state.brand_selection.len(), 2);
    }

    #[test]
    fn empty_table_disables_range_views() {
        let table = ListingTable::from_rows(
            vec![],
            vec![RawListing {
                price: CellValue::String("free".into()),
                fields: BTreeMap::new(),
            }],
        );
        let mut state = AppState::default();
        state.set_table(table);
        assert_eq!(state.price_bounds, None);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn listing_cell_defaults_to_null() {
        let listing = Listing {
            price: 1.0,
            fields: BTreeMap::new(),
        };
        assert_eq!(listing.cell("Missing"), &CellValue::Null);
    }
}
