use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{ListingTable, COL_PRICE};

// ---------------------------------------------------------------------------
// Listing table widget
// ---------------------------------------------------------------------------

/// Render the listings at `indices` as a scrollable table, columns in
/// source-file order. The normalized price is shown in place of the raw
/// `Price` text.
pub fn listing_table(ui: &mut Ui, table: &ListingTable, indices: &[usize]) {
    if indices.is_empty() {
        ui.label("No listings match the current selection.");
        return;
    }

    let columns = &table.column_names;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(90.0), columns.len())
        .header(20.0, |mut header| {
            for col in columns {
                header.col(|ui| {
                    ui.strong(col.as_str());
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let listing = &table.listings[indices[row.index()]];
                for col in columns {
                    row.col(|ui| {
                        if col == COL_PRICE {
                            ui.label(format!("${:.2}", listing.price));
                        } else {
                            ui.label(listing.cell(col).to_string());
                        }
                    });
                }
            });
        });
}
