use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Top bar: menu, tabs, dataset summary
// ---------------------------------------------------------------------------

/// Render the top menu / tab bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for tab in Tab::ALL {
            if ui.selectable_label(state.tab == tab, tab.label()).clicked() {
                state.tab = tab;
            }
        }

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} listings loaded, {} dropped (unparseable price)",
                table.len(),
                table.dropped_rows
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Side panel: filter controls for the active tab
// ---------------------------------------------------------------------------

/// Checkbox multi-select over a categorical column, with All/None shortcuts.
/// Clearing the selection hides every row rather than disabling the filter.
pub fn value_filter(ui: &mut Ui, state: &mut AppState, column: &str) {
    let Some(table) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone the choices so we can mutate state inside the loop.
    let values = table.distinct(column).to_vec();
    let n_selected = state
        .selection_mut(column)
        .map(|s| s.len())
        .unwrap_or_default();

    ui.strong(format!("{column}  ({n_selected}/{})", values.len()));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all(column);
        }
        if ui.small_button("None").clicked() {
            state.select_none(column);
        }
    });
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for val in &values {
                let is_selected = state
                    .selection_mut(column)
                    .map(|s| s.contains(val))
                    .unwrap_or(false);
                let mut checked = is_selected;
                if ui.checkbox(&mut checked, val.to_string()).changed() {
                    state.toggle_selection(column, val);
                }
            }
        });
}

/// Inclusive price interval, seeded from the table's truncated bounds.
pub fn price_filter(ui: &mut Ui, state: &mut AppState) {
    let Some((min, max)) = state.price_bounds else {
        // Every row was dropped during normalization; there is no range
        // to select from.
        ui.label("No listings with a usable price.");
        return;
    };

    ui.strong("Price range ($)");
    ui.add(
        egui::Slider::new(&mut state.price_range.0, min as f64..=max as f64)
            .text("Min")
            .fixed_decimals(0),
    );
    ui.add(
        egui::Slider::new(&mut state.price_range.1, min as f64..=max as f64)
            .text("Max")
            .fixed_decimals(0),
    );

    // Keep the interval well-formed when the handles cross.
    if state.price_range.0 > state.price_range.1 {
        state.price_range.0 = state.price_range.1;
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open listing data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} listings ({} dropped) with columns {:?}",
                    table.len(),
                    table.dropped_rows,
                    table.column_names
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
