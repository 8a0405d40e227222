use eframe::egui;

use crate::data::model::{COL_BRAND, COL_TYPE};
use crate::data::views;
use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MarketboardApp {
    pub state: AppState,
}

impl MarketboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl Default for MarketboardApp {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl eframe::App for MarketboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu + tab bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filter controls for the filter tabs ----
        let tab = self.state.tab;
        if matches!(tab, Tab::ByBrand | Tab::ByType | Tab::ByPrice) {
            egui::SidePanel::left("filter_panel")
                .default_width(220.0)
                .resizable(true)
                .show(ctx, |ui| match tab {
                    Tab::ByBrand => panels::value_filter(ui, &mut self.state, COL_BRAND),
                    Tab::ByType => panels::value_filter(ui, &mut self.state, COL_TYPE),
                    Tab::ByPrice => panels::price_filter(ui, &mut self.state),
                    _ => {}
                });
        }

        // ---- Central panel: table or charts for the active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &mut self.state;
            let Some(tbl) = &state.table else {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a listing file to begin  (File → Open…)");
                });
                return;
            };

            match tab {
                Tab::FullData => table::listing_table(ui, tbl, &views::all_indices(tbl)),
                Tab::ByBrand => table::listing_table(
                    ui,
                    tbl,
                    &views::indices_matching(tbl, COL_BRAND, &state.brand_selection),
                ),
                Tab::ByType => table::listing_table(
                    ui,
                    tbl,
                    &views::indices_matching(tbl, COL_TYPE, &state.type_selection),
                ),
                Tab::ByPrice => {
                    if state.price_bounds.is_none() {
                        ui.centered_and_justified(|ui: &mut egui::Ui| {
                            ui.heading("No listings with a usable price.");
                        });
                    } else {
                        let (low, high) = state.price_range;
                        table::listing_table(
                            ui,
                            tbl,
                            &views::indices_in_price_range(tbl, low, high),
                        );
                    }
                }
                Tab::Charts => {
                    plot::charts(ui, tbl, state.brand_colors.as_ref(), &mut state.chart_type)
                }
            }
        });
    }
}
