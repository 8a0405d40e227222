use std::collections::BTreeSet;

use eframe::egui::{Color32, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, MarkerShape, Plot, Points};

use crate::color::{generate_palette, ColorMap};
use crate::data::model::{CellValue, ListingTable, COL_BRAND, COL_CONDITION, COL_TYPE};
use crate::data::views;

// ---------------------------------------------------------------------------
// Charts tab (central panel)
// ---------------------------------------------------------------------------
//
// Three summaries of the normalized table, recomputed from scratch every
// frame so they always reflect the loaded data:
//  * mean price per brand (bar chart)
//  * mean price per brand × condition, price as marker size (bubble chart)
//  * mean price per condition within one selected type (bar chart)

pub fn charts(
    ui: &mut Ui,
    table: &ListingTable,
    brand_colors: Option<&ColorMap>,
    chart_type: &mut Option<CellValue>,
) {
    if table.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No listings with a usable price to chart.");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Average Price by Brand");
            brand_mean_chart(ui, table, brand_colors);
            ui.separator();

            ui.heading("Brand vs Condition, sized by Average Price");
            brand_condition_chart(ui, table, brand_colors);
            ui.separator();

            ui.heading("Average Price by Condition for a Type");
            condition_mean_chart(ui, table, chart_type);
        });
}

/// Formatter that labels integer axis positions with category names.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() > 0.01 || rounded < 0.0 {
            return String::new();
        }
        labels
            .get(rounded as usize)
            .cloned()
            .unwrap_or_default()
    }
}

fn brand_color(colors: Option<&ColorMap>, brand: &CellValue) -> Color32 {
    colors
        .map(|c| c.color_for(brand))
        .unwrap_or(Color32::LIGHT_BLUE)
}

fn brand_mean_chart(ui: &mut Ui, table: &ListingTable, colors: Option<&ColorMap>) {
    let indices = views::all_indices(table);
    let means = views::mean_price_by(table, &indices, COL_BRAND);
    let labels: Vec<String> = means.iter().map(|(brand, _)| brand.to_string()).collect();

    Plot::new("brand_mean_chart")
        .legend(Legend::default())
        .height(280.0)
        .y_axis_label("Average price ($)")
        .x_axis_formatter(category_formatter(labels))
        .show(ui, |plot_ui| {
            for (i, (brand, mean)) in means.iter().enumerate() {
                let bar = Bar::new(i as f64, *mean).width(0.6);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(brand.to_string())
                        .color(brand_color(colors, brand)),
                );
            }
        });
}

fn brand_condition_chart(ui: &mut Ui, table: &ListingTable, colors: Option<&ColorMap>) {
    let indices = views::all_indices(table);
    let triples = views::mean_price_by_pair(table, &indices, COL_BRAND, COL_CONDITION);
    let brands = views::distinct_values(table, &indices, COL_BRAND);
    let conditions = views::distinct_values(table, &indices, COL_CONDITION);

    let max_mean = triples.iter().map(|(_, _, m)| *m).fold(0.0_f64, f64::max);
    let brand_labels: Vec<String> = brands.iter().map(|b| b.to_string()).collect();
    let condition_labels: Vec<String> = conditions.iter().map(|c| c.to_string()).collect();

    Plot::new("brand_condition_chart")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_formatter(category_formatter(brand_labels))
        .y_axis_formatter(category_formatter(condition_labels))
        .show(ui, |plot_ui| {
            for (brand, condition, mean) in &triples {
                let (Some(x), Some(y)) = (
                    brands.iter().position(|b| b == brand),
                    conditions.iter().position(|c| c == condition),
                ) else {
                    continue;
                };

                // Marker area scales with the group's mean price.
                let scale = if max_mean > 0.0 { mean / max_mean } else { 0.0 };
                let radius = 3.0 + 14.0 * scale.sqrt() as f32;

                plot_ui.points(
                    Points::new(vec![[x as f64, y as f64]])
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(radius)
                        .color(brand_color(colors, brand))
                        .name(brand.to_string()),
                );
            }
        });
}

fn condition_mean_chart(ui: &mut Ui, table: &ListingTable, chart_type: &mut Option<CellValue>) {
    let types = table.distinct(COL_TYPE).to_vec();

    let current = chart_type
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default();
    eframe::egui::ComboBox::from_label("Type")
        .selected_text(current.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for t in &types {
                if ui.selectable_label(current == t.to_string(), t.to_string()).clicked() {
                    *chart_type = Some(t.clone());
                }
            }
        });

    let Some(selected) = chart_type.as_ref() else {
        ui.label("Select a type to chart.");
        return;
    };

    let selection: BTreeSet<CellValue> = [selected.clone()].into();
    let type_indices = views::indices_matching(table, COL_TYPE, &selection);
    let means = views::mean_price_by(table, &type_indices, COL_CONDITION);
    let labels: Vec<String> = means.iter().map(|(cond, _)| cond.to_string()).collect();
    let palette = generate_palette(means.len());

    Plot::new("condition_mean_chart")
        .legend(Legend::default())
        .height(280.0)
        .y_axis_label("Average price ($)")
        .x_axis_formatter(category_formatter(labels))
        .show(ui, |plot_ui| {
            for (i, (condition, mean)) in means.iter().enumerate() {
                let bar = Bar::new(i as f64, *mean).width(0.6);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(condition.to_string())
                        .color(palette[i]),
                );
            }
        });
}
