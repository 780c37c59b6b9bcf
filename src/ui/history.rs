use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::color::gender_accent;
use crate::data::filter::rank_key;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Rank history chart (bottom panel)
// ---------------------------------------------------------------------------

/// Plot the selected name's rank across all loaded years.
pub fn rank_history(ui: &mut Ui, state: &mut AppState) {
    let Some(name) = state.selected_name.clone() else {
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.strong(format!("{name} – rank by year"));
        if ui.small_button("Close").clicked() {
            state.select_name(None);
        }
    });

    // Tie ranges plot at their first position; unparsable ranks are skipped.
    let points: Vec<[f64; 2]> = state
        .selected_history()
        .into_iter()
        .filter_map(|(year, rank)| rank_key(rank).map(|r| [f64::from(year), r as f64]))
        .collect();

    if points.is_empty() {
        ui.label("No ranked years for this name.");
        return;
    }

    let color = state
        .selected_gender
        .map(gender_accent)
        .unwrap_or(Color32::LIGHT_BLUE);

    Plot::new("rank_history")
        .x_axis_label("Year")
        .y_axis_label("Rank (1 = most popular)")
        .allow_scroll(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(&name)
                    .color(color)
                    .width(2.0),
            );
            plot_ui.points(Points::new(PlotPoints::from(points)).radius(3.5).color(color));
        });
}
