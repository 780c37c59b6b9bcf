use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::rank_tint;
use crate::data::filter::rank_key;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Name table (central panel)
// ---------------------------------------------------------------------------

/// Render the displayed names. The rank column only exists in rank mode.
/// Clicking a row selects that name for the history chart.
pub fn names_table(ui: &mut Ui, state: &mut AppState) {
    let Some(gender) = state.selected_gender else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Choose boys or girls on the left");
        });
        return;
    };

    ui.heading(format!(
        "Names for {} ({})",
        gender.to_string().to_lowercase(),
        state.displayed.len()
    ));
    ui.separator();

    if state.displayed.is_empty() {
        ui.label("No names match the current filters.");
        return;
    }

    let rank_sorted = state.rank_sorted();
    let worst = state.worst_displayed_rank();
    let row_height = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
    let mut clicked: Option<String> = None;

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .sense(egui::Sense::click())
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
    if rank_sorted {
        table = table.column(Column::exact(70.0));
    }
    table = table.column(Column::remainder());

    table
        .header(22.0, |mut header| {
            if rank_sorted {
                header.col(|ui: &mut Ui| {
                    ui.strong("Rank");
                });
            }
            header.col(|ui: &mut Ui| {
                ui.strong("Name");
            });
        })
        .body(|body| {
            body.rows(row_height, state.displayed.len(), |mut row| {
                let item = &state.displayed[row.index()];
                row.set_selected(state.selected_name.as_deref() == Some(item.name.as_str()));
                if rank_sorted {
                    row.col(|ui: &mut Ui| {
                        let tint = rank_tint(gender, rank_key(&item.rank), worst);
                        ui.label(RichText::new(&item.rank).color(tint).strong());
                    });
                }
                row.col(|ui: &mut Ui| {
                    ui.label(&item.name);
                });
                if row.response().clicked() {
                    clicked = Some(item.name.clone());
                }
            });
        });

    if let Some(name) = clicked {
        state.select_name(Some(name));
    }
}
