use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::gender_accent;
use crate::data::export::export_to_path;
use crate::data::filter::SortBy;
use crate::data::model::Gender;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – gender cards and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: gender selection, then filters once a gender is picked.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Gender");
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        for gender in Gender::ALL {
            let selected = state.selected_gender == Some(gender);
            let text = RichText::new(gender.to_string())
                .size(18.0)
                .strong()
                .color(gender_accent(gender));
            if ui
                .add_sized([90.0, 48.0], egui::SelectableLabel::new(selected, text))
                .clicked()
            {
                state.select_gender(gender);
            }
        }
    });

    if state.selected_gender.is_none() {
        ui.add_space(8.0);
        ui.label("Pick a gender to see names.");
        return;
    }

    ui.add_space(8.0);
    ui.heading("Filters");
    ui.separator();

    // ---- Year ----
    ui.strong("Year");
    let years = state.available_years();
    let year_text = state
        .filters
        .year
        .map_or_else(|| "All years".to_string(), |y| y.to_string());
    egui::ComboBox::from_id_salt("year")
        .selected_text(year_text)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.filters.year.is_none(), "All years")
                .clicked()
            {
                state.set_year(None);
            }
            for year in years {
                if ui
                    .selectable_label(state.filters.year == Some(year), year.to_string())
                    .clicked()
                {
                    state.set_year(Some(year));
                }
            }
        });
    ui.add_space(4.0);

    // ---- Sort ----
    ui.strong("Sort");
    let has_year = state.filters.year.is_some();
    let current = state.filters.sort_by;
    egui::ComboBox::from_id_salt("sort_by")
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SortBy::Alpha, SortBy::Alpha.label())
                .clicked()
            {
                state.set_sort_by(SortBy::Alpha);
            }
            if ui
                .add_enabled(
                    has_year,
                    egui::SelectableLabel::new(current == SortBy::Rank, SortBy::Rank.label()),
                )
                .on_disabled_hover_text("Select a year first")
                .clicked()
            {
                state.set_sort_by(SortBy::Rank);
            }
        });
    if !has_year && current == SortBy::Rank {
        ui.label(RichText::new("Select a year to sort by rank").weak());
    }
    ui.add_space(4.0);

    // ---- Search ----
    ui.strong("Search");
    let mut search = state.filters.search_text.clone();
    if ui
        .add(egui::TextEdit::singleline(&mut search).hint_text("Filter names…"))
        .changed()
    {
        state.set_search_text(search);
    }
    ui.add_space(4.0);

    // ---- Plural names ----
    let mut include = state.filters.include_plural_names;
    if ui
        .checkbox(&mut include, "Include multi-word names")
        .changed()
    {
        state.set_include_plural(include);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui
                .add_enabled(!state.loading, egui::Button::new("Open data folder…"))
                .clicked()
            {
                open_data_dialog(ui.ctx(), state);
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.displayed.is_empty(), egui::Button::new("Export list…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let stats = ds.stats();
            ui.label(format!(
                "{} years, {} boys' names, {} girls' names",
                stats.years, stats.male_names, stats.female_names
            ));
            if state.selected_gender.is_some() {
                ui.separator();
                ui.label(format!("{} shown", state.displayed.len()));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_data_dialog(ctx: &egui::Context, state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open names data folder (with boys/ and girls/)")
        .set_directory(&state.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("Loading names from {}", dir.display());
        let ctx = ctx.clone();
        state.start_load(dir, move || ctx.request_repaint());
    }
}

pub fn export_dialog(state: &mut AppState) {
    let gender = state
        .selected_gender
        .map_or("names", |g| g.segment());
    let year = state
        .filters
        .year
        .map_or_else(|| "all".to_string(), |y| y.to_string());

    let file = rfd::FileDialog::new()
        .set_title("Export displayed names")
        .set_file_name(format!("{gender}-{year}.csv"))
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = export_to_path(&path, &state.displayed) {
            log::error!("Failed to export names: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
