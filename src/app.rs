use std::time::Duration;

use eframe::egui::{self, Ui};

use crate::config::ViewerConfig;
use crate::state::AppState;
use crate::ui::{history, list, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BabyNamesApp {
    pub state: AppState,
}

impl BabyNamesApp {
    /// Create the app and kick off the initial load of `config.data_dir`.
    pub fn new(cc: &eframe::CreationContext<'_>, config: &ViewerConfig) -> Self {
        let mut state = AppState::new(config.data_dir.clone());
        let ctx = cc.egui_ctx.clone();
        state.start_load(config.data_dir.clone(), move || ctx.request_repaint());
        Self { state }
    }
}

impl eframe::App for BabyNamesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Everything else waits for the load ----
        if self.state.loading {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        ui.spinner();
                        ui.label("Loading names…");
                    });
                });
            });
            ctx.request_repaint_after(Duration::from_millis(100));
            return;
        }

        if self.state.dataset.as_ref().map_or(true, |ds| ds.is_empty()) {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("No names loaded  (File → Open data folder…)");
                });
            });
            return;
        }

        // ---- Left side panel: gender + filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: rank history of the selected name ----
        if self.state.selected_name.is_some() {
            egui::TopBottomPanel::bottom("history_panel")
                .resizable(true)
                .default_height(220.0)
                .show(ctx, |ui| {
                    history::rank_history(ui, &mut self.state);
                });
        }

        // ---- Central panel: names ----
        egui::CentralPanel::default().show(ctx, |ui| {
            list::names_table(ui, &mut self.state);
        });
    }
}
