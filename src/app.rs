use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, results};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AntennaEffApp {
    pub state: AppState,
}

impl AntennaEffApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for AntennaEffApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: antenna frequency specs ----
        egui::SidePanel::left("antenna_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: computed figures ----
        egui::TopBottomPanel::bottom("results_panel")
            .resizable(true)
            .default_height(200.0)
            .show(ctx, |ui| {
                results::results_table(ui, &self.state);
            });

        // ---- Central panel: efficiency curves ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::efficiency_plot(ui, &self.state);
        });

        panels::band_picker(ctx, &mut self.state);
    }
}
