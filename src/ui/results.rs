use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::efficiency_color;
use crate::state::AppState;

/// Render the computed figures, one row per (antenna, frequency).
pub fn results_table(ui: &mut Ui, state: &AppState) {
    let Some(map) = &state.results else {
        ui.label("No results yet. Set frequencies and press Compute.");
        return;
    };

    let rows: Vec<(&str, &str, _)> = map
        .iter()
        .flat_map(|(antenna, freqs)| freqs.iter().map(move |(label, row)| (antenna, label, *row)))
        .collect();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(140.0))
        .columns(Column::remainder().at_least(60.0), 4)
        .header(20.0, |mut header| {
            for title in ["Antenna", "Frequency", "First", "Peak", "Last", "Mean"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (antenna, label, row) in rows {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(antenna);
                    });
                    table_row.col(|ui| {
                        ui.label(label);
                    });
                    if row.is_out_of_range() {
                        table_row.col(|ui| {
                            ui.label(RichText::new("out of range").italics());
                        });
                        for _ in 0..3 {
                            table_row.col(|ui| {
                                ui.label("–");
                            });
                        }
                        return;
                    }
                    for value in [row.first, row.peak, row.last, row.mean] {
                        table_row.col(|ui| {
                            ui.label(RichText::new(format!("{value:.2}")).color(efficiency_color(value)));
                        });
                    }
                });
            }
        });
}
