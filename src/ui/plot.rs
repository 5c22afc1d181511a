use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, VLine};

use antenna_eff::cst::DEFAULT_AXIS_UNIT;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Efficiency plot (central panel)
// ---------------------------------------------------------------------------

/// Plot the real part of every efficiency curve; the selected antenna's
/// curve is drawn thicker with its frequency windows marked.
pub fn efficiency_plot(ui: &mut Ui, state: &AppState) {
    if state.curves.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a project to view efficiency curves  (File → Open project…)");
        });
        return;
    }

    let unit = state
        .curves
        .first()
        .map_or(DEFAULT_AXIS_UNIT, |c| c.unit());
    let selected_curve = state
        .selected_row
        .and_then(|r| state.bindings.get(r))
        .map(|b| b.curve.as_str());
    let windows = state.selected_windows();

    Plot::new("efficiency_plot")
        .legend(Legend::default())
        .x_axis_label(format!("Frequency / {unit}"))
        .y_axis_label("Efficiency")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for curve in &state.curves {
                let points: PlotPoints = curve
                    .x()
                    .iter()
                    .zip(curve.y())
                    .map(|(&x, v)| [x, v.re()])
                    .collect();

                let width = if selected_curve == Some(curve.name()) {
                    3.0
                } else {
                    1.5
                };
                let line = Line::new(points)
                    .name(curve.name())
                    .color(state.palette.color_for(curve.name()))
                    .width(width);
                plot_ui.line(line);
            }

            for (label, window) in &windows {
                for edge in [window.inf, window.sup] {
                    plot_ui.vline(
                        VLine::new(edge)
                            .name(label)
                            .color(Color32::from_gray(160))
                            .width(1.0),
                    );
                }
            }
        });
}
