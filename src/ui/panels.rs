use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use antenna_eff::config::Settings;
use antenna_eff::frequency;

use crate::state::{AppState, BandPicker};

// ---------------------------------------------------------------------------
// Left side panel – antenna rows
// ---------------------------------------------------------------------------

/// Whether every non-empty segment of `spec` resolves.
fn spec_is_clean(spec: &str) -> bool {
    spec.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .all(|s| frequency::resolve_segment(s).is_some())
}

/// Render the antenna list with one editable frequency spec per row.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Antennas");
    ui.separator();

    if state.project.is_none() {
        ui.label("No project open.");
        return;
    }
    if state.bindings.is_empty() {
        ui.label("No antenna efficiency curves found.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for row in 0..state.bindings.len() {
                let (antenna, curve, mut spec) = {
                    let b = &state.bindings[row];
                    (b.antenna.clone(), b.curve.clone(), b.spec.clone())
                };

                ui.horizontal(|ui: &mut Ui| {
                    let selected = state.selected_row == Some(row);
                    if ui
                        .selectable_label(selected, RichText::new(&antenna).strong())
                        .on_hover_text(&curve)
                        .clicked()
                    {
                        state.selected_row = if selected { None } else { Some(row) };
                    }
                    if ui.small_button("Bands…").clicked() {
                        state.picker = Some(BandPicker::from_spec(row, &spec));
                    }
                });

                let clean = spec_is_clean(&spec);
                let mut edit = egui::TextEdit::singleline(&mut spec)
                    .hint_text("n78, 2400~2500 MHz")
                    .desired_width(f32::INFINITY);
                if !clean {
                    edit = edit.text_color(Color32::RED);
                }
                let response = ui.add(edit);
                if response.changed() {
                    state.bindings[row].spec = spec.clone();
                }
                if response.lost_focus() {
                    state.set_spec(row, spec);
                }
                ui.add_space(6.0);
            }
        });
}

// ---------------------------------------------------------------------------
// Band picker window
// ---------------------------------------------------------------------------

/// Render the band picker if one is open; apply or discard on close.
pub fn band_picker(ctx: &egui::Context, state: &mut AppState) {
    let Some(picker) = state.picker.as_mut() else {
        return;
    };
    let antenna = state
        .bindings
        .get(picker.row)
        .map(|b| b.antenna.clone())
        .unwrap_or_default();

    let mut apply: Option<bool> = None;
    egui::Window::new(format!("Frequencies: {antenna}"))
        .collapsible(false)
        .resizable(true)
        .show(ctx, |ui: &mut Ui| {
            ScrollArea::vertical().max_height(420.0).show(ui, |ui: &mut Ui| {
                for (heading, bands) in frequency::band_groups() {
                    egui::CollapsingHeader::new(RichText::new(heading).strong())
                        .default_open(true)
                        .show(ui, |ui: &mut Ui| {
                            ui.horizontal_wrapped(|ui: &mut Ui| {
                                for band in bands {
                                    let mut on = picker.checked.contains(band.name);
                                    let toggled = ui
                                        .checkbox(&mut on, band.name)
                                        .on_hover_text(band.summary())
                                        .changed();
                                    if toggled && on {
                                        picker.checked.insert(band.name);
                                    } else if toggled {
                                        picker.checked.remove(band.name);
                                    }
                                }
                            });
                        });
                }
            });

            ui.separator();
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Custom (MHz):");
                let valid = picker.custom_is_valid();
                let mut edit = egui::TextEdit::singleline(&mut picker.custom).hint_text("1800, 2400~2500");
                if !valid {
                    edit = edit.text_color(Color32::RED);
                }
                ui.add(edit);
            });
            if !picker.extra.is_empty() {
                ui.label(format!("Kept as typed: {}", picker.extra.join(", ")));
            }

            ui.separator();
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Clear").clicked() {
                    picker.checked.clear();
                    picker.custom.clear();
                    picker.extra.clear();
                }
                if ui
                    .add_enabled(picker.custom_is_valid(), egui::Button::new("Apply"))
                    .clicked()
                {
                    apply = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    apply = Some(false);
                }
            });
        });

    match apply {
        Some(true) => {
            let row = picker.row;
            if let Some(spec) = picker.to_spec() {
                state.picker = None;
                state.set_spec(row, spec);
            }
        }
        Some(false) => state.picker = None,
        None => {}
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open project…").clicked() {
                open_project_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.results.is_some(), egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(project) = &state.project {
            ui.label(format!(
                "{}: {} curves, {} antennas",
                project.name(),
                state.curves.len(),
                state.bindings.len()
            ));
            ui.separator();
            if ui.button("Compute").clicked() {
                match state.compute() {
                    Ok(()) => state.status_message = None,
                    Err(e) => state.report(e),
                }
            }
        }

        if state.settings_path.is_none() {
            ui.label(RichText::new("Settings unreadable, not saving").color(Color32::ORANGE))
                .on_hover_text(Settings::default_path().display().to_string());
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_project_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CST project")
        .add_filter("CST project", &["cst"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open_project(&path) {
            state.report(e);
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let mut dialog = rfd::FileDialog::new().set_title("Export efficiency table");
    if let Some(dir) = &state.settings.export_dir {
        dialog = dialog.set_directory(dir);
    }

    if let Some(dir) = dialog.pick_folder() {
        match state.export(&dir) {
            Ok(path) => state.status_message = Some(format!("Exported {}", path.display())),
            Err(e) => state.report(e),
        }
    }
}
