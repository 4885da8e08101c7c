use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::color;
use crate::data::loader::SUPPORTED_EXTENSIONS;
use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the date range, series toggles and the visible-row metric.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let Some(selection) = state.selection.as_ref() else {
        ui.label("No data loaded.");
        return;
    };

    // ---- Date range ----
    let bounds = selection.bounds();
    let interval = selection.interval();
    let mut start = interval.start();
    let mut end = interval.end();

    ui.strong("Select Date Range:");
    let mut range_changed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("From");
        range_changed |= ui
            .add(DatePickerButton::new(&mut start).id_salt("range_start"))
            .changed();
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("To");
        range_changed |= ui
            .add(DatePickerButton::new(&mut end).id_salt("range_end"))
            .changed();
    });
    ui.small(format!("Data available {} – {}", bounds.start(), bounds.end()));
    if range_changed {
        state.set_interval(start, end);
    }
    ui.separator();

    // ---- Series toggles ----
    if let Some(selection) = state.selection.as_mut() {
        ui.checkbox(&mut selection.show_temperature, "Show Temperature");
        ui.checkbox(&mut selection.show_humidity, "Show Humidity");
        ui.checkbox(&mut selection.show_pressure, "Show Pressure");
        ui.separator();
        ui.checkbox(&mut selection.show_table, "Show Raw Data");
    }
    ui.separator();

    // ---- Metric ----
    ui.label("Data Points");
    ui.heading(state.visible_count().to_string());
}

// ---------------------------------------------------------------------------
// Central panel – charts and table
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &AppState) {
    if let Some(err) = &state.load_error {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(
                RichText::new(format!("{err}\n\nOpen another file or reload (File menu)."))
                    .color(color::ERROR)
                    .heading(),
            );
        });
        return;
    }

    let Some(selection) = &state.selection else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view sensor data  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            plot::temperature_humidity_plot(ui, &state.view, selection);
            plot::pressure_plot(ui, &state.view, selection);
            if selection.show_table {
                ui.separator();
                table::raw_table(ui, &state.view);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        let name = state
            .cache
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match &state.dataset {
            Some(ds) => ui.label(format!("{name}: {} readings", ds.len())),
            None => ui.label(name),
        };

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(color::ERROR));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sensor data")
        .add_filter("Supported files", &SUPPORTED_EXTENSIONS)
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open(path);
    }
}
