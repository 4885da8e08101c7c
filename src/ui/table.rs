use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::FilteredView;

const HEADERS: [&str; 4] = ["time", "temperature", "humidity", "pressure"];

// ---------------------------------------------------------------------------
// Raw data table
// ---------------------------------------------------------------------------

/// Every filtered reading, unsorted and unformatted.
pub fn raw_table(ui: &mut Ui, view: &FilteredView) {
    ui.heading("Raw Data");

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(170.0))
        .columns(Column::auto().at_least(100.0), HEADERS.len() - 1)
        .min_scrolled_height(300.0)
        .max_scroll_height(500.0)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, view.len(), |mut row| {
                let r = &view.readings[row.index()];
                row.col(|ui| {
                    ui.label(r.time.to_string());
                });
                for value in [r.temperature, r.humidity, r.pressure] {
                    row.col(|ui| {
                        ui.label(value.to_string());
                    });
                }
            });
        });
}
