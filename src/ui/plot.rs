use std::ops::RangeInclusive;
use std::sync::Arc;

use eframe::egui::{RichText, Ui};
use egui_plot::{AxisHints, Corner, GridMark, HPlacement, Legend, Line, Plot, PlotPoints};

use crate::chart::{self, Series, Trace, YAxis};
use crate::data::filter::FilteredView;
use crate::state::SelectionState;

// ---------------------------------------------------------------------------
// Shared plot setup
// ---------------------------------------------------------------------------

fn time_axis(mark: GridMark, range: &RangeInclusive<f64>) -> String {
    chart::format_time_tick(mark.value, range.end() - range.start())
}

fn axis_title(series: Series) -> RichText {
    RichText::new(series.axis_title()).color(series.color())
}

fn line(trace: &Trace) -> Line {
    Line::new(PlotPoints::from(trace.points.clone()))
        .name(trace.series.name())
        .color(trace.series.color())
        .width(2.0)
}

// ---------------------------------------------------------------------------
// Temperature & humidity (dual y-axis)
// ---------------------------------------------------------------------------

/// Temperature on the left axis, humidity on the right. Draws nothing at all
/// when both toggles are off.
pub fn temperature_humidity_plot(
    ui: &mut Ui,
    view: &Arc<FilteredView>,
    selection: &SelectionState,
) {
    let Some(chart) =
        chart::dual_axis_chart(view, selection.show_temperature, selection.show_humidity)
    else {
        return;
    };

    ui.heading("Temperature & Humidity");

    let mut y_axes = Vec::with_capacity(2);
    for trace in &chart.traces {
        let hints = AxisHints::new_y().label(axis_title(trace.series));
        let hints = match trace.axis {
            YAxis::Left => hints.placement(HPlacement::Left),
            YAxis::Right => {
                let mapping = chart.mapping;
                hints
                    .placement(HPlacement::Right)
                    .formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                        let v = match mapping {
                            Some(m) => m.to_secondary(mark.value),
                            None => mark.value,
                        };
                        format!("{v:.1}")
                    })
            }
        };
        y_axes.push(hints);
    }

    let hover_view = Arc::clone(view);
    let shown = chart.series();

    Plot::new("temperature_humidity_plot")
        .height(400.0)
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label("Time")
        .x_axis_formatter(time_axis)
        .custom_y_axes(y_axes)
        .label_formatter(move |_name, value| chart::hover_text(&hover_view, value.x, &shown))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for trace in &chart.traces {
                plot_ui.line(line(trace));
            }
        });
}

// ---------------------------------------------------------------------------
// Pressure (single axis)
// ---------------------------------------------------------------------------

pub fn pressure_plot(ui: &mut Ui, view: &Arc<FilteredView>, selection: &SelectionState) {
    let Some(trace) = chart::pressure_chart(view, selection.show_pressure) else {
        return;
    };

    ui.heading("Pressure");

    let hover_view = Arc::clone(view);

    Plot::new("pressure_plot")
        .height(300.0)
        .x_axis_label("Time")
        .y_axis_label(Series::Pressure.axis_title())
        .x_axis_formatter(time_axis)
        .label_formatter(move |_name, value| {
            chart::hover_text(&hover_view, value.x, &[Series::Pressure])
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(line(&trace));
        });
}
