//! What each chart draws, independent of the egui frame.
//!
//! The renderers in [`crate::ui::plot`] only translate these descriptions into
//! `egui_plot` calls, so toggle handling and axis scaling are tested here.

use chrono::{DateTime, NaiveDateTime};
use eframe::egui::Color32;

use crate::color;
use crate::data::filter::FilteredView;
use crate::data::model::Reading;

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Temperature,
    Humidity,
    Pressure,
}

impl Series {
    pub fn name(self) -> &'static str {
        match self {
            Series::Temperature => "Temperature",
            Series::Humidity => "Humidity",
            Series::Pressure => "Pressure",
        }
    }

    pub fn axis_title(self) -> &'static str {
        match self {
            Series::Temperature => "Temperature (°C)",
            Series::Humidity => "Humidity (%)",
            Series::Pressure => "Pressure (hPa)",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Series::Temperature => "°C",
            Series::Humidity => "%",
            Series::Pressure => "hPa",
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            Series::Temperature => color::TEMPERATURE,
            Series::Humidity => color::HUMIDITY,
            Series::Pressure => color::PRESSURE,
        }
    }

    pub fn value(self, r: &Reading) -> f64 {
        match self {
            Series::Temperature => r.temperature,
            Series::Humidity => r.humidity,
            Series::Pressure => r.pressure,
        }
    }
}

// ---------------------------------------------------------------------------
// Time axis
// ---------------------------------------------------------------------------

/// Plot x coordinate for a calendar time (seconds, wall clock read as UTC).
pub fn time_to_x(t: NaiveDateTime) -> f64 {
    t.and_utc().timestamp_millis() as f64 / 1000.0
}

pub fn x_to_time(x: f64) -> Option<NaiveDateTime> {
    if !x.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((x * 1000.0).round() as i64).map(|t| t.naive_utc())
}

/// Tick label for the shared time axis; shows the clock only when the
/// visible span is shorter than a few days.
pub fn format_time_tick(x: f64, span_seconds: f64) -> String {
    let Some(t) = x_to_time(x) else {
        return String::new();
    };
    if span_seconds < 3.0 * 86_400.0 {
        t.format("%m-%d %H:%M").to_string()
    } else {
        t.format("%Y-%m-%d").to_string()
    }
}

// ---------------------------------------------------------------------------
// Value ranges and the secondary-axis mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Range of the finite values; a flat series is widened by ±1.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            return None;
        }
        if (max - min).abs() < f64::EPSILON {
            return Some(Self {
                min: min - 1.0,
                max: max + 1.0,
            });
        }
        Some(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Affine map from a secondary series' range onto the primary axis range,
/// so both can share one plot area while keeping their own scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMapping {
    pub secondary: ValueRange,
    pub primary: ValueRange,
}

impl AxisMapping {
    /// Secondary value → plot coordinate.
    pub fn to_primary(&self, v: f64) -> f64 {
        self.primary.min + (v - self.secondary.min) / self.secondary.span() * self.primary.span()
    }

    /// Plot coordinate → secondary value (for the right-hand tick labels).
    pub fn to_secondary(&self, y: f64) -> f64 {
        self.secondary.min + (y - self.primary.min) / self.primary.span() * self.secondary.span()
    }
}

// ---------------------------------------------------------------------------
// Chart descriptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAxis {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub series: Series,
    pub axis: YAxis,
    /// `[x, y]` in plot coordinates.
    pub points: Vec<[f64; 2]>,
}

/// Temperature (left axis) and humidity (right axis) over shared time.
#[derive(Debug, Clone, PartialEq)]
pub struct DualAxisChart {
    pub traces: Vec<Trace>,
    /// Present when humidity is drawn on top of temperature's scale.
    pub mapping: Option<AxisMapping>,
}

impl DualAxisChart {
    pub fn has(&self, series: Series) -> bool {
        self.traces.iter().any(|t| t.series == series)
    }

    pub fn series(&self) -> Vec<Series> {
        self.traces.iter().map(|t| t.series).collect()
    }

    /// Label for a right-axis tick at plot coordinate `y`.
    pub fn right_tick_value(&self, y: f64) -> f64 {
        match &self.mapping {
            Some(m) => m.to_secondary(y),
            None => y,
        }
    }
}

fn raw_points(view: &FilteredView, series: Series) -> Vec<[f64; 2]> {
    view.iter()
        .map(|r| [time_to_x(r.time), series.value(r)])
        .collect()
}

/// Build the dual-axis chart, or `None` when both series are hidden.
pub fn dual_axis_chart(
    view: &FilteredView,
    show_temperature: bool,
    show_humidity: bool,
) -> Option<DualAxisChart> {
    if !show_temperature && !show_humidity {
        return None;
    }

    let mut traces = Vec::with_capacity(2);
    let mut mapping = None;

    if show_temperature {
        traces.push(Trace {
            series: Series::Temperature,
            axis: YAxis::Left,
            points: raw_points(view, Series::Temperature),
        });
    }

    if show_humidity {
        let mut points = raw_points(view, Series::Humidity);
        if show_temperature {
            let primary = ValueRange::of(view.iter().map(|r| r.temperature));
            let secondary = ValueRange::of(view.iter().map(|r| r.humidity));
            if let (Some(primary), Some(secondary)) = (primary, secondary) {
                let m = AxisMapping { secondary, primary };
                for p in &mut points {
                    p[1] = m.to_primary(p[1]);
                }
                mapping = Some(m);
            }
        }
        traces.push(Trace {
            series: Series::Humidity,
            axis: YAxis::Right,
            points,
        });
    }

    Some(DualAxisChart { traces, mapping })
}

/// Build the pressure trace, or `None` when it is hidden.
pub fn pressure_chart(view: &FilteredView, show_pressure: bool) -> Option<Trace> {
    show_pressure.then(|| Trace {
        series: Series::Pressure,
        axis: YAxis::Left,
        points: raw_points(view, Series::Pressure),
    })
}

// ---------------------------------------------------------------------------
// Unified hover
// ---------------------------------------------------------------------------

/// Reading closest in time to plot coordinate `x`.
pub fn nearest_reading(view: &FilteredView, x: f64) -> Option<&Reading> {
    view.iter()
        .min_by(|a, b| {
            let da = (time_to_x(a.time) - x).abs();
            let db = (time_to_x(b.time) - x).abs();
            da.total_cmp(&db)
        })
}

/// Hover text listing every shown series at the reading nearest to `x`.
pub fn hover_text(view: &FilteredView, x: f64, series: &[Series]) -> String {
    let Some(r) = nearest_reading(view, x) else {
        return String::new();
    };
    let mut text = r.time.format("%Y-%m-%d %H:%M:%S").to_string();
    for s in series {
        text.push_str(&format!("\n{}: {:.2} {}", s.name(), s.value(r), s.unit()));
    }
    text
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn view() -> FilteredView {
        let t0 = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        FilteredView {
            readings: vec![
                Reading {
                    time: t0,
                    temperature: 10.0,
                    humidity: 40.0,
                    pressure: 1010.0,
                },
                Reading {
                    time: t0 + chrono::Duration::hours(1),
                    temperature: 20.0,
                    humidity: 60.0,
                    pressure: 1012.0,
                },
                Reading {
                    time: t0 + chrono::Duration::hours(2),
                    temperature: 15.0,
                    humidity: 80.0,
                    pressure: 1011.0,
                },
            ],
        }
    }

    #[test]
    fn both_hidden_draws_nothing() {
        assert_eq!(dual_axis_chart(&view(), false, false), None);
        assert_eq!(pressure_chart(&view(), false), None);
    }

    #[test]
    fn temperature_toggle_only_removes_temperature() {
        let v = view();
        let both = dual_axis_chart(&v, true, true).unwrap();
        let humidity_only = dual_axis_chart(&v, false, true).unwrap();

        assert_eq!(both.series(), vec![Series::Temperature, Series::Humidity]);
        assert_eq!(humidity_only.series(), vec![Series::Humidity]);
        assert!(!humidity_only.has(Series::Temperature));

        // Alone, humidity is drawn on its own raw scale.
        assert_eq!(humidity_only.mapping, None);
        let ys: Vec<f64> = humidity_only.traces[0].points.iter().map(|p| p[1]).collect();
        assert_eq!(ys, vec![40.0, 60.0, 80.0]);

        // Pressure does not depend on the dual-axis toggles.
        let p = pressure_chart(&v, true).unwrap();
        assert_eq!(p.points.len(), 3);
        assert_eq!(p.points[1][1], 1012.0);
    }

    #[test]
    fn humidity_is_mapped_onto_temperature_scale() {
        let chart = dual_axis_chart(&view(), true, true).unwrap();
        let m = chart.mapping.unwrap();
        assert_eq!(m.primary, ValueRange { min: 10.0, max: 20.0 });
        assert_eq!(m.secondary, ValueRange { min: 40.0, max: 80.0 });

        let ys: Vec<f64> = chart.traces[1].points.iter().map(|p| p[1]).collect();
        assert_eq!(ys, vec![10.0, 15.0, 20.0]);
        assert!((chart.right_tick_value(15.0) - 60.0).abs() < 1e-9);

        // Temperature keeps raw values.
        let temps: Vec<f64> = chart.traces[0].points.iter().map(|p| p[1]).collect();
        assert_eq!(temps, vec![10.0, 20.0, 15.0]);
    }

    #[test]
    fn flat_and_empty_ranges() {
        assert_eq!(
            ValueRange::of([5.0, 5.0, f64::NAN]),
            Some(ValueRange { min: 4.0, max: 6.0 })
        );
        assert_eq!(ValueRange::of([f64::NAN]), None);
        assert_eq!(ValueRange::of(Vec::new()), None);
    }

    #[test]
    fn hover_lists_shown_series_at_nearest_reading() {
        let v = view();
        let x = time_to_x(v.readings[1].time) + 600.0;
        let text = hover_text(&v, x, &[Series::Temperature, Series::Humidity]);
        assert!(text.starts_with("2024-01-01 01:00:00"));
        assert!(text.contains("Temperature: 20.00 °C"));
        assert!(text.contains("Humidity: 60.00 %"));
        assert!(!text.contains("Pressure"));
        assert_eq!(hover_text(&FilteredView::default(), x, &[Series::Pressure]), "");
    }

    #[test]
    fn time_axis_round_trips() {
        let t = view().readings[2].time;
        assert_eq!(x_to_time(time_to_x(t)), Some(t));
        assert_eq!(format_time_tick(time_to_x(t), 3600.0), "01-01 02:00");
        assert_eq!(format_time_tick(time_to_x(t), 30.0 * 86_400.0), "2024-01-01");
    }
}
