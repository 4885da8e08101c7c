//! End-to-end flow: file → state → filter → chart model.
//!
//! Run with: cargo test --test dashboard_flow_test

use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;

use weather_dashboard::chart::{self, Series};
use weather_dashboard::config::Config;
use weather_dashboard::data::model::TimeBase;
use weather_dashboard::state::AppState;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

/// Two readings: 2024-01-01 and 2024-01-02, midnight UTC.
fn write_fixture(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("weather-flow-{}-{name}", std::process::id()));
    let schema = Arc::new(Schema::new(vec![
        Field::new("humidity", DataType::Float64, false),
        Field::new("pressure", DataType::Float64, false),
        Field::new("temperature", DataType::Float64, false),
        Field::new("timestamp", DataType::Int64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from(vec![50.0, 55.0])),
        Arc::new(Float64Array::from(vec![1013.0, 1011.0])),
        Arc::new(Float64Array::from(vec![20.0, 22.0])),
        Arc::new(Int64Array::from(vec![1_704_067_200, 1_704_153_600])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    path
}

/// `n` daily readings starting 2024-01-01 midnight UTC.
fn write_json(path: &std::path::Path, n: usize) {
    let doc = serde_json::json!({
        "humidity": (0..n).map(|i| 40.0 + i as f64).collect::<Vec<_>>(),
        "pressure": (0..n).map(|i| 1000.0 + i as f64).collect::<Vec<_>>(),
        "temperature": (0..n).map(|i| 10.0 + i as f64).collect::<Vec<_>>(),
        "timestamp": (0..n).map(|i| 1_704_067_200 + 86_400 * i as i64).collect::<Vec<_>>(),
    });
    std::fs::write(path, doc.to_string()).unwrap();
}

fn loaded_state(path: PathBuf) -> AppState {
    let mut state = AppState::new(&Config {
        data_path: path,
        time_base: TimeBase::Utc,
    });
    state.load();
    assert!(state.load_error.is_none(), "{:?}", state.load_error);
    state
}

#[test]
fn single_day_selection_shows_one_row() {
    let path = write_fixture("single-day.parquet");
    let mut state = loaded_state(path.clone());

    let ds = state.dataset.clone().unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.readings[0].temperature, 20.0);
    assert_eq!(ds.readings[1].humidity, 55.0);
    assert_eq!(ds.readings[1].pressure, 1011.0);
    assert_eq!(ds.readings[1].time, day(2).and_hms_opt(0, 0, 0).unwrap());
    assert_eq!(state.visible_count(), 2);

    state.set_interval(day(1), day(1));
    assert_eq!(state.visible_count(), 1);
    assert_eq!(state.view.readings[0], ds.readings[0]);

    std::fs::remove_file(&path).ok();
}

#[test]
fn toggles_shape_the_charts_independently() {
    let path = write_fixture("toggles.parquet");
    let mut state = loaded_state(path.clone());

    state.selection.as_mut().unwrap().show_temperature = false;
    let selection = state.selection.clone().unwrap();
    assert!(selection.show_humidity && selection.show_pressure);

    let dual = chart::dual_axis_chart(
        &state.view,
        selection.show_temperature,
        selection.show_humidity,
    )
    .unwrap();
    assert_eq!(dual.series(), vec![Series::Humidity]);

    let pressure = chart::pressure_chart(&state.view, selection.show_pressure).unwrap();
    assert_eq!(pressure.points.len(), 2);

    assert!(chart::dual_axis_chart(&state.view, false, false).is_none());
    assert!(chart::pressure_chart(&state.view, false).is_none());

    std::fs::remove_file(&path).ok();
}

#[test]
fn reload_picks_up_new_file_contents() {
    let path = write_fixture("reload.parquet");
    let mut state = loaded_state(path.clone());
    state.set_interval(day(2), day(2));
    assert_eq!(state.visible_count(), 1);

    let json_path = path.with_extension("json");
    write_json(&json_path, 3);
    state.open(json_path.clone());

    // A new dataset resets the selection to its full range.
    assert_eq!(state.visible_count(), 3);
    let interval = state.selection.as_ref().unwrap().interval();
    assert_eq!((interval.start(), interval.end()), (day(1), day(3)));

    // Same path, new contents: only a reload picks them up.
    write_json(&json_path, 5);
    state.set_interval(day(1), day(1));
    assert_eq!(state.dataset.as_ref().unwrap().len(), 3);

    state.reload();
    assert_eq!(state.dataset.as_ref().unwrap().len(), 5);
    assert_eq!(state.visible_count(), 5);
    let interval = state.selection.as_ref().unwrap().interval();
    assert_eq!((interval.start(), interval.end()), (day(1), day(5)));

    std::fs::remove_file(&path).ok();
    std::fs::remove_file(&json_path).ok();
}
