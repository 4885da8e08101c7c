use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::Config;
use crate::data::cache::DatasetCache;
use crate::data::filter::{filter, DateInterval, FilteredView, IntervalError};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Selection state: date interval + visibility toggles
// ---------------------------------------------------------------------------

/// What the user has chosen to look at. Each setter changes one field.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    /// Dataset's own date range, shown next to the pickers.
    bounds: DateInterval,
    interval: DateInterval,
    pub show_temperature: bool,
    pub show_humidity: bool,
    pub show_pressure: bool,
    pub show_table: bool,
}

impl SelectionState {
    /// Defaults for a freshly loaded dataset: full range, every series on,
    /// raw table off. `None` for an empty dataset.
    pub fn for_dataset(dataset: &Dataset) -> Option<Self> {
        let (min_date, max_date) = dataset.date_bounds()?;
        let bounds = DateInterval::new(min_date, max_date).ok()?;
        Some(Self {
            bounds,
            interval: bounds,
            show_temperature: true,
            show_humidity: true,
            show_pressure: true,
            show_table: false,
        })
    }

    pub fn bounds(&self) -> DateInterval {
        self.bounds
    }

    pub fn interval(&self) -> DateInterval {
        self.interval
    }

    /// Replace the interval. An inverted range is rejected and the previous
    /// interval kept. Ranges outside the data are stored as chosen and simply
    /// match no readings.
    pub fn set_interval(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), IntervalError> {
        self.interval = DateInterval::new(start, end)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub cache: DatasetCache,

    /// Current dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// None until a non-empty dataset is loaded.
    pub selection: Option<SelectionState>,

    /// Readings inside the selected interval (cached, shared with plot closures).
    pub view: Arc<FilteredView>,

    /// Fatal load error; nothing is rendered until the user opens or reloads.
    pub load_error: Option<String>,

    /// Non-fatal message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            cache: DatasetCache::new(config.data_path.clone(), config.time_base),
            dataset: None,
            selection: None,
            view: Arc::default(),
            load_error: None,
            status_message: None,
        }
    }

    /// Fetch the dataset through the cache and reset the selection.
    pub fn load(&mut self) {
        match self.cache.get() {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load sensor data: {e}");
                self.dataset = None;
                self.selection = None;
                self.view = Arc::default();
                self.status_message = None;
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Drop the cached dataset and read the current file again.
    pub fn reload(&mut self) {
        log::info!("Reloading {}", self.cache.path().display());
        self.cache.invalidate();
        self.load();
    }

    /// Switch to another data file and load it.
    pub fn open(&mut self, path: PathBuf) {
        self.cache.set_path(path);
        self.load();
    }

    /// Ingest a loaded dataset, reset selection to defaults and refilter.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.selection = SelectionState::for_dataset(&dataset);
        self.status_message = if self.selection.is_none() {
            Some("Dataset contains no readings".to_string())
        } else {
            None
        };
        self.dataset = Some(dataset);
        self.load_error = None;
        self.refilter();
    }

    /// Recompute `view` after a dataset or interval change.
    pub fn refilter(&mut self) {
        self.view = Arc::new(match (&self.dataset, &self.selection) {
            (Some(ds), Some(sel)) => filter(&ds.readings, &sel.interval()),
            _ => FilteredView::default(),
        });
    }

    /// Apply a date-range edit from the controls.
    pub fn set_interval(&mut self, start: NaiveDate, end: NaiveDate) {
        let Some(selection) = self.selection.as_mut() else {
            return;
        };
        match selection.set_interval(start, end) {
            Ok(()) => {
                log::debug!("Date range set to {start} ..= {end}");
                self.status_message = None;
                self.refilter();
            }
            Err(e) => {
                log::warn!("Rejected date range: {e}");
                self.status_message = Some(format!("Invalid date range: {e}"));
            }
        }
    }

    /// Number of readings currently in view.
    pub fn visible_count(&self) -> usize {
        self.view.len()
    }
}
