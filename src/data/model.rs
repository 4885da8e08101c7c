use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

// ---------------------------------------------------------------------------
// TimeBase – how epoch seconds become calendar time
// ---------------------------------------------------------------------------

/// Zone used when converting unix timestamps into wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeBase {
    /// The machine's local time zone.
    #[default]
    Local,
    Utc,
}

impl TimeBase {
    /// Parse `local` / `utc` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Some(TimeBase::Local),
            "utc" => Some(TimeBase::Utc),
            _ => None,
        }
    }

    /// Convert unix epoch seconds (possibly fractional) to calendar time.
    ///
    /// Returns `None` for non-finite or out-of-range values.
    pub fn datetime_from_epoch(self, seconds: f64) -> Option<NaiveDateTime> {
        if !seconds.is_finite() {
            return None;
        }
        let whole = seconds.floor();
        if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
            return None;
        }
        let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
        let utc = DateTime::from_timestamp(whole as i64, nanos)?;
        match self {
            TimeBase::Utc => Some(utc.naive_utc()),
            TimeBase::Local => Some(Local.from_utc_datetime(&utc.naive_utc()).naive_local()),
        }
    }
}

// ---------------------------------------------------------------------------
// Reading – one row of the sensor log
// ---------------------------------------------------------------------------

/// A single sensor sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub time: NaiveDateTime,
    /// °C
    pub temperature: f64,
    /// %
    pub humidity: f64,
    /// hPa
    pub pressure: f64,
}

impl Reading {
    /// Calendar date used by the date-range filter.
    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded sensor log
// ---------------------------------------------------------------------------

/// All readings in source-file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub readings: Vec<Reading>,
    pub source: PathBuf,
}

impl Dataset {
    pub fn new(readings: Vec<Reading>, source: impl Into<PathBuf>) -> Self {
        Dataset {
            readings,
            source: source.into(),
        }
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Earliest and latest calendar dates covered by the readings.
    ///
    /// The file is not required to be sorted, so both ends are scanned.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.readings.iter().map(|r| r.time).min()?;
        let max = self.readings.iter().map(|r| r.time).max()?;
        Some((min.date(), max.date()))
    }
}
