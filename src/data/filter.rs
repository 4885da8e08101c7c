use chrono::NaiveDate;

use super::model::Reading;

// ---------------------------------------------------------------------------
// Date interval: inclusive [start, end] at calendar-date granularity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IntervalError {
    #[error("start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}

/// Inclusive date range. Always satisfies `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, IntervalError> {
        if start > end {
            return Err(IntervalError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Both bounds inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Readings whose calendar date lies inside the selected interval,
/// in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    pub readings: Vec<Reading>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.readings.iter()
    }
}

/// Keep every reading with `interval.start <= date <= interval.end`.
pub fn filter(readings: &[Reading], interval: &DateInterval) -> FilteredView {
    FilteredView {
        readings: readings
            .iter()
            .filter(|r| interval.contains(r.date()))
            .copied()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDateTime};

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, 0).unwrap()
    }

    fn reading(time: NaiveDateTime, temperature: f64) -> Reading {
        Reading {
            time,
            temperature,
            humidity: 50.0,
            pressure: 1013.0,
        }
    }

    fn sample() -> Vec<Reading> {
        vec![
            reading(at(3, 0, 0), 1.0),
            reading(at(1, 23, 59), 2.0),
            reading(at(2, 12, 0), 3.0),
            reading(at(4, 0, 1), 4.0),
            reading(at(2, 0, 0), 5.0),
        ]
    }

    #[test]
    fn inverted_interval_is_rejected() {
        assert_eq!(
            DateInterval::new(day(3), day(2)),
            Err(IntervalError::Inverted {
                start: day(3),
                end: day(2)
            })
        );
        assert!(DateInterval::new(day(2), day(2)).is_ok());
    }

    #[test]
    fn keeps_inclusive_bounds_in_source_order() {
        let rows = sample();
        let view = filter(&rows, &DateInterval::new(day(2), day(3)).unwrap());
        let temps: Vec<f64> = view.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn full_range_keeps_everything_and_past_end_is_empty() {
        let rows = sample();
        let all = filter(&rows, &DateInterval::new(day(1), day(4)).unwrap());
        assert_eq!(all.readings, rows);

        let next = day(4) + Duration::days(1);
        let none = filter(&rows, &DateInterval::new(next, next).unwrap());
        assert!(none.is_empty());
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let rows = sample();
        for (s, e) in [(1, 1), (1, 3), (2, 4), (3, 3), (5, 9)] {
            let interval = DateInterval::new(day(s), day(e)).unwrap();
            let once = filter(&rows, &interval);
            let twice = filter(&once.readings, &interval);
            assert_eq!(once, twice);
            assert!(once.len() <= rows.len());
            assert!(once.iter().all(|r| interval.contains(r.date())));
        }
    }

    #[test]
    fn single_day_example() {
        let rows = vec![
            Reading {
                time: at(1, 0, 0),
                temperature: 20.0,
                humidity: 50.0,
                pressure: 1013.0,
            },
            Reading {
                time: at(2, 0, 0),
                temperature: 22.0,
                humidity: 55.0,
                pressure: 1011.0,
            },
        ];
        let view = filter(&rows, &DateInterval::new(day(1), day(1)).unwrap());
        assert_eq!(view.readings, vec![rows[0]]);
        assert_eq!(view.len(), 1);
    }
}
