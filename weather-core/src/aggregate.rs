//! Buckets the provider's 3-hourly forecast list into daily min/max summaries.

use chrono::{DateTime, NaiveDate, TimeZone};

use crate::model::{Condition, DailyForecast, RawForecastEntry};

/// Upper bound on the number of daily summaries returned.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Rounds half away from zero: `20.5 -> 21`, `-2.5 -> -3`.
pub fn round_temperature(value: f64) -> i32 {
    value.round() as i32
}

struct DayBucket {
    date: NaiveDate,
    temps: Vec<f64>,
    condition: Condition,
}

/// Groups `entries` by calendar date in the time zone of `now`.
///
/// Entries falling on `now`'s date are skipped. Days keep the order in which
/// they were first seen, and each day's condition is taken from its first
/// sample. At most [`MAX_FORECAST_DAYS`] summaries are returned.
pub fn aggregate_daily<Tz: TimeZone>(
    entries: &[RawForecastEntry],
    now: &DateTime<Tz>,
) -> Vec<DailyForecast> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut buckets: Vec<DayBucket> = Vec::new();

    for entry in entries {
        let date = entry.timestamp.with_timezone(&tz).date_naive();
        if date == today {
            continue;
        }

        match buckets.iter_mut().find(|b| b.date == date) {
            Some(bucket) => bucket.temps.push(entry.temperature_c),
            None => buckets.push(DayBucket {
                date,
                temps: vec![entry.temperature_c],
                condition: entry.condition.clone(),
            }),
        }
    }

    buckets
        .into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(|bucket| {
            let min = bucket.temps.iter().copied().fold(f64::INFINITY, f64::min);
            let max = bucket.temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            DailyForecast {
                date: bucket.date,
                min_temp_c: round_temperature(min),
                max_temp_c: round_temperature(max),
                condition: bucket.condition,
            }
        })
        .collect()
}
