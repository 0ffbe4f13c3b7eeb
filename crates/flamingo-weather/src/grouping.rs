//! Group scored periods into calendar days.

use crate::types::{DayForecast, ScoredPeriod};

/// Group periods into contiguous runs sharing a calendar date.
///
/// The date is taken in each timestamp's own UTC offset. Periods are expected
/// in chronological order and are not re-sorted, so a date that reappears
/// after a different one starts a new group.
pub fn group_by_day(periods: impl IntoIterator<Item = ScoredPeriod>) -> Vec<DayForecast> {
    let mut days: Vec<DayForecast> = Vec::new();

    for period in periods {
        let date = period.period.start_time.date_naive();

        match days.last_mut() {
            Some(day) if day.date == date => day.periods.push(period),
            _ => days.push(DayForecast {
                date,
                label: date.format("%A, %B %-d").to_string(),
                periods: vec![period],
            }),
        }
    }

    days
}
