//! Whole-day sunbathing notes built from the day and night periods.

use serde::{Deserialize, Serialize};

use crate::icons::wind_speed_mph;
use crate::types::{DayForecast, ForecastPeriod};

/// Sky conditions a sunbathing day may have, matched case-insensitively as
/// substrings of the daytime short forecast.
pub const DEFAULT_ALLOWED_CONDITIONS: [&str; 6] = [
    "Sunny",
    "Mostly Sunny",
    "Partly Sunny",
    "Partly Cloudy",
    "Clear",
    "Scattered Rain",
];

/// Thresholds a day is judged against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunbathingCriteria {
    /// Minimum daytime temperature in °F
    pub min_day_temp: i32,
    /// Minimum night-time temperature in °F
    pub min_night_temp: i32,
    /// Maximum daytime wind in mph
    pub max_wind_mph: u32,
    /// Accepted daytime skies; empty means the defaults
    pub allowed_conditions: Vec<String>,
}

impl Default for SunbathingCriteria {
    fn default() -> Self {
        Self {
            min_day_temp: 75,
            min_night_temp: 65,
            max_wind_mph: 15,
            allowed_conditions: DEFAULT_ALLOWED_CONDITIONS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl SunbathingCriteria {
    fn sky_allowed(&self, short_forecast: &str) -> bool {
        let sky = short_forecast.to_lowercase();
        let allows = |cond: &str| {
            let cond = cond.to_lowercase();
            if cond == "scattered rain" {
                // Any scattered rain or showers counts, whatever the exact phrasing
                sky.contains("scattered") && (sky.contains("rain") || sky.contains("shower"))
            } else {
                sky.contains(&cond)
            }
        };

        if self.allowed_conditions.is_empty() {
            DEFAULT_ALLOWED_CONDITIONS.into_iter().any(|c| allows(c))
        } else {
            self.allowed_conditions.iter().any(|c| allows(c.as_str()))
        }
    }
}

fn last_period(day: &DayForecast, daytime: bool) -> Option<&ForecastPeriod> {
    day.periods
        .iter()
        .rev()
        .map(|p| &p.period)
        .find(|p| p.is_daytime == daytime)
}

fn period_qualifies(period: &ForecastPeriod, criteria: &SunbathingCriteria) -> bool {
    let temp_ok = period.temperature >= criteria.min_day_temp;
    let wind_ok = wind_speed_mph(&period.wind_speed).is_some_and(|mph| mph <= criteria.max_wind_mph);
    temp_ok && wind_ok && criteria.sky_allowed(&period.short_forecast)
}

/// Whether the day's daytime period meets the temperature, wind and sky
/// thresholds. Night temperature does not gate the verdict.
pub fn is_sunbathing_day(day: &DayForecast, criteria: &SunbathingCriteria) -> bool {
    match last_period(day, true) {
        Some(period) => period_qualifies(period, criteria),
        None => {
            tracing::debug!("No daytime period for {}", day.label);
            false
        }
    }
}

/// Whole-day flamingo score from 0 to 5 in half steps.
///
/// Zero unless the day has both halves and passes [`is_sunbathing_day`]; a
/// qualifying day scores at least 1.
pub fn day_flamingo_rating(day: &DayForecast, criteria: &SunbathingCriteria) -> f32 {
    let (Some(daytime), Some(night)) = (last_period(day, true), last_period(day, false)) else {
        return 0.0;
    };
    if !period_qualifies(daytime, criteria) {
        return 0.0;
    }

    let mut score = 0.0;

    if daytime.temperature >= criteria.min_day_temp + 15 {
        score += 2.0;
    } else if daytime.temperature >= criteria.min_day_temp + 7 {
        score += 1.0;
    }

    if night.temperature >= criteria.min_night_temp + 5 {
        score += 0.5;
    }

    // period_qualifies guarantees a parsed wind speed
    if wind_speed_mph(&daytime.wind_speed)
        .is_some_and(|mph| mph <= criteria.max_wind_mph.saturating_sub(7))
    {
        score += 1.0;
    }

    score += sky_bonus(&daytime.short_forecast);

    let score = (score * 2.0_f32).round_ties_even() / 2.0;
    score.max(1.0)
}

/// Flamingos shown in a day header: the day score rounded half up
pub fn day_flamingos(day: &DayForecast, criteria: &SunbathingCriteria) -> u8 {
    // Score is within 0..=5
    day_flamingo_rating(day, criteria).round() as u8
}

fn sky_bonus(short_forecast: &str) -> f32 {
    let sky = short_forecast.to_lowercase();
    let wet = ["scattered", "rain", "shower"].iter().any(|w| sky.contains(w));

    // Most specific phrase first so "Partly Sunny" is not scored as full sun
    if !wet && sky.contains("partly sunny") {
        0.5
    } else if !wet && sky.contains("mostly sunny") {
        1.0
    } else if !wet && sky.contains("sunny") {
        1.5
    } else if sky.contains("clear") {
        0.5
    } else if sky.contains("scattered") && (sky.contains("rain") || sky.contains("shower")) {
        0.25
    } else {
        0.0
    }
}

pub const INCOMPLETE_DAY: &str = "⚠️ Incomplete day/night data";

/// Describe a day for sunbathing.
///
/// Needs both a daytime and a night-time period; otherwise a single
/// [`INCOMPLETE_DAY`] note is returned.
pub fn evaluate_day(day: &DayForecast, criteria: &SunbathingCriteria) -> Vec<&'static str> {
    let daytime = day.periods.iter().rev().find(|p| p.period.is_daytime);
    let night = day.periods.iter().rev().find(|p| !p.period.is_daytime);

    let (Some(daytime), Some(night)) = (daytime, night) else {
        return vec![INCOMPLETE_DAY];
    };

    vec![
        day_temperature_note(&daytime.period, criteria),
        night_temperature_note(&night.period, criteria),
        wind_note(&daytime.period, criteria),
        sky_note(&daytime.period),
    ]
}

fn day_temperature_note(period: &ForecastPeriod, criteria: &SunbathingCriteria) -> &'static str {
    let t = period.temperature;
    if t >= criteria.min_day_temp + 15 {
        "🌡️ Perfect daytime temperature!"
    } else if t >= criteria.min_day_temp + 7 {
        "🌡️ Very comfortable daytime temperature"
    } else if t >= criteria.min_day_temp {
        "🌡️ Daytime temperature meets minimum requirements"
    } else {
        "❄️ Too cold during the day for sunbathing"
    }
}

fn night_temperature_note(period: &ForecastPeriod, criteria: &SunbathingCriteria) -> &'static str {
    let t = period.temperature;
    if t >= criteria.min_night_temp + 5 {
        "🌙 Perfect night temperature!"
    } else if t >= criteria.min_night_temp {
        "🌙 Comfortable night temperature"
    } else {
        "🌙 Too cold at night"
    }
}

fn wind_note(period: &ForecastPeriod, criteria: &SunbathingCriteria) -> &'static str {
    // Upper end of "N to M mph", the same figure the wind icon uses
    match wind_speed_mph(&period.wind_speed) {
        Some(mph) if mph <= criteria.max_wind_mph.saturating_sub(7) => "🍃 Perfect light breeze",
        Some(mph) if mph <= criteria.max_wind_mph => "💨 Acceptable wind conditions",
        Some(_) => "🌪️ Too windy for comfort",
        None => "🌬️ Wind forecast unavailable",
    }
}

fn sky_note(period: &ForecastPeriod) -> &'static str {
    let sky = period.short_forecast.to_lowercase();
    // Order matters: "partly" and "mostly" must be tested before plain "sunny"
    if sky.contains("partly sunny") || sky.contains("partly cloudy") {
        "⛅ Moderate sun exposure"
    } else if sky.contains("mostly sunny") && !sky.contains("scattered") {
        "🌤️ Very good sun exposure"
    } else if sky.contains("sunny") && !sky.contains("scattered") {
        "☀️ Perfect sunny conditions!"
    } else if sky.contains("clear") {
        "🌅 Clear skies"
    } else if sky.contains("scattered") {
        "🌦️ Scattered rain conditions"
    } else {
        "☁️ Not ideal sun conditions"
    }
}
