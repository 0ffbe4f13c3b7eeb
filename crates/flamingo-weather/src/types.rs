use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::icons::{weather_icon, wind_icon};
use crate::rating::rate;

/// One forecast period as returned by the weather service.
///
/// Only the fields used for scoring and display are kept; everything else in
/// the upstream document is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub name: String,
    pub start_time: DateTime<FixedOffset>,
    #[serde(default = "default_is_daytime")]
    pub is_daytime: bool,
    pub temperature: i32,
    pub temperature_unit: String,
    pub wind_speed: String,
    #[serde(default)]
    pub wind_direction: String,
    pub short_forecast: String,
    #[serde(default)]
    pub detailed_forecast: String,
}

fn default_is_daytime() -> bool {
    true
}

/// A forecast period annotated with its flamingo rating and icons
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPeriod {
    #[serde(flatten)]
    pub period: ForecastPeriod,
    pub flamingo_rating: u8,
    pub icon: &'static str,
    pub wind_icon: &'static str,
}

impl From<ForecastPeriod> for ScoredPeriod {
    fn from(period: ForecastPeriod) -> Self {
        let flamingo_rating = rate(&period);
        let icon = weather_icon(&period.short_forecast);
        let wind_icon = wind_icon(&period.wind_speed);
        Self {
            period,
            flamingo_rating,
            icon,
            wind_icon,
        }
    }
}

/// Periods sharing a calendar date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    /// Display label, e.g. "Monday, January 15"
    pub label: String,
    pub periods: Vec<ScoredPeriod>,
}

/// Validated geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, WeatherError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(WeatherError::InvalidCoordinates(format!(
                "latitude {} is outside -90..90",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates(format!(
                "longitude {} is outside -180..180",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Weather service returned {status} for {url}")]
    UpstreamStatus { status: u16, url: String },
    #[error("Unexpected response from weather service: {0}")]
    UpstreamParse(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to fetch forecast after {attempts} attempts: {message}")]
    FetchExhausted { attempts: u32, message: String },
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl WeatherError {
    /// Short message suitable for showing to an end user
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UpstreamStatus { status, .. } if *status >= 500 => {
                "The weather service is having trouble. Please try again later."
            }
            Self::UpstreamStatus { .. } => "The weather service rejected the request.",
            Self::UpstreamParse(_) => "Received an unexpected forecast. Please try again.",
            Self::Network(_) => "Unable to reach the weather service.",
            Self::FetchExhausted { .. } => "The forecast is unavailable right now. Please try again later.",
            Self::InvalidCoordinates(_) => "Those coordinates are not valid.",
            Self::Client(_) => "The forecast client could not be created.",
        }
    }
}
