//! Forecast fetching and sunbathing scoring for Flamingo Forecast
//!
//! Fetches multi-period forecasts from the National Weather Service API,
//! rates each period for sunbathing and picks display icons.

pub mod client;
pub mod evaluation;
pub mod grouping;
pub mod icons;
pub mod locations;
pub mod rating;
pub mod retry;
pub mod types;

pub use client::{FetchSettings, ForecastClient};
pub use evaluation::{
    day_flamingo_rating, day_flamingos, evaluate_day, is_sunbathing_day, SunbathingCriteria,
    DEFAULT_ALLOWED_CONDITIONS,
};
pub use grouping::group_by_day;
pub use icons::{weather_icon, wind_icon, wind_speed_mph};
pub use locations::{find_city, City, CITIES};
pub use rating::{flamingo_rating, rate, RatingBand};
pub use retry::{with_retry, with_retry_sleeping, Exhausted, RetryConfig};
pub use types::*;
