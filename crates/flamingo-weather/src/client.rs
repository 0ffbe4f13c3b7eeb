//! National Weather Service forecast client.
//!
//! A forecast takes two requests: the `points` lookup for a coordinate, which
//! names the forecast document URL, and the forecast document itself. The
//! pair is retried as a unit.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::retry::{with_retry, RetryConfig};
use crate::types::{Coordinates, ForecastPeriod, WeatherError};

pub const NWS_API_BASE: &str = "https://api.weather.gov";
pub const GEO_JSON: &str = "application/geo+json";
pub const DEFAULT_MAX_PERIODS: usize = 14;
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    forecast: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

/// Client tuning. Defaults target the public API.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub retry: RetryConfig,
    pub request_timeout: Duration,
    /// Periods kept from the forecast (two per day)
    pub max_periods: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: NWS_API_BASE.to_string(),
            retry: RetryConfig::default(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            max_periods: DEFAULT_MAX_PERIODS,
        }
    }
}

/// User-Agent the weather service asks callers to send
pub fn user_agent(contact_email: &str) -> String {
    format!("(sunbathing-checker, {})", contact_email)
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
    retry: RetryConfig,
    max_periods: usize,
}

impl ForecastClient {
    pub fn new(contact_email: &str) -> Result<Self, WeatherError> {
        Self::with_settings(contact_email, FetchSettings::default())
    }

    pub fn with_settings(contact_email: &str, settings: FetchSettings) -> Result<Self, WeatherError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));

        let client = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(user_agent(contact_email))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            retry: settings.retry,
            max_periods: settings.max_periods,
        })
    }

    /// Fetch forecast periods for a coordinate, earliest first.
    ///
    /// Fails with [`WeatherError::FetchExhausted`] once every attempt has
    /// failed.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_periods(&self, coords: Coordinates) -> Result<Vec<ForecastPeriod>, WeatherError> {
        let periods = with_retry(&self.retry, |attempt| async move {
            tracing::debug!("Forecast attempt {} for {}", attempt, coords);
            self.fetch_once(coords).await
        })
        .await
        .map_err(|e| WeatherError::FetchExhausted {
            attempts: e.attempts,
            message: e.last_error.to_string(),
        })?;

        tracing::info!("Fetched {} forecast periods for {}", periods.len(), coords);
        Ok(periods)
    }

    async fn fetch_once(&self, coords: Coordinates) -> Result<Vec<ForecastPeriod>, WeatherError> {
        let points_url = format!("{}/points/{}", self.base_url, coords);
        let points: PointsResponse = self.get_json(&points_url).await?;

        let forecast_url = Url::parse(&points.properties.forecast).map_err(|e| {
            WeatherError::UpstreamParse(format!(
                "invalid forecast URL '{}': {}",
                points.properties.forecast, e
            ))
        })?;

        let forecast: ForecastResponse = self.get_json(forecast_url.as_str()).await?;

        let mut periods = forecast.properties.periods;
        periods.truncate(self.max_periods);
        Ok(periods)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, WeatherError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        serde_json::from_slice(&body)
            .map_err(|e| WeatherError::UpstreamParse(format!("{}: {}", url, e)))
    }
}
