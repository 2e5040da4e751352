use time::Date;
use tracing::warn;
use url::Url;

use crate::{dates, error::SecretaryError, remote::RemoteApi};

use super::types::DaySummary;

pub const MISSING_API_KEY: &str = "Missing OpenWeatherMap API key";

#[derive(Clone)]
pub struct WeatherClient {
    api: RemoteApi,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(base: Url, api_key: Option<String>) -> Result<Self, SecretaryError> {
        Ok(Self {
            api: RemoteApi::new(base)?,
            api_key,
        })
    }

    pub async fn day_summary(&self, lat: f64, lon: f64, date: Date) -> Result<DaySummary, SecretaryError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SecretaryError::Config(MISSING_API_KEY.to_string()))?;
        let (lat, lon, date) = (lat.to_string(), lon.to_string(), dates::format_date(date));
        self.api
            .get_json_with_query(
                "onecall/day_summary",
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("date", date.as_str()),
                    ("appid", api_key),
                    ("units", "imperial"),
                ],
            )
            .await
    }
}

// Readings keep one decimal place minimum: 72 renders as "72.0".
fn reading(v: f64) -> String {
    format!("{v:?}")
}

pub fn render_weather(summary: &DaySummary) -> String {
    format!(
        "Min Temperature: {} F\nMax Temperature: {} F\nAfternoon Humidity: {}%\nAfternoon Cloud Cover: {}%",
        reading(summary.temperature.min),
        reading(summary.temperature.max),
        reading(summary.humidity.afternoon),
        reading(summary.cloud_cover.afternoon),
    )
}

pub async fn weather_text(client: &WeatherClient, lat: f64, lon: f64, today: Date) -> String {
    if client.api_key.is_none() {
        return MISSING_API_KEY.to_string();
    }
    match client.day_summary(lat, lon, today).await {
        Ok(summary) => render_weather(&summary),
        Err(e) => {
            warn!(lat, lon, "weather fetch failed: {e}");
            format!("Error fetching weather: {e}")
        }
    }
}
