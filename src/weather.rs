//! Outbound weather lookup used to stamp new todos.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Source of the current weather condition.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn today_weather(&self) -> Result<String, AppError>;
}

/// One entry of the upstream feed, keyed by `MM-dd`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherEntry {
    pub date: String,
    pub weather: String,
}

/// HTTP client for the daily weather feed.
#[derive(Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    url: String,
}

impl WeatherClient {
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn today_weather(&self) -> Result<String, AppError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Weather feed {} answered {}", self.url, status);
            return Err(AppError::InternalServerError(format!(
                "Failed to fetch weather data. Status code: {}",
                status.as_u16()
            )));
        }

        let entries: Vec<WeatherEntry> = response.json().await?;
        weather_for_date(&entries, Local::now().date_naive())
    }
}

/// Picks the entry whose `MM-dd` key matches `date`.
pub fn weather_for_date(entries: &[WeatherEntry], date: NaiveDate) -> Result<String, AppError> {
    if entries.is_empty() {
        return Err(AppError::InternalServerError(
            "No weather data available".into(),
        ));
    }

    let key = date.format("%m-%d").to_string();
    entries
        .iter()
        .find(|entry| entry.date == key)
        .map(|entry| entry.weather.clone())
        .ok_or_else(|| AppError::InternalServerError("No weather data found for today".into()))
}
