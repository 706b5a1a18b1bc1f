use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::FetchError;
use crate::units::Units;
use crate::weather::{Query, Snapshot};

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const USER_AGENT: &str = concat!("owx/", env!("CARGO_PKG_VERSION"));

/// Anything that can answer a current-conditions query.
pub trait WeatherSource: Send + Sync {
    fn current(&self, query: &Query, units: Units) -> Result<Snapshot, FetchError>;
}

pub mod current {
    use super::*;

    #[derive(Deserialize, Debug)]
    pub struct Current {
        #[serde(default)]
        pub name: String,

        pub weather: Vec<Condition>,

        pub main: Main,

        pub wind: Wind,

        pub sys: Sys,
    }

    #[derive(Deserialize, Debug)]
    pub struct Condition {
        pub description: String,
        pub icon: String,
    }

    #[derive(Deserialize, Debug)]
    pub struct Main {
        pub temp: f64,
        pub feels_like: f64,
        pub humidity: u8,
        pub pressure: u32,
    }

    #[derive(Deserialize, Debug)]
    pub struct Wind {
        pub speed: f64,

        #[serde(default)]
        pub deg: Option<f64>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Sys {
        pub sunrise: i64,
        pub sunset: i64,
    }

    impl Current {
        pub fn into_snapshot(self, units: Units) -> Result<Snapshot, FetchError> {
            let condition = self
                .weather
                .into_iter()
                .next()
                .ok_or_else(|| FetchError::Payload("no weather conditions".to_string()))?;

            Ok(Snapshot {
                place: self.name,
                description: condition.description,
                icon: condition.icon,
                temperature: self.main.temp,
                feels_like: self.main.feels_like,
                humidity: self.main.humidity,
                pressure: self.main.pressure,
                wind_speed: self.wind.speed,
                wind_deg: self.wind.deg,
                sunrise: self.sys.sunrise,
                sunset: self.sys.sunset,
                units,
            })
        }
    }
}

/// Blocking client for the current-conditions endpoint.
#[derive(Clone, Debug)]
pub struct OpenWeatherMap {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OpenWeatherMap {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

impl WeatherSource for OpenWeatherMap {
    fn current(&self, query: &Query, units: Units) -> Result<Snapshot, FetchError> {
        let mut params = query.params();
        params.push(("appid", self.api_key.clone()));
        params.push(("units", units.as_query().to_string()));

        let response = self.client.get(&self.endpoint).query(&params).send()?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "current conditions request rejected");
            return Err(FetchError::Status(status));
        }

        let body = response.text()?;
        let current: current::Current = serde_json::from_str(&body)?;
        current.into_snapshot(units)
    }
}
