//! Device location lookup.
//!
//! A terminal has no platform position API to ask, so the default locator
//! resolves the machine's public IP address to coordinates.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::GeoError;
use crate::owm::USER_AGENT;
use crate::weather::Coordinates;

pub const DEFAULT_GEO_ENDPOINT: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

pub trait Geolocator: Send + Sync {
    fn locate(&self) -> Result<Coordinates, GeoError>;
}

#[derive(Deserialize, Debug)]
struct IpApiResponse {
    status: String,

    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    lat: Option<f64>,

    #[serde(default)]
    lon: Option<f64>,
}

impl IpApiResponse {
    fn into_coordinates(self) -> Result<Coordinates, GeoError> {
        if self.status != "success" {
            let reason = self.message.unwrap_or(self.status);
            return Err(GeoError::Unavailable(reason));
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
            _ => Err(GeoError::Unavailable("response without coordinates".to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct IpGeolocator {
    client: Client,
    endpoint: String,
}

impl IpGeolocator {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, GeoError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl Geolocator for IpGeolocator {
    fn locate(&self) -> Result<Coordinates, GeoError> {
        let response = self.client.get(&self.endpoint).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::Status(status));
        }
        let body = response.text()?;
        serde_json::from_str::<IpApiResponse>(&body)
            .map_err(|e| GeoError::Unavailable(format!("malformed response: {e}")))?
            .into_coordinates()
    }
}
