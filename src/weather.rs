use crate::units::{temperature::round_half_up, Units};

pub const CITIES: [&str; 13] = [
    "Karachi",
    "Lahore",
    "Abbottabad",
    "Islamabad",
    "Bahawalpur",
    "Multan",
    "Gwadar",
    "Hyderabad",
    "Rawalpindi",
    "Sukkur",
    "Beijing",
    "Amsterdam",
    "São Paulo",
];

pub const DEFAULT_CITY: usize = 0;

/// Index of `name` in [`CITIES`], ignoring case.
pub fn city_index(name: &str) -> Option<usize> {
    CITIES
        .iter()
        .position(|city| city.to_lowercase() == name.trim().to_lowercase())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Target of a current-conditions request.
#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    Place(String),
    Position(Coordinates),
}

impl Query {
    /// Query parameters identifying the location.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Query::Place(name) => vec![("q", name.clone())],
            Query::Position(c) => vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())],
        }
    }
}

/// Current conditions as returned by the provider, in `units`.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub place: String,
    pub description: String,
    pub icon: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: f64,
    pub wind_deg: Option<f64>,
    pub sunrise: i64,
    pub sunset: i64,
    pub units: Units,
}

impl Snapshot {
    pub fn rounded_temperature(&self) -> i64 {
        round_half_up(self.temperature)
    }

    pub fn rounded_feels_like(&self) -> i64 {
        round_half_up(self.feels_like)
    }

    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_index() {
        assert_eq!(city_index("Karachi"), Some(0));
        assert_eq!(city_index("  amsterdam "), Some(11));
        assert_eq!(city_index("são paulo"), Some(12));
        assert_eq!(city_index("Atlantis"), None);
        assert_eq!(CITIES[DEFAULT_CITY], "Karachi");
    }

    #[test]
    fn test_query_params() {
        let place = Query::Place("Lahore".into());
        assert_eq!(place.params(), vec![("q", "Lahore".to_string())]);

        let pos = Query::Position(Coordinates { lat: 24.86, lon: 67.01 });
        assert_eq!(
            pos.params(),
            vec![("lat", "24.86".to_string()), ("lon", "67.01".to_string())]
        );
    }
}
