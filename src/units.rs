use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Unit system the provider reports values in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn toggle(self) -> Self {
        match self {
            Units::Metric => Units::Imperial,
            Units::Imperial => Units::Metric,
        }
    }

    /// Value of the `units` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_symbol(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_symbol(self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }

    /// Name of the scale a toggle would switch to.
    pub fn other_scale_name(self) -> &'static str {
        match self {
            Units::Metric => "Fahrenheit",
            Units::Imperial => "Celsius",
        }
    }
}

pub mod temperature {
    /// Nearest integer, halves toward positive infinity.
    pub fn round_half_up(value: f64) -> i64 {
        (value + 0.5).floor() as i64
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(21.4), 21);
        assert_eq!(round_half_up(21.5), 22);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.0), 0);
    }
}

pub mod direction {
    const COMPASS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    pub fn degree_to_compass(deg: f64) -> &'static str {
        let deg = (deg % 360.0) + 360.0;
        let val = (deg / 22.5 + 0.5) as usize;
        let idx = val % 16;
        COMPASS[idx]
    }

    #[test]
    fn test_degree_to_compass() {
        assert_eq!(degree_to_compass(0.0), "N");
        assert_eq!(degree_to_compass(90.0), "E");
        assert_eq!(degree_to_compass(180.0), "S");
        assert_eq!(degree_to_compass(270.0), "W");
        assert_eq!(degree_to_compass(360.0), "N");
        assert_eq!(degree_to_compass(-90.0), "W");
    }
}

pub mod clock {
    use chrono::{DateTime, TimeZone};

    const MISSING: &str = "--";

    /// Formats epoch seconds as a wall-clock time in `tz`.
    pub fn format_epoch<Tz: TimeZone>(secs: i64, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        match DateTime::from_timestamp(secs, 0) {
            Some(utc) => utc.with_timezone(tz).format("%H:%M:%S").to_string(),
            None => MISSING.to_string(),
        }
    }

    #[test]
    fn test_format_epoch_utc() {
        use chrono::Utc;
        // 2024-01-01T01:30:15Z
        assert_eq!(format_epoch(1_704_072_615, &Utc), "01:30:15");
        assert_eq!(format_epoch(i64::MAX, &Utc), MISSING);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Units::Metric.toggle(), Units::Imperial);
        assert_eq!(Units::Metric.toggle().toggle(), Units::Metric);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Units::Metric.as_query(), "metric");
        assert_eq!(Units::Imperial.as_query(), "imperial");
        assert_eq!(Units::Metric.temperature_symbol(), "°C");
        assert_eq!(Units::Imperial.temperature_symbol(), "°F");
        assert_eq!(Units::Imperial.speed_symbol(), "mph");
        assert_eq!(Units::Metric.other_scale_name(), "Fahrenheit");
    }
}
