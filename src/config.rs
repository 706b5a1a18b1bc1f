use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Args;
use crate::error::ConfigError;
use crate::units::Units;
use crate::weather::{city_index, CITIES};

/// Validated runtime configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub city: usize,
    pub units: Units,
    pub api_key: String,
    pub endpoint: String,
    pub geo_endpoint: String,
    pub timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let city = city_index(&args.city)
            .ok_or_else(|| ConfigError::UnknownCity(args.city.clone(), CITIES.join(", ")))?;
        if args.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self {
            city,
            units: args.units,
            api_key: args.api_key,
            endpoint: args.endpoint,
            geo_endpoint: args.geo_endpoint,
            timeout: Duration::from_secs(args.timeout),
            log_file: args.log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> Result<Config, ConfigError> {
        Config::try_from(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_city_is_resolved_case_insensitively() {
        let config = parse(&["owx", "--city", "beijing"]).unwrap();
        assert_eq!(CITIES[config.city], "Beijing");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_unknown_city_is_rejected() {
        let err = parse(&["owx", "--city", "Gotham"]).unwrap_err();
        assert!(err.to_string().starts_with("unknown city 'Gotham'"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(matches!(
            parse(&["owx", "--timeout", "0"]),
            Err(ConfigError::ZeroTimeout)
        ));
    }
}
