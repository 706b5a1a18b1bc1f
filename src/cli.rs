use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

use crate::geo::DEFAULT_GEO_ENDPOINT;
use crate::owm::DEFAULT_ENDPOINT;
use crate::units::Units;

const ABOUT: &str = "OpenWeatherMap current conditions TUI";

const LONG_ABOUT: &str = "
TUI for viewing current weather conditions sourced from OpenWeatherMap.

Pick a city from the list or press `l` to look up the weather at your current location. Press `u`
to switch between metric and imperial units. Every change fetches fresh conditions.

An OpenWeatherMap API key is required; pass it with --api-key or OPENWEATHER_API_KEY.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(long, default_value = "Karachi", help = "City selected at startup")]
    pub city: String,

    #[arg(long, value_enum, default_value_t = Units::Metric, help = "Unit system at startup")]
    pub units: Units,

    #[arg(
        long,
        env = "OPENWEATHER_API_KEY",
        default_value = "",
        hide_env_values = true,
        help = "OpenWeatherMap API key"
    )]
    pub api_key: String,

    #[arg(long, env = "OWX_ENDPOINT", default_value = DEFAULT_ENDPOINT, help = "Current conditions endpoint")]
    pub endpoint: String,

    #[arg(long, env = "OWX_GEO_ENDPOINT", default_value = DEFAULT_GEO_ENDPOINT, help = "IP geolocation endpoint")]
    pub geo_endpoint: String,

    #[arg(long, default_value_t = 10, help = "HTTP timeout in seconds")]
    pub timeout: u64,

    #[arg(long, env = "OWX_LOG_FILE", help = "Write logs to this file")]
    pub log_file: Option<PathBuf>,
}
