//! Terminal client for OpenWeatherMap current conditions.

pub mod app;
pub mod cli;
pub mod config;
pub mod effect;
pub mod error;
pub mod geo;
pub mod logging;
pub mod owm;
pub mod ui;
pub mod units;
pub mod weather;
