use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use owx::app::{run_app, App};
use owx::cli::Args;
use owx::config::Config;
use owx::effect::Dispatcher;
use owx::geo::IpGeolocator;
use owx::logging;
use owx::owm::OpenWeatherMap;

fn main() -> anyhow::Result<()> {
    let config = Config::try_from(Args::parse())?;
    logging::init(config.log_file.as_deref()).context("setting up logging")?;

    let weather = OpenWeatherMap::new(&config.endpoint, &config.api_key, config.timeout)
        .context("building weather client")?;
    let locator =
        IpGeolocator::new(&config.geo_endpoint, config.timeout).context("building geolocator")?;
    let (dispatcher, actions) = Dispatcher::new(Arc::new(weather), Arc::new(locator));
    let app = App::from_config(&config);

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let res = run_app(&mut terminal, app, dispatcher, actions);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref err) = res {
        tracing::error!(error = %err, "exited with error");
    }

    res
}
