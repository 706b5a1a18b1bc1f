use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::app::Action;
use crate::geo::Geolocator;
use crate::owm::WeatherSource;
use crate::units::Units;
use crate::weather::Query;

#[derive(Clone, Debug, PartialEq)]
pub struct FetchRequest {
    pub seq: u64,
    pub query: Query,
    pub units: Units,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Fetch(FetchRequest),
    Locate,
}

pub struct Dispatcher {
    weather: Arc<dyn WeatherSource>,
    locator: Arc<dyn Geolocator>,
    tx: Sender<Action>,
}

impl Dispatcher {
    pub fn new(
        weather: Arc<dyn WeatherSource>,
        locator: Arc<dyn Geolocator>,
    ) -> (Self, Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        let dispatcher = Self {
            weather,
            locator,
            tx,
        };
        (dispatcher, rx)
    }

    /// Runs `effect` on a worker thread. Nothing is cancelled; an overtaken
    /// request still reports back.
    pub fn run(&self, effect: Effect) {
        match effect {
            Effect::Fetch(request) => {
                let source = Arc::clone(&self.weather);
                let tx = self.tx.clone();
                thread::spawn(move || {
                    tracing::info!(
                        seq = request.seq,
                        query = ?request.query,
                        units = request.units.as_query(),
                        "requesting current conditions"
                    );
                    let outcome = source.current(&request.query, request.units);
                    match &outcome {
                        Ok(_) => tracing::info!(seq = request.seq, "current conditions received"),
                        Err(e) => tracing::warn!(seq = request.seq, error = ?e, "current conditions failed"),
                    }
                    // the receiver is gone once the loop has exited
                    let _ = tx.send(Action::FetchSettled {
                        seq: request.seq,
                        outcome,
                    });
                });
            }
            Effect::Locate => {
                let locator = Arc::clone(&self.locator);
                let tx = self.tx.clone();
                thread::spawn(move || match locator.locate() {
                    Ok(coords) => {
                        tracing::info!(lat = coords.lat, lon = coords.lon, "location found");
                        let _ = tx.send(Action::LocationFound(coords));
                    }
                    Err(e) => tracing::debug!(error = %e, "location lookup failed"),
                });
            }
        }
    }
}
