use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};

use crate::config::Config;
use crate::effect::{Dispatcher, Effect, FetchRequest};
use crate::error::FetchError;
use crate::ui;
use crate::units::Units;
use crate::weather::{Coordinates, Query, Snapshot, CITIES, DEFAULT_CITY};

const POLL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum Action {
    Start,
    PrevCity,
    NextCity,
    SelectCity(usize),
    ToggleUnits,
    RequestLocation,
    LocationFound(Coordinates),
    FetchSettled {
        seq: u64,
        outcome: Result<Snapshot, FetchError>,
    },
    Quit,
}

/// What the user picked. Coordinates, once set, decide the query target.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub city: usize,
    pub units: Units,
    pub coordinates: Option<Coordinates>,
}

impl Selection {
    pub fn city_name(&self) -> &'static str {
        CITIES[self.city]
    }

    pub fn query(&self) -> Query {
        match self.coordinates {
            Some(coords) => Query::Position(coords),
            None => Query::Place(self.city_name().to_string()),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY,
            units: Units::Metric,
            coordinates: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestState {
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<Snapshot>,
}

#[derive(Debug, Default)]
pub struct App {
    pub selection: Selection,
    pub request: RequestState,
    pub should_quit: bool,
    latest_seq: u64,
}

impl App {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            ..Default::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Selection {
            city: config.city,
            units: config.units,
            coordinates: None,
        })
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Applies `action` and returns the effect it calls for, if any.
    pub fn update(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Start => Some(self.fetch()),
            Action::PrevCity => self.select_city(self.selection.city.saturating_sub(1)),
            Action::NextCity => self.select_city((self.selection.city + 1).min(CITIES.len() - 1)),
            Action::SelectCity(idx) => self.select_city(idx),
            Action::ToggleUnits => {
                self.selection.units = self.selection.units.toggle();
                tracing::debug!(units = self.selection.units.as_query(), "units toggled");
                Some(self.fetch())
            }
            Action::RequestLocation => Some(Effect::Locate),
            Action::LocationFound(coords) => {
                self.selection.coordinates = Some(coords);
                Some(self.fetch())
            }
            Action::FetchSettled { seq, outcome } => {
                self.settle(seq, outcome);
                None
            }
            Action::Quit => {
                self.should_quit = true;
                None
            }
        }
    }

    fn select_city(&mut self, idx: usize) -> Option<Effect> {
        if idx >= CITIES.len() || idx == self.selection.city {
            return None;
        }
        self.selection.city = idx;
        if self.selection.coordinates.is_some() {
            tracing::debug!(city = CITIES[idx], "city changed while location override is active");
        }
        Some(self.fetch())
    }

    fn fetch(&mut self) -> Effect {
        self.latest_seq += 1;
        self.request.loading = true;
        self.request.error = None;
        Effect::Fetch(FetchRequest {
            seq: self.latest_seq,
            query: self.selection.query(),
            units: self.selection.units,
        })
    }

    fn settle(&mut self, seq: u64, outcome: Result<Snapshot, FetchError>) {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "applying out-of-order response");
        }
        self.request = match outcome {
            Ok(snapshot) => RequestState {
                loading: false,
                error: None,
                result: Some(snapshot),
            },
            Err(e) => RequestState {
                loading: false,
                error: Some(e.to_string()),
                result: None,
            },
        };
    }
}

pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::PrevCity),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::NextCity),
        KeyCode::Char('u') => Some(Action::ToggleUnits),
        KeyCode::Char('l') => Some(Action::RequestLocation),
        _ => None,
    }
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    dispatcher: Dispatcher,
    actions: Receiver<Action>,
) -> anyhow::Result<()> {
    if let Some(effect) = app.update(Action::Start) {
        dispatcher.run(effect);
    }

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(POLL)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = action_for(key) {
                    if let Some(effect) = app.update(action) {
                        dispatcher.run(effect);
                    }
                }
            }
        }

        while let Ok(action) = actions.try_recv() {
            if let Some(effect) = app.update(action) {
                dispatcher.run(effect);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(units: Units) -> Snapshot {
        Snapshot {
            place: "Karachi".into(),
            description: "clear sky".into(),
            icon: "01d".into(),
            temperature: 30.6,
            feels_like: 33.2,
            humidity: 60,
            pressure: 1009,
            wind_speed: 4.1,
            wind_deg: Some(200.0),
            sunrise: 1_700_000_000,
            sunset: 1_700_040_000,
            units,
        }
    }

    fn fetch_of(effect: Option<Effect>) -> FetchRequest {
        match effect {
            Some(Effect::Fetch(request)) => request,
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_start_fetches_default_city_in_metric() {
        let mut app = App::default();
        let request = fetch_of(app.update(Action::Start));

        assert_eq!(request.query, Query::Place("Karachi".into()));
        assert_eq!(request.units, Units::Metric);
        assert!(app.request.loading);
    }

    #[test]
    fn test_every_city_change_issues_one_fetch() {
        let mut app = App::default();
        app.update(Action::Start);

        for (idx, city) in CITIES.iter().enumerate().skip(1) {
            let request = fetch_of(app.update(Action::SelectCity(idx)));
            assert_eq!(request.query, Query::Place(city.to_string()));
            assert_eq!(request.seq, app.latest_seq());
        }
        assert_eq!(app.latest_seq(), CITIES.len() as u64);
    }

    #[test]
    fn test_reselecting_same_city_is_not_a_change() {
        let mut app = App::default();
        assert!(app.update(Action::SelectCity(DEFAULT_CITY)).is_none());
        assert!(app.update(Action::PrevCity).is_none());
        assert!(app.update(Action::SelectCity(CITIES.len())).is_none());
    }

    #[test]
    fn test_next_city_stops_at_end() {
        let mut app = App::new(Selection {
            city: CITIES.len() - 1,
            ..Default::default()
        });
        assert!(app.update(Action::NextCity).is_none());
        let request = fetch_of(app.update(Action::PrevCity));
        assert_eq!(request.query, Query::Place("Amsterdam".into()));
    }

    #[test]
    fn test_toggle_units_refetches() {
        let mut app = App::default();
        app.update(Action::Start);

        let request = fetch_of(app.update(Action::ToggleUnits));
        assert_eq!(request.units, Units::Imperial);
        let request = fetch_of(app.update(Action::ToggleUnits));
        assert_eq!(request.units, Units::Metric);
    }

    #[test]
    fn test_success_sets_result_and_clears_loading() {
        let mut app = App::default();
        let seq = fetch_of(app.update(Action::Start)).seq;

        app.update(Action::FetchSettled {
            seq,
            outcome: Ok(snapshot(Units::Metric)),
        });

        assert!(!app.request.loading);
        assert!(app.request.error.is_none());
        assert_eq!(app.request.result, Some(snapshot(Units::Metric)));
    }

    #[test]
    fn test_failure_discards_previous_result() {
        let mut app = App::default();
        let seq = fetch_of(app.update(Action::Start)).seq;
        app.update(Action::FetchSettled {
            seq,
            outcome: Ok(snapshot(Units::Metric)),
        });

        let seq = fetch_of(app.update(Action::NextCity)).seq;
        app.update(Action::FetchSettled {
            seq,
            outcome: Err(FetchError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)),
        });

        assert!(!app.request.loading);
        assert_eq!(app.request.error.as_deref(), Some("Network response was not ok"));
        assert!(app.request.result.is_none());
    }

    #[test]
    fn test_location_takes_priority_and_persists() {
        let mut app = App::default();
        app.update(Action::Start);
        assert_eq!(app.update(Action::RequestLocation), Some(Effect::Locate));

        let coords = Coordinates { lat: 33.7, lon: 73.1 };
        let request = fetch_of(app.update(Action::LocationFound(coords)));
        assert_eq!(request.query, Query::Position(coords));

        // a city change still fetches, but by coordinates
        let request = fetch_of(app.update(Action::NextCity));
        assert_eq!(app.selection.city_name(), "Lahore");
        assert_eq!(request.query, Query::Position(coords));
    }

    #[test]
    fn test_stale_response_is_applied() {
        let mut app = App::default();
        let first = fetch_of(app.update(Action::Start)).seq;
        let second = fetch_of(app.update(Action::ToggleUnits)).seq;

        app.update(Action::FetchSettled {
            seq: second,
            outcome: Ok(snapshot(Units::Imperial)),
        });
        app.update(Action::FetchSettled {
            seq: first,
            outcome: Ok(snapshot(Units::Metric)),
        });

        assert_eq!(app.request.result.as_ref().map(|s| s.units), Some(Units::Metric));
        assert_eq!(app.latest_seq(), second);
    }

    #[test]
    fn test_key_bindings() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert!(matches!(action_for(press(KeyCode::Char('q'))), Some(Action::Quit)));
        assert!(matches!(action_for(press(KeyCode::Down)), Some(Action::NextCity)));
        assert!(matches!(action_for(press(KeyCode::Char('k'))), Some(Action::PrevCity)));
        assert!(matches!(action_for(press(KeyCode::Char('u'))), Some(Action::ToggleUnits)));
        assert!(matches!(
            action_for(press(KeyCode::Char('l'))),
            Some(Action::RequestLocation)
        ));
        assert!(matches!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        ));
        assert!(action_for(press(KeyCode::Char('x'))).is_none());
    }
}
