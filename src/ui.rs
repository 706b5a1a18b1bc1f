use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, Selection};
use crate::units::{clock, direction::degree_to_compass};
use crate::weather::{Snapshot, CITIES};

const MISSING: &str = "--";

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Yellow),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded)
}

fn display_cities(selection: &Selection) -> List<'static> {
    let items: Vec<ListItem> = CITIES.iter().map(|city| ListItem::new(*city)).collect();
    let block = if selection.coordinates.is_some() {
        panel("City (location set)")
    } else {
        panel("City")
    };
    List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ")
}

fn display_controls(selection: &Selection) -> Paragraph<'static> {
    let key = |k: &str| Span::styled(format!(" [{k}] "), Style::default().fg(Color::Blue));

    let mut lines = vec![
        Line::from(vec![key("l"), Span::raw("Use Current Location")]),
        Line::from(vec![
            key("u"),
            Span::raw(format!("Switch to {}", selection.units.other_scale_name())),
        ]),
        Line::from(vec![key("↑/↓"), Span::raw("Change city")]),
        Line::from(vec![key("q"), Span::raw("Quit")]),
    ];
    if let Some(coords) = selection.coordinates {
        lines.push(Line::from(vec![
            Span::raw(" Location "),
            Span::styled(
                format!("{:.4}, {:.4}", coords.lat, coords.lon),
                Style::default().fg(Color::Green),
            ),
        ]));
    }
    Paragraph::new(lines).block(panel("Controls"))
}

fn display_headline(snapshot: &Snapshot) -> Paragraph<'_> {
    let unit = snapshot.units.temperature_symbol();
    let mut lines = vec![];
    if !snapshot.place.is_empty() {
        lines.push(Line::from(Span::styled(
            snapshot.place.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(Span::styled(
        snapshot.description.to_uppercase(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!(
            "{}{unit} (Feels Like: {}{unit})",
            snapshot.rounded_temperature(),
            snapshot.rounded_feels_like()
        ),
        Style::default().fg(Color::Green),
    )));
    lines.push(Line::from(vec![
        Span::raw(format!("Icon {}  ", snapshot.icon)),
        Span::styled(snapshot.icon_url(), Style::default().fg(Color::DarkGray)),
    ]));
    Paragraph::new(lines).alignment(Alignment::Center)
}

fn display_details(snapshot: &Snapshot) -> Table<'static> {
    let row = |label: &str, value: String| {
        Row::new(vec![
            Cell::from(format!(" {label}")),
            Cell::from(value).style(Style::default().fg(Color::Green)),
        ])
    };

    let rows = vec![
        row("Humidity:", format!("{}%", snapshot.humidity)),
        row("Pressure:", format!("{} hPa", snapshot.pressure)),
        row(
            "Wind Speed:",
            format!("{} {}", snapshot.wind_speed, snapshot.units.speed_symbol()),
        ),
        row(
            "Wind Direction:",
            match snapshot.wind_deg {
                Some(deg) => format!("{deg:.0}° ({})", degree_to_compass(deg)),
                None => MISSING.to_string(),
            },
        ),
        row("Sunrise:", clock::format_epoch(snapshot.sunrise, &Local)),
        row("Sunset:", clock::format_epoch(snapshot.sunset, &Local)),
    ];

    Table::new(rows, [Constraint::Length(17), Constraint::Min(10)])
}

fn draw_conditions(f: &mut Frame, app: &App, area: Rect) {
    let block = panel("Current Conditions");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let request = &app.request;
    if request.loading {
        f.render_widget(
            Paragraph::new("Loading...").alignment(Alignment::Center),
            inner,
        );
    } else if let Some(ref message) = request.error {
        f.render_widget(
            Paragraph::new(format!("Error: {message}"))
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center),
            inner,
        );
    } else if let Some(ref snapshot) = request.result {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(inner);
        f.render_widget(display_headline(snapshot), chunks[0]);
        f.render_widget(display_details(snapshot), chunks[1]);
    } else {
        f.render_widget(
            Paragraph::new("Select a city to see the weather").alignment(Alignment::Center),
            inner,
        );
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let vert_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(f.area());

    let title = Paragraph::new(Span::styled(
        "Weather App",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .border_type(BorderType::Rounded),
    );
    f.render_widget(title, vert_layout[0]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(vert_layout[1]);

    let lchunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(7)])
        .split(chunks[0]);

    let mut city_state = ListState::default().with_selected(Some(app.selection.city));
    f.render_stateful_widget(display_cities(&app.selection), lchunks[0], &mut city_state);
    f.render_widget(display_controls(&app.selection), lchunks[1]);

    draw_conditions(f, app, chunks[1]);
}
