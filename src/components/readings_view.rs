use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{CardGrid, CardGridProps, Component};
use crate::action::Action;
use crate::state::{AppState, Location, Readings};

pub const LOADING_MESSAGE: &str = "Loading air quality data...";
pub const EMPTY_MESSAGE: &str = "No air quality data found for the specified area. \
                                 Try adjusting the bounding box or filters.";

/// Renders whichever branch of the readings lifecycle is current
pub struct ReadingsView;

pub struct ReadingsViewProps<'a> {
    pub state: &'a AppState,
}

impl Component<Action> for ReadingsView {
    type Props<'a> = ReadingsViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        match &state.readings {
            Readings::Loading => {
                let line = Line::from(vec![
                    Span::raw(LOADING_MESSAGE),
                    Span::styled(
                        format!(" {}", state.spinner()),
                        Style::default().fg(Color::Cyan),
                    ),
                ]);
                render_centered(frame, area, line);
            }
            Readings::Failed(message) => {
                let line = Line::styled(
                    format!("Error: {message}"),
                    Style::default().fg(Color::Red),
                );
                render_centered(frame, area, line);
            }
            Readings::Loaded(locations) => render_loaded(frame, area, state, locations),
        }
    }
}

fn render_centered(frame: &mut Frame, area: Rect, line: Line<'_>) {
    let [row] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(Paragraph::new(line.centered()), row);
}

fn render_loaded(frame: &mut Frame, area: Rect, state: &AppState, locations: &[Location]) {
    let [title, subtitle, _, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(
            Line::styled(
                format!("{} Air Quality Dashboard", state.region.name),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .centered(),
        ),
        title,
    );
    frame.render_widget(
        Paragraph::new(
            Line::styled(
                format!(
                    "Real-time air quality for the {} area, powered by OpenAQ.",
                    state.region.name
                ),
                Style::default().fg(Color::Gray),
            )
            .centered(),
        ),
        subtitle,
    );

    if locations.is_empty() {
        let [row] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(body);
        frame.render_widget(
            Paragraph::new(Line::styled(EMPTY_MESSAGE, Style::default().fg(Color::DarkGray)))
                .centered()
                .wrap(Wrap { trim: true }),
            row,
        );
    } else {
        let mut grid = CardGrid;
        grid.render(
            frame,
            body,
            CardGridProps {
                locations,
                scroll: state.scroll,
            },
        );
    }

    frame.render_widget(
        Paragraph::new(
            Line::styled(
                format!(
                    "{} locations \u{b7} Data provided by OpenAQ (openaq.org)",
                    locations.len()
                ),
                Style::default().fg(Color::DarkGray),
            )
            .centered(),
        ),
        footer,
    );
}
