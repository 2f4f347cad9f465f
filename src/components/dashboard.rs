use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, ReadingsView, ReadingsViewProps, grid_columns};
use crate::action::Action;
use crate::state::AppState;

/// Props for Dashboard - read-only view of state
pub struct DashboardProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Top-level component: readings plus the key hint bar
pub struct Dashboard {
    /// Grid columns at the last render; scroll actions carry the row count
    columns: usize,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self { columns: 1 }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn grid_rows(&self, state: &AppState) -> usize {
        let len = state.readings.locations().map_or(0, <[_]>::len);
        len.div_ceil(self.columns.max(1))
    }
}

impl Component<Action> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let loaded = props.state.readings.is_loaded();
        let rows = self.grid_rows(props.state);
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::ReadingsFetch),
                KeyCode::Char('j') | KeyCode::Down if loaded => {
                    Some(Action::UiScrollDown { rows })
                }
                KeyCode::Char('k') | KeyCode::Up if loaded => Some(Action::UiScrollUp { rows }),
                KeyCode::Char('g') | KeyCode::Home if loaded => Some(Action::UiScrollTop),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DashboardProps<'_>) {
        // The card grid spans the full width
        self.columns = grid_columns(area.width);

        let chunks = Layout::vertical([
            Constraint::Min(1),    // Readings
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let mut view = ReadingsView;
        view.render(frame, chunks[0], ReadingsViewProps { state: props.state });

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("r", "reload"),
                    StatusBarHint::new("j/k", "scroll"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
