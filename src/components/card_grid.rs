use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use super::{Component, LocationCard, LocationCardProps};
use crate::action::Action;
use crate::state::Location;

/// Responsive grid of location cards, scrolled by whole rows
pub struct CardGrid;

pub struct CardGridProps<'a> {
    pub locations: &'a [Location],
    /// First row to show; clamped to the last row
    pub scroll: usize,
}

/// 1, 2 or 3 columns depending on available width
pub fn grid_columns(width: u16) -> usize {
    match width {
        w if w >= 120 => 3,
        w if w >= 80 => 2,
        _ => 1,
    }
}

impl Component<Action> for CardGrid {
    type Props<'a> = CardGridProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let columns = grid_columns(area.width);
        let rows: Vec<&[Location]> = props.locations.chunks(columns).collect();
        if rows.is_empty() {
            return;
        }
        let first = props.scroll.min(rows.len() - 1);

        let mut y = area.y;
        let bottom = area.bottom();
        for row in &rows[first..] {
            if y >= bottom {
                break;
            }
            let row_height = row.iter().map(LocationCard::height).max().unwrap_or(3);
            let height = row_height.min(bottom - y);
            let row_area = Rect::new(area.x, y, area.width, height);

            let cells = Layout::horizontal(
                (0..columns).map(|_| Constraint::Ratio(1, columns as u32)),
            )
            .spacing(1)
            .split(row_area);

            for (location, cell) in row.iter().zip(cells.iter()) {
                let mut card = LocationCard;
                card.render(frame, *cell, LocationCardProps { location });
            }

            y = y.saturating_add(row_height).saturating_add(1);
        }
    }
}
