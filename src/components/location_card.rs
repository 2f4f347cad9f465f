use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem},
};

use super::Component;
use crate::action::Action;
use crate::state::Location;

pub const BULLET: &str = "\u{2022} ";

/// One monitoring location: name as heading, measurements as a bullet list
pub struct LocationCard;

pub struct LocationCardProps<'a> {
    pub location: &'a Location,
}

impl LocationCard {
    /// Rows needed to show every measurement inside the border
    pub fn height(location: &Location) -> u16 {
        let items = u16::try_from(location.measurements.len()).unwrap_or(u16::MAX);
        items.max(1).saturating_add(2)
    }
}

impl Component<Action> for LocationCard {
    type Props<'a> = LocationCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Line::styled(
                format!(" {} ", props.location.name),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));

        let items: Vec<ListItem> = props
            .location
            .measurements
            .iter()
            .map(|m| {
                ListItem::new(Line::from(vec![
                    Span::styled(BULLET, Style::default().fg(Color::Cyan)),
                    Span::raw(m.label()),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Measurement;
    use tui_dispatch::testing::*;

    fn location(n: usize) -> Location {
        Location {
            name: "Jersey City".into(),
            measurements: (0..n)
                .map(|i| Measurement {
                    parameter: format!("p{i}"),
                    value: i as f64,
                    unit: "ppm".into(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_height() {
        assert_eq!(LocationCard::height(&location(0)), 3);
        assert_eq!(LocationCard::height(&location(1)), 3);
        assert_eq!(LocationCard::height(&location(4)), 6);
    }

    #[test]
    fn test_render_lists_every_measurement() {
        let mut render = RenderHarness::new(40, 8);
        let mut card = LocationCard;
        let loc = location(3);

        let output = render.render_to_string_plain(|frame| {
            card.render(frame, frame.area(), LocationCardProps { location: &loc });
        });

        assert!(output.contains("Jersey City"));
        assert_eq!(output.matches(BULLET.trim_end()).count(), 3);
        assert!(output.contains("p0: 0 ppm"));
        assert!(output.contains("p2: 2 ppm"));
    }
}
