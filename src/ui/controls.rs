use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::config::Theme;
use crate::input::Direction;

/// Rows taken by the on-screen direction pad.
pub const PAD_HEIGHT: u16 = 3;

const BUTTON_WIDTH: u16 = 5;

/// Clickable direction buttons laid out as a cross.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ControlPad {
    buttons: [(Direction, Rect); 4],
}

impl ControlPad {
    /// Lays the pad out centred in `area`; rows beyond `area` are clipped.
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let center = area.x.saturating_add(area.width / 2);
        let middle = center.saturating_sub(BUTTON_WIDTH / 2);
        let left = middle.saturating_sub(BUTTON_WIDTH + 1);
        let right = middle.saturating_add(BUTTON_WIDTH + 1);

        let row = |offset: u16| area.y.saturating_add(offset);
        let button = |x: u16, y: u16| {
            let visible = y < area.bottom() && x < area.right();
            let width = if visible {
                BUTTON_WIDTH.min(area.right() - x)
            } else {
                0
            };
            Rect::new(x, y, width, u16::from(visible))
        };

        Self {
            buttons: [
                (Direction::Up, button(middle, row(0))),
                (Direction::Left, button(left, row(1))),
                (Direction::Right, button(right, row(1))),
                (Direction::Down, button(middle, row(2))),
            ],
        }
    }

    /// Returns the direction of the button under a terminal cell.
    #[must_use]
    pub fn hit(&self, column: u16, row: u16) -> Option<Direction> {
        self.buttons
            .iter()
            .find(|(_, rect)| {
                column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
            })
            .map(|(direction, _)| *direction)
    }

    /// Screen rectangle of one button.
    #[must_use]
    pub fn button(&self, direction: Direction) -> Rect {
        self.buttons
            .iter()
            .find(|(candidate, _)| *candidate == direction)
            .map_or(Rect::default(), |(_, rect)| *rect)
    }

    pub fn render(&self, frame: &mut Frame<'_>, theme: &Theme) {
        let style = Style::new()
            .fg(theme.pad_button)
            .add_modifier(Modifier::REVERSED | Modifier::BOLD);
        let buffer = frame.buffer_mut();

        for (direction, rect) in &self.buttons {
            if rect.is_empty() {
                continue;
            }
            let label = button_label(*direction);
            buffer.set_stringn(rect.x, rect.y, label, usize::from(rect.width), style);
        }
    }
}

fn button_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "  ▲  ",
        Direction::Down => "  ▼  ",
        Direction::Left => "  ◀  ",
        Direction::Right => "  ▶  ",
    }
}
