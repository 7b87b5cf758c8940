use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, CELL_WIDTH, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD,
    GLYPH_SNAKE_TAIL, GridSize, Theme,
};
use crate::game::GameState;
use crate::session::{Phase, Session};
use crate::snake::Position;
use crate::ui::controls::{ControlPad, PAD_HEIGHT};
use crate::ui::hud::{render_hud, render_message};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Per-frame rendering choices made by the host.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub theme: &'a Theme,
    /// Draw the on-screen direction pad below the message slot.
    pub show_pad: bool,
}

/// Where each part of the screen went on the last frame.
///
/// The host keeps this around to hit-test pointer presses against the pad.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ScreenLayout {
    pub board: Rect,
    pub hud: Rect,
    pub message: Rect,
    pub pad: Option<ControlPad>,
}

impl ScreenLayout {
    #[must_use]
    pub fn compute(area: Rect, bounds: GridSize, show_pad: bool) -> Self {
        let pad_height = if show_pad { PAD_HEIGHT } else { 0 };
        let [board_area, hud, message, pad_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(pad_height),
        ])
        .areas(area);

        Self {
            board: centered_board(board_area, bounds),
            hud,
            message,
            pad: show_pad.then(|| ControlPad::new(pad_area)),
        }
    }
}

/// Renders the full frame from the session and returns the layout used.
pub fn render(
    frame: &mut Frame<'_>,
    session: &Session,
    options: RenderOptions<'_>,
) -> ScreenLayout {
    let theme = options.theme;
    let layout = ScreenLayout::compute(frame.area(), session.bounds(), options.show_pad);

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(layout.board);
    frame.render_widget(block, layout.board);

    if let Some(game) = session.game() {
        render_food(frame, inner, game, theme);
        render_snake(frame, inner, game, theme);
    }

    render_hud(frame, layout.hud, session, theme);
    render_message(frame, layout.message, session.message(), theme);
    if let Some(pad) = &layout.pad {
        pad.render(frame, theme);
    }

    match session.phase() {
        Phase::Idle => render_start_menu(frame, layout.board, session.high_score(), theme),
        Phase::Paused => render_pause_menu(frame, layout.board),
        Phase::GameOver => {
            if let Some(summary) = session.last_result() {
                render_game_over_menu(frame, layout.board, summary, session.high_score_at_start());
            }
        }
        Phase::Running => {}
    }

    layout
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, game: &GameState, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, game.bounds(), game.food) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new().fg(theme.food).add_modifier(Modifier::BOLD),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, game: &GameState, theme: &Theme) {
    let last = game.snake.len().saturating_sub(1);

    let buffer = frame.buffer_mut();
    for (index, segment) in game.snake.segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, game.bounds(), *segment) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            )
        } else if index == last {
            (GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body))
        };

        buffer.set_string(x, y, glyph, style);
    }
}

/// Outer board size including the border.
fn board_extent(bounds: GridSize) -> (u16, u16) {
    let side = bounds.side();
    (side.saturating_mul(CELL_WIDTH).saturating_add(2), side.saturating_add(2))
}

fn centered_board(area: Rect, bounds: GridSize) -> Rect {
    let (width, height) = board_extent(bounds);
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
