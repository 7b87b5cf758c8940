use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::session::{Phase, Session};

/// Draws the score line: score and high score, plus a phase hint.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, session: &Session, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(score_line(session, theme)).alignment(Alignment::Center),
        area,
    );
}

/// Draws the message slot; an empty slot leaves the row blank.
pub fn render_message(frame: &mut Frame<'_>, area: Rect, message: Option<&str>, theme: &Theme) {
    let Some(message) = message else {
        return;
    };

    frame.render_widget(
        Paragraph::new(Line::from(message))
            .alignment(Alignment::Center)
            .style(
                Style::new()
                    .fg(theme.message)
                    .add_modifier(Modifier::BOLD),
            ),
        area,
    );
}

fn score_line<'a>(session: &Session, theme: &Theme) -> Line<'a> {
    let value = Style::new()
        .fg(theme.hud_score)
        .add_modifier(Modifier::BOLD);
    let label = Style::new().fg(theme.hud_muted);

    let mut spans = vec![
        Span::styled("Score: ", label),
        Span::styled(session.score().to_string(), value),
        Span::styled("   High Score: ", label),
        Span::styled(session.high_score().to_string(), value),
    ];

    if session.phase() == Phase::Paused {
        spans.push(Span::styled("   [paused]", label));
    }

    Line::from(spans)
}
