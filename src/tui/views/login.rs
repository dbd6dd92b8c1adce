//! Login view

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::state::App;

use super::centered_rect;

pub(super) fn draw(frame: &mut Frame, app: &App) {
    let area = centered_rect(48, 9, frame.area());
    frame.render_widget(Clear, area);

    let masked = "*".repeat(app.password.value().chars().count());
    let mut lines = vec![
        Line::from("Login required to manage posts and notes."),
        Line::default(),
        Line::from(vec![
            Span::styled("Password: ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(masked),
        ]),
        Line::default(),
    ];
    if let Some(error) = &app.auth_error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter to log in, Esc to quit",
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Quill CMS")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ),
        area,
    );

    let cursor_x = area.x + 1 + "Password: ".len() as u16 + app.password.cursor() as u16;
    frame.set_cursor_position((cursor_x, area.y + 3));
}
