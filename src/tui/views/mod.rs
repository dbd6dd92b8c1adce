//! View rendering for the interactive UI
//!
//! Each view is a pure function from `&App` to widgets; nothing here
//! mutates state beyond the transient list selection.

mod dashboard;
mod editor;
mod login;
mod publish;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::state::{App, Confirm, DashboardFocus, Screen};

/// Render the whole frame from the current state.
pub fn draw(frame: &mut Frame, app: &App) {
    if !app.logged_in {
        login::draw(frame, app);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(frame.area());

    draw_tabs(frame, app, chunks[0]);
    draw_messages(frame, app, chunks[1]);
    match app.screen {
        Screen::Dashboard => dashboard::draw(frame, app, chunks[2]),
        Screen::Editor => editor::draw(frame, app, chunks[2]),
        Screen::Publish => publish::draw(frame, app, chunks[2]),
    }
    draw_hints(frame, app, chunks[3]);

    match app.confirm {
        Confirm::DeleteFile => draw_confirm(frame, "Delete this file? (y/n)"),
        Confirm::DeleteForever => draw_confirm(frame, "Confirm permanent deletion? (y/n)"),
        Confirm::None => {}
    }
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tab = |label: &str, active: bool| {
        if active {
            Span::styled(
                format!(" {} ", label),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            )
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(Color::DarkGray))
        }
    };

    let line = Line::from(vec![
        Span::styled(
            " Quill CMS ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        tab("1 Dashboard", app.screen == Screen::Dashboard),
        tab("2 Editor", app.screen == Screen::Editor),
        tab("3 Publish", app.screen == Screen::Publish),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_messages(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = &app.error_message {
        Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(status) = &app.status_message {
        Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.screen {
        Screen::Dashboard => {
            if app.dashboard_focus == DashboardFocus::Search {
                "Enter search  Esc cancel"
            } else {
                "j/k move  Enter open  n new  t notes/posts  / search  2/3 views  L logout  q quit"
            }
        }
        Screen::Editor => {
            "Tab next field  Ctrl-S save  Ctrl-D delete  Esc back"
        }
        Screen::Publish => {
            if app.message_focused {
                "Enter done  Esc cancel"
            } else {
                "p publish  r refresh  m message  1/2 views  L logout  q quit"
            }
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {}", hints),
            Style::default().add_modifier(Modifier::DIM),
        ))),
        area,
    );
}

fn draw_confirm(frame: &mut Frame, message: &str) {
    let width = (message.len() as u16 + 6).min(frame.area().width);
    let area = centered_rect(width, 3, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Line::from(message.to_string()))
            .centered()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            ),
        area,
    );
}

/// A fixed-size rectangle centered inside `area`.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// A labelled single-line value, highlighted while focused.
pub(crate) fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let value_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(
            format!("{:<11} ", label),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::styled(value.to_string(), value_style),
    ])
}
