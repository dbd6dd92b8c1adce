//! Publish view: pending changes, commit message and last result

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::state::App;

pub(super) fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let result_height = if app.publish_result.is_some() { 8 } else { 0 };
    let chunks = Layout::vertical([
        Constraint::Min(4),
        Constraint::Length(3),
        Constraint::Length(result_height),
    ])
    .split(area);

    draw_files(frame, app, chunks[0]);
    draw_message(frame, app, chunks[1]);
    if app.publish_result.is_some() {
        draw_result(frame, app, chunks[2]);
    }
}

fn draw_files(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.git_files.is_empty() {
        "No pending changes in content/".to_string()
    } else {
        format!("Pending changes ({})", app.git_files.len())
    };

    let items: Vec<ListItem> = if app.git_files.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "Working tree clean for content/.",
            Style::default().add_modifier(Modifier::DIM),
        )))]
    } else {
        app.git_files
            .iter()
            .map(|file| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<3}", file.status),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(file.path.clone()),
                ]))
            })
            .collect()
    };

    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

fn draw_message(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.message_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(app.publish_message.value().to_string()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Commit message (optional)"),
        ),
        area,
    );
    if app.message_focused {
        frame.set_cursor_position((area.x + 1 + app.publish_message.cursor() as u16, area.y + 1));
    }
}

fn draw_result(frame: &mut Frame, app: &App, area: Rect) {
    let Some(result) = &app.publish_result else {
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Commit:  ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(result.commit_hash.clone()),
        ]),
        Line::from(vec![
            Span::styled("Message: ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(result.message.clone()),
        ]),
    ];
    if result.output.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            "No git output.",
            Style::default().add_modifier(Modifier::DIM),
        )));
    } else {
        for line in result.output.lines().take(4) {
            lines.push(Line::raw(line.to_string()));
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Last publish")),
        area,
    );
}
