//! Dashboard view: content listing, search and type toggle

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::api::types::ContentType;
use crate::tui::state::{App, DashboardFocus};

pub(super) fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(area);
    let controls = Layout::horizontal([Constraint::Length(22), Constraint::Min(0)]).split(chunks[0]);

    draw_type_toggle(frame, app, controls[0]);
    draw_search(frame, app, controls[1]);
    draw_list(frame, app, chunks[1]);
}

fn draw_type_toggle(frame: &mut Frame, app: &App, area: Rect) {
    let choice = |label: &str, active: bool| {
        if active {
            Span::styled(label.to_string(), Style::default().fg(Color::Black).bg(Color::Cyan))
        } else {
            Span::styled(label.to_string(), Style::default().fg(Color::DarkGray))
        }
    };
    let line = Line::from(vec![
        choice(" Notes ", app.active_type == ContentType::Note),
        Span::raw(" "),
        choice(" Posts ", app.active_type == ContentType::Post),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Type")),
        area,
    );
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.dashboard_focus == DashboardFocus::Search;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(app.query.value().to_string()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Search by title"),
        ),
        area,
    );
    if focused {
        frame.set_cursor_position((area.x + 1 + app.query.cursor() as u16, area.y + 1));
    }
}

fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = if app.items.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No content found.",
            Style::default().add_modifier(Modifier::DIM),
        )))]
    } else {
        app.items
            .iter()
            .map(|item| {
                let draft = item.draft.unwrap_or(false);
                let marker = if draft { "draft" } else { "published" };
                let marker_style = if draft {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::Green)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(item.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(
                        format!("{}.md", item.slug),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw("  "),
                    Span::raw(item.date.clone().unwrap_or_else(|| "no-date".to_string())),
                    Span::raw("  "),
                    Span::styled(marker.to_string(), marker_style),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{}s ({})", app.active_type, app.items.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.items.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
