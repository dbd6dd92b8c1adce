//! Editor view: form fields, markdown body and live preview

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::content::preview::{preview_lines, render_preview, PreviewLine};
use crate::tui::state::{App, EditorField};

use super::field_line;

pub(super) fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let columns =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);
    draw_form(frame, app, columns[0]);
    draw_preview(frame, app, columns[1]);
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let editor = &app.editor;
    let title = if editor.id.is_some() {
        "Edit content"
    } else {
        "New content"
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1), // type
        Constraint::Length(1), // title
        Constraint::Length(1), // date
        Constraint::Length(1), // categories
        Constraint::Length(1), // link
        Constraint::Length(1), // comment
        Constraint::Length(1), // draft
        Constraint::Length(1), // body label
        Constraint::Min(0),    // body
    ])
    .split(inner);

    let focused = |field: EditorField| editor.field == field;

    frame.render_widget(
        Paragraph::new(field_line(
            "Type",
            editor.kind.as_str(),
            focused(EditorField::Kind),
        )),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(field_line(
            "Title",
            editor.title.value(),
            focused(EditorField::Title),
        )),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(field_line(
            "Date",
            editor.date.value(),
            focused(EditorField::Date),
        )),
        rows[2],
    );
    frame.render_widget(
        Paragraph::new(field_line(
            "Categories",
            editor.categories.value(),
            focused(EditorField::Categories),
        )),
        rows[3],
    );
    frame.render_widget(
        Paragraph::new(field_line(
            "Link",
            editor.link.value(),
            focused(EditorField::Link),
        )),
        rows[4],
    );
    frame.render_widget(
        Paragraph::new(field_line(
            "Comment",
            editor.comment.value(),
            focused(EditorField::Comment),
        )),
        rows[5],
    );
    let draft_value = if editor.draft { "[x] draft" } else { "[ ] published" };
    frame.render_widget(
        Paragraph::new(field_line(
            "Draft",
            draft_value,
            focused(EditorField::Draft),
        )),
        rows[6],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Markdown body",
            Style::default().add_modifier(Modifier::DIM),
        ))),
        rows[7],
    );

    draw_body(frame, app, rows[8]);

    // The value column starts after the 12-char label of `field_line`.
    let cursor = match editor.field {
        EditorField::Title => Some((rows[1], editor.title.cursor())),
        EditorField::Date => Some((rows[2], editor.date.cursor())),
        EditorField::Categories => Some((rows[3], editor.categories.cursor())),
        EditorField::Link => Some((rows[4], editor.link.cursor())),
        EditorField::Comment => Some((rows[5], editor.comment.cursor())),
        _ => None,
    };
    if let Some((row, col)) = cursor {
        frame.set_cursor_position((row.x + 12 + col as u16, row.y));
    }
}

fn draw_body(frame: &mut Frame, app: &App, area: Rect) {
    let editor = &app.editor;
    let (cursor_row, cursor_col) = editor.body.cursor();

    // Keep the cursor line visible.
    let height = area.height.max(1) as usize;
    let offset = cursor_row.saturating_sub(height.saturating_sub(1));

    let lines: Vec<Line> = editor
        .body
        .lines()
        .iter()
        .map(|line| Line::raw(line.clone()))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).scroll((offset as u16, 0)),
        area,
    );

    if editor.field == EditorField::Body {
        let y = area.y + (cursor_row - offset) as u16;
        frame.set_cursor_position((area.x + cursor_col as u16, y));
    }
}

fn draw_preview(frame: &mut Frame, app: &App, area: Rect) {
    // Parse then sanitize, recomputed from scratch every frame.
    let html = render_preview(&app.editor.body.text());
    let lines: Vec<Line> = preview_lines(&html).iter().map(display_line).collect();

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Preview")),
        area,
    );
}

fn display_line(line: &PreviewLine) -> Line<'static> {
    match line {
        PreviewLine::Heading(level, text) => Line::from(Span::styled(
            format!("{} {}", "#".repeat(*level as usize), text),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        PreviewLine::Bullet(text) => Line::from(vec![
            Span::styled("  • ".to_string(), Style::default().fg(Color::Cyan)),
            Span::raw(text.clone()),
        ]),
        PreviewLine::Quote(text) => Line::from(Span::styled(
            format!("│ {}", text),
            Style::default().fg(Color::DarkGray),
        )),
        PreviewLine::Code(text) => Line::from(Span::styled(
            format!("  {}", text),
            Style::default().fg(Color::Yellow),
        )),
        PreviewLine::Text(text) => Line::raw(text.clone()),
        PreviewLine::Rule => Line::from(Span::styled(
            "─".repeat(24),
            Style::default().fg(Color::DarkGray),
        )),
        PreviewLine::Blank => Line::default(),
    }
}
