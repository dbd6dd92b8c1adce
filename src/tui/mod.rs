//! Interactive terminal UI
//!
//! A synchronous draw/poll loop drives the async API client through the
//! shared runtime. Network calls block only the handler that triggered
//! them; related follow-up refreshes run sequentially, one awaited before
//! the next. No call is retried, cancelled or timed out client-side.

pub mod input;
pub mod state;
mod views;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Runtime;

use crate::api::ApiClient;
use state::{handle_key, App, Effect};

/// Run the interactive UI until the user quits.
pub fn run(client: &ApiClient, rt: &Runtime) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, client, rt);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: &ApiClient,
    rt: &Runtime,
) -> Result<()> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let mut app = App::new(today);

    // Startup session probe: a failure means "not logged in", not an error.
    if rt.block_on(client.me()).is_ok() {
        app.apply_login();
        refresh_list(&mut app, client, rt);
        refresh_git_status(&mut app, client, rt);
    }

    let tick_rate = Duration::from_millis(200);
    loop {
        terminal.draw(|frame| views::draw(frame, &app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if let Some(effect) = handle_key(&mut app, key) {
                    if !run_effect(&mut app, client, rt, effect) {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Execute one effect against the API and fold the outcome back into the
/// state. Returns false when the UI should exit.
fn run_effect(app: &mut App, client: &ApiClient, rt: &Runtime, effect: Effect) -> bool {
    match effect {
        Effect::Quit => return false,

        Effect::Login { password } => match rt.block_on(client.login(&password)) {
            Ok(()) => {
                app.apply_login();
                refresh_list(app, client, rt);
                refresh_git_status(app, client, rt);
            }
            Err(err) => app.auth_error = Some(err.to_string()),
        },

        Effect::Logout => {
            if let Err(err) = rt.block_on(client.logout()) {
                tracing::warn!("logout failed: {}", err);
            }
            app.apply_logout();
        }

        Effect::RefreshList => refresh_list(app, client, rt),

        Effect::RefreshGitStatus => refresh_git_status(app, client, rt),

        Effect::Open { id } => match rt.block_on(client.get_content(&id)) {
            Ok(document) => app.open_document(&document),
            Err(err) => app.error_message = Some(err.to_string()),
        },

        Effect::Save => {
            let form = app.editor.to_form();
            let result = if form.id.is_some() {
                rt.block_on(client.update_content(&form))
            } else {
                rt.block_on(client.create_content(&form))
            };
            match result {
                Ok(document) => {
                    app.apply_saved(&document);
                    refresh_list(app, client, rt);
                    refresh_git_status(app, client, rt);
                }
                Err(err) => app.error_message = Some(err.to_string()),
            }
        }

        Effect::Delete { id } => match rt.block_on(client.delete_content(&id)) {
            Ok(()) => {
                app.apply_deleted();
                refresh_list(app, client, rt);
                refresh_git_status(app, client, rt);
            }
            Err(err) => app.error_message = Some(err.to_string()),
        },

        Effect::Publish { message } => {
            let message = if message.is_empty() {
                None
            } else {
                Some(message)
            };
            match rt.block_on(client.publish(message.as_deref())) {
                Ok(result) => {
                    app.apply_published(result);
                    refresh_git_status(app, client, rt);
                    refresh_list(app, client, rt);
                }
                Err(err) => app.error_message = Some(err.to_string()),
            }
        }
    }
    true
}

fn refresh_list(app: &mut App, client: &ApiClient, rt: &Runtime) {
    match rt.block_on(client.list_content(app.active_type, app.query.value())) {
        Ok(response) => app.apply_list(response),
        Err(err) => app.error_message = Some(err.to_string()),
    }
}

fn refresh_git_status(app: &mut App, client: &ApiClient, rt: &Runtime) {
    match rt.block_on(client.git_status()) {
        Ok(response) => app.apply_git_status(response),
        Err(err) => app.error_message = Some(err.to_string()),
    }
}
