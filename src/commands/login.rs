//! Log in and persist the session token

use std::io::{self, Write};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::api::ApiClient;

/// Prompt for the admin password and exchange it for a bearer token.
pub async fn run(client: &ApiClient) -> Result<()> {
    let password = read_password("Password: ")?;
    if password.is_empty() {
        anyhow::bail!("no password entered");
    }
    client.login(&password).await?;
    println!("Logged in.");
    Ok(())
}

/// Read a line from the terminal without echoing it.
fn read_password(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    terminal::enable_raw_mode()?;
    let result = read_password_input();
    terminal::disable_raw_mode()?;
    println!();
    result
}

fn read_password_input() -> Result<String> {
    let mut password = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => break,
                KeyCode::Backspace => {
                    password.pop();
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    anyhow::bail!("interrupted");
                }
                KeyCode::Char(c) => password.push(c),
                _ => {}
            }
        }
    }
    Ok(password)
}
