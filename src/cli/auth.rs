//! `login` / `logout` subcommands

use std::io::{self, BufRead, Write};

use clap::Args;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use super::Context;

/// Log in with the configured admin credentials
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Admin username (prompted if omitted)
    #[arg(long, short)]
    pub username: Option<String>,

    /// Read the password from stdin instead of prompting
    #[arg(long)]
    pub password_stdin: bool,
}

impl LoginArgs {
    pub fn run(self, mut ctx: Context) -> anyhow::Result<()> {
        let username = match self.username {
            Some(name) => name,
            None => prompt_line("Username: ")?,
        };
        let password = if self.password_stdin {
            read_stdin_line()?
        } else {
            prompt_hidden("Password: ")?
        };

        ctx.session.login(username.trim(), &password)?;
        println!("Logged in as {}", username.trim());
        Ok(())
    }
}

pub fn logout(mut ctx: Context) -> anyhow::Result<()> {
    ctx.session.logout()?;
    println!("Logged out");
    Ok(())
}

fn prompt_line(prompt: &str) -> io::Result<String> {
    eprint!("{}", prompt);
    io::stderr().flush()?;
    read_stdin_line()
}

fn read_stdin_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Read a line with echo disabled (raw mode)
fn prompt_hidden(prompt: &str) -> io::Result<String> {
    eprint!("{}", prompt);
    io::stderr().flush()?;

    terminal::enable_raw_mode()?;
    let result = read_hidden();
    terminal::disable_raw_mode()?;
    eprintln!();
    result
}

fn read_hidden() -> io::Result<String> {
    let mut secret = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => return Ok(secret),
                KeyCode::Backspace => {
                    secret.pop();
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "login cancelled"));
                }
                KeyCode::Esc => {
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "login cancelled"));
                }
                KeyCode::Char(c) => secret.push(c),
                _ => {}
            }
        }
    }
}
