//! Console input for configuration and confirmation prompts.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::console::Term;
use dialoguer::{Input, Password};

/// Source of interactive answers.
///
/// The terminal implementation is used by the binary; tests substitute a
/// scripted one.
pub trait Console {
    /// Show `prompt` and read one line of input (may be empty).
    fn read_line(&self, prompt: &str) -> io::Result<String>;

    /// Show `prompt` and read one line without echoing it when possible.
    fn read_secret(&self, prompt: &str) -> io::Result<String>;
}

/// Console backed by the process's stdin/stdout.
///
/// Uses dialoguer when stdin is a terminal and falls back to plain line
/// reads when input is piped.
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn read_line(&self, prompt: &str) -> io::Result<String> {
        if io::stdin().is_terminal() {
            return Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text_on(&Term::stdout())
                .map_err(io::Error::other);
        }
        read_piped_line(prompt)
    }

    fn read_secret(&self, prompt: &str) -> io::Result<String> {
        if io::stdin().is_terminal() {
            return Password::new()
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact_on(&Term::stdout())
                .map_err(io::Error::other);
        }
        read_piped_line(prompt)
    }
}

fn read_piped_line(prompt: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}: ", prompt)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

