//! Interactive collection of usernames and passwords.
//!
//! Passwords are read with echo disabled through `rpassword`. The
//! [`Prompter`] trait lets tests script the answers.

use crate::Result;
use crate::config::{RunCredentials, UpdateMode};
use crate::error::TabRotateError;
use crate::security::Credentials;
use std::io::{self, BufRead, Write};
use zeroize::Zeroizing;

/// Source of operator answers.
pub trait Prompter {
    /// Reads one visible line, without the trailing newline.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Reads one line with echo disabled.
    fn read_secret(&mut self, prompt: &str) -> Result<Zeroizing<String>>;
}

/// Prompter backed by the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")
            .and_then(|()| stdout.flush())
            .map_err(|e| TabRotateError::io("Failed to write prompt", e))?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| TabRotateError::io("Failed to read from stdin", e))?;

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_secret(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        rpassword::prompt_password(prompt)
            .map(Zeroizing::new)
            .map_err(|e| TabRotateError::io("Failed to read password", e))
    }
}

/// Asks for every secret the run needs, in the order the operator expects:
/// server account, new owner (mode `both` only), then the database account
/// written into the connections.
pub fn collect_credentials<P: Prompter + ?Sized>(
    prompter: &mut P,
    mode: UpdateMode,
) -> Result<RunCredentials> {
    let server_user = prompter.read_line(">>>> Tableau Server username: ")?;
    let server_password = prompter.read_secret(">>>> Tableau Server Password: ")?;

    let new_owner = match mode {
        UpdateMode::Both => Some(prompter.read_line(">>>> Username of new data source owner: ")?),
        UpdateMode::Conn => None,
    };

    let connection_user = prompter.read_line("\n>>>> Data source connection username: ")?;
    let connection_password = prompter.read_secret(">>>> Data source connection password: ")?;

    Ok(RunCredentials {
        server: Credentials::from_secret(server_user, server_password),
        new_owner,
        connection: Credentials::from_secret(connection_user, connection_password),
    })
}
