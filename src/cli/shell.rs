//! The interactive shell loop, plus a script mode that reads commands
//! from stdin for automation.

use std::io::{self, BufRead};

use rustyline::{error::ReadlineError, history::DefaultHistory, Editor};
use shell_words::split;

use crate::cli::commands::{LoopControl, ShellContext};
use crate::cli::output;
use crate::core::errors::CliError;

const SCRIPT_MODE_VAR: &str = "ROOM_LEDGER_CLI_SCRIPT";
const PROMPT: &str = "rooms> ";

pub fn run_cli() -> Result<(), CliError> {
    let mut context = ShellContext::new()?;

    if std::env::var_os(SCRIPT_MODE_VAR).is_some() {
        run_script(&mut context)
    } else {
        run_interactive(&mut context)
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor: Editor<(), DefaultHistory> =
        Editor::new().map_err(|err| CliError::Command(err.to_string()))?;

    output::info("room ledger shell, `help` lists commands");
    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if handle_line(context, trimmed) == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("exiting shell");
                break;
            }
            Err(err) => return Err(CliError::Command(err.to_string())),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if handle_line(context, &line) == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Tokenizes and dispatches one line. Command failures are rendered and
/// swallowed so the loop keeps running; only I/O failures bubble up.
fn handle_line(context: &mut ShellContext, line: &str) -> LoopControl {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("could not parse input: {err}"));
            return LoopControl::Continue;
        }
    };
    let Some((command, rest)) = tokens.split_first() else {
        return LoopControl::Continue;
    };
    let command = command.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    match context.dispatch(&command, &args) {
        Ok(control) => control,
        Err(err) => {
            output::error(err);
            LoopControl::Continue
        }
    }
}
