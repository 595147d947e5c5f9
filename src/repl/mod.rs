//! REPL Module
//!
//! Line-oriented shell: reads a line, splits it into words, dispatches the
//! first word as a command and prints the result.

mod commands;
mod session;

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

pub use commands::{catch_threshold, Command, Flow};
pub use session::{Pokedex, Session};

/// Prompt printed before each line of input
pub const PROMPT: &str = "Pokedex > ";

/// Lowercases `text` and splits it on whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Runs the shell until `exit` or end of input.
///
/// Command failures are printed and the loop carries on; only I/O errors on
/// `input` or `out` end it early.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input");
            break;
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        let Some(command) = Command::parse(name) else {
            writeln!(out, "Unknown command")?;
            continue;
        };

        match command.execute(session, args, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(err) => {
                debug!("Command {} failed: {:?}", command.name(), err);
                writeln!(out, "{}", err)?;
            }
        }
    }

    Ok(())
}
