// src/utils/console.rs

use std::io::{self, BufRead, Write};

/// Line-oriented player I/O.
///
/// The game only ever talks to the player through this trait, so rounds can be
/// driven from a script in tests.
pub trait Console {
    /// Shows `prompt` and reads one line without its trailing newline.
    /// Returns `Ok(None)` once the input is closed.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Prints one line of output.
    fn say(&mut self, line: &str) -> io::Result<()>;
}

/// `exit` and `quit` (any case) cancel whatever is being asked.
pub fn is_quit(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

/// Console bound to the process stdin/stdout.
///
/// Reads block the calling thread. The game loop runs on the `main` task of
/// `#[tokio::main]`, which owns its thread; driving it from a spawned task
/// would need `tokio::task::block_in_place` around `read_line`.
pub struct StdConsole {
    stdin: io::StdinLock<'static>,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin().lock(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.stdout, "{}", prompt)?;
        self.stdout.flush()?;

        let mut line = String::new();
        if self.stdin.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.stdout, "{}", line)
    }
}
