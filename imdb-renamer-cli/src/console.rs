//! Stdin/stdout implementation of the prompt console.

use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use imdb_renamer_lib::Console;

use crate::logging::{hold_log_output, release_log_output};

/// Reads answers from stdin. Only one worker talks to it at a time; the
/// orchestrator's prompt lock guarantees that. Log output from other workers
/// is held for the duration of each prompt block.
pub(crate) struct TerminalConsole;

impl Console for TerminalConsole {
    fn begin_prompt(&mut self) {
        hold_log_output();
    }

    fn end_prompt(&mut self) {
        release_log_output();
    }

    fn show(&mut self, line: &str) {
        if line.starts_with("Folder: ") {
            println!("{}", line.if_supports_color(Stdout, |t| t.bold()));
        } else {
            println!("{line}");
        }
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        // Reading stdin blocks; keep it off the async worker threads.
        tokio::task::block_in_place(|| {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", prompt.if_supports_color(Stdout, |t| t.cyan()))?;
            stdout.flush()?;

            let mut line = String::new();
            let read = io::stdin().lock().read_line(&mut line)?;
            if read == 0 {
                return Ok(None);
            }
            Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
        })
    }
}
