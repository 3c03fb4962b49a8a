//! Line-oriented console abstraction for interactive prompts.
//!
//! The pipeline never touches stdin/stdout directly; it talks to a
//! [`Console`] behind a [`PromptLock`], so concurrent workers cannot
//! interleave their prompts and tests can script the answers.

use std::io;

/// A blocking call-and-response console.
pub trait Console: Send {
    /// Print one line of output.
    fn show(&mut self, line: &str);

    /// Print `prompt` and read one line of input. `Ok(None)` means end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Called once the prompt lock is held, before the first line of a
    /// prompt block. Consoles sharing a terminal with other output hold that
    /// output back until [`Console::end_prompt`].
    fn begin_prompt(&mut self) {}

    /// Called after the last line of a prompt block, before the lock is
    /// released.
    fn end_prompt(&mut self) {}
}

/// Global prompt lock: one worker talks to the user at a time.
pub type PromptLock = tokio::sync::Mutex<Box<dyn Console>>;

pub fn prompt_lock(console: impl Console + 'static) -> PromptLock {
    tokio::sync::Mutex::new(Box::new(console))
}
