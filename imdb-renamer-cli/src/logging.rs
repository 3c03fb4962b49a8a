//! Logger setup and the stderr gate that keeps log lines out of prompts.
//!
//! While a worker is prompting, records logged by other workers are held in
//! a buffer and written once the prompt block ends.

use std::io::{self, Write};
use std::sync::Mutex;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

static STDERR_GATE: OutputGate = OutputGate::new();

/// Passes writes through to a sink, or holds them while closed.
pub(crate) struct OutputGate {
    held: Mutex<Option<Vec<u8>>>,
}

impl OutputGate {
    pub(crate) const fn new() -> Self {
        Self {
            held: Mutex::new(None),
        }
    }

    /// Start holding output.
    pub(crate) fn close(&self) {
        let mut held = self.held.lock().unwrap_or_else(|p| p.into_inner());
        held.get_or_insert_with(Vec::new);
    }

    /// Stop holding output and write out everything held so far.
    pub(crate) fn open(&self, sink: &mut dyn Write) -> io::Result<()> {
        let held = self.held.lock().unwrap_or_else(|p| p.into_inner()).take();
        match held {
            Some(bytes) if !bytes.is_empty() => {
                sink.write_all(&bytes)?;
                sink.flush()
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn write(&self, buf: &[u8], sink: &mut dyn Write) -> io::Result<usize> {
        let mut held = self.held.lock().unwrap_or_else(|p| p.into_inner());
        match held.as_mut() {
            Some(bytes) => {
                bytes.extend_from_slice(buf);
                Ok(buf.len())
            }
            None => sink.write(buf),
        }
    }
}

/// Hold log output until [`release_log_output`].
pub(crate) fn hold_log_output() {
    STDERR_GATE.close();
}

pub(crate) fn release_log_output() {
    if let Err(e) = STDERR_GATE.open(&mut io::stderr()) {
        eprintln!("failed to write held log output: {e}");
    }
}

/// env_logger target that writes through [`STDERR_GATE`].
struct GatedStderr;

impl Write for GatedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        STDERR_GATE.write(buf, &mut io::stderr())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Messages at info level are plain user-facing output; warnings and errors
/// get a colored prefix. Verbose mode adds timestamps and module targets.
pub(crate) fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Warn);
    builder.filter_module("hyper_util", LevelFilter::Warn);
    builder.parse_default_env();
    builder.target(env_logger::Target::Pipe(Box::new(GatedStderr)));
    builder.format(move |buf, record| {
        if verbose {
            return writeln!(
                buf,
                "{} {:<5} {}: {}",
                buf.timestamp_seconds(),
                record.level(),
                record.target(),
                record.args()
            );
        }
        match record.level() {
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stderr, |t| t.red()),
                record.args()
            ),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stderr, |t| t.yellow()),
                record.args()
            ),
            _ => writeln!(buf, "{}", record.args()),
        }
    });
    builder.init();
}
