use colored::Colorize;
use fixea::commands::{Event, Reporter};
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub(super) const LOG_ENV: &str = "FIX_EA_LOG";

/// Prints verbose and debug reports, one line (or two for dumps) per event.
pub(super) struct ConsoleReporter<W: Write> {
    out: W,
    color: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub(super) fn stdout() -> Self {
        let color = io::stdout().is_terminal();
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub(super) fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    fn status(&self, text: &str, event: &Event) -> String {
        if !self.color {
            return text.to_string();
        }
        match event {
            Event::Corrupted { .. } => text.red().to_string(),
            Event::Fixed { .. } | Event::Appended { .. } => text.green().to_string(),
            Event::Dump { .. } => text.dimmed().to_string(),
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, path: &Path, event: Event) {
        let name = event.name().to_string_lossy();
        let line = match &event {
            Event::Dump { dump, .. } => {
                format!("{}: {}\n\t{}", path.display(), name, self.status(dump, &event))
            }
            Event::Corrupted { .. } => format!(
                "{}: {} {}",
                path.display(),
                name,
                self.status("is corrupted", &event)
            ),
            Event::Fixed { .. } => format!(
                "{}: {} {}",
                path.display(),
                name,
                self.status("is fixed", &event)
            ),
            Event::Appended { .. } => format!(
                "{}: {} {}",
                path.display(),
                name,
                self.status("null byte appended", &event)
            ),
        };
        // a closed stdout must not stop the repair
        let _ = writeln!(self.out, "{}", line);
    }
}

/// Install the stderr logger. `FIX_EA_LOG` overrides the level picked by `-d`.
pub(super) fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init()
    {
        eprintln!("fix_ea: failed to initialize logger: {err}");
    }
}
