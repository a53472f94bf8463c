//! Human-readable and JSON-lines reporting sinks.

use std::io::{self, Write};

use tracing::warn;

use crate::core::status::TestStatus;
use crate::event::{Event, EventSink};

/// Plain-text reporter in the spirit of classic suite runners.
///
/// Keeps its own stack of qualified group names built from the event
/// stream, so nested closes can be labeled without the engine carrying
/// presentation state. Write failures are logged and swallowed; reporting
/// must never influence the run.
pub struct TextReporter<W> {
    out: W,
    open_groups: Vec<String>,
}

impl TextReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            open_groups: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, event: &Event) -> io::Result<()> {
        match event {
            Event::GroupOpened {
                qualified_name,
                skipped: false,
            } => {
                writeln!(self.out, "\n@@@@ {qualified_name}")?;
                self.open_groups.push(qualified_name.clone());
            }
            Event::GroupOpened {
                qualified_name,
                skipped: true,
            } => writeln!(self.out, "\n@@@@ {qualified_name} # SKIP")?,
            Event::TestStarted { qualified_name } => {
                writeln!(self.out, "---- {qualified_name}")?;
            }
            Event::TestFinished {
                name,
                status,
                duration_ms,
            } => {
                if *status == TestStatus::Skip {
                    writeln!(self.out, "---- {name}")?;
                }
                writeln!(self.out, "      # {status} ({duration_ms}ms)")?;
            }
            Event::GroupClosed {
                name,
                pass,
                fail,
                skip,
                duration_ms,
                is_root,
            } => {
                let qualified = self.open_groups.pop().unwrap_or_else(|| name.clone());
                if *is_root {
                    writeln!(
                        self.out,
                        "\n!!!! {qualified} # DONE :: {pass} pass, {fail} fail, {skip} skip ({duration_ms}ms)"
                    )?;
                } else {
                    writeln!(self.out, "==== {qualified} # DONE ({duration_ms}ms)")?;
                }
            }
            Event::Concluded {
                pass,
                fail,
                skip,
                duration_ms,
            } => writeln!(
                self.out,
                "\n--- {pass} pass, {fail} fail, {skip} skip ({duration_ms}ms) ---"
            )?,
        }
        Ok(())
    }
}

impl<W: Write> EventSink for TextReporter<W> {
    fn emit(&mut self, event: &Event) {
        if let Err(err) = self.render(event) {
            warn!(%err, "text reporter write failed");
        }
    }
}

/// One JSON object per line, suitable for machine consumption.
pub struct JsonReporter<W> {
    out: W,
}

impl JsonReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, event: &Event) -> io::Result<()> {
        let line = serde_json::to_string(event).map_err(io::Error::other)?;
        writeln!(self.out, "{line}")
    }
}

impl<W: Write> EventSink for JsonReporter<W> {
    fn emit(&mut self, event: &Event) {
        if let Err(err) = self.render(event) {
            warn!(%err, "json reporter write failed");
        }
    }
}
