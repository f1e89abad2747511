//! The report controller: one full aggregate-and-render pass per event.
//!
//! A pass either completes and writes every line for its event, or fails and
//! writes nothing. Lines are buffered until the whole event has been
//! aggregated and rendered, so a failing subsystem never leaves a partial
//! report behind.

use std::io::{self, Write};

use thiserror::Error;
use tpdump_adapters::{AdapterError, Collector, Event, PrimitiveCollection, SubsystemKind};
use tracing::{info, warn};

use crate::config::{ConfigError, Settings};
use crate::render::{RenderOptions, Renderer};
use crate::source::{EventSource, SourceError};

/// Subsystems rendered together. RPC and iRPC share one pass.
const RENDER_GROUPS: &[&[SubsystemKind]] = &[
    &[SubsystemKind::Csc],
    &[SubsystemKind::Rpc, SubsystemKind::Irpc],
    &[SubsystemKind::Gem],
    &[SubsystemKind::Me0],
    &[SubsystemKind::Dt],
];

/// Errors that end a pass.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A subsystem could not be extracted.
    #[error(transparent)]
    Source(#[from] AdapterError),

    /// The event source failed and cannot continue.
    #[error("event source failed: {0}")]
    Input(#[from] SourceError),

    /// The diagnostic sink could not be written.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Totals of a [`Reporter::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Events fully reported.
    pub processed: usize,
    /// Events dropped because their input could not be read or extracted.
    pub skipped: usize,
    /// Primitives across all reported events.
    pub primitives: usize,
}

/// Drives aggregation and rendering and writes the result to a sink.
#[derive(Debug)]
pub struct Reporter {
    collector: Collector,
    renderer: Renderer,
    render_kinds: Vec<SubsystemKind>,
}

impl Reporter {
    /// Create a reporter that renders every active subsystem.
    pub fn new(collector: Collector, options: RenderOptions) -> Self {
        let render_kinds = collector.active_kinds();
        Self {
            collector,
            renderer: Renderer::new(options),
            render_kinds,
        }
    }

    /// Build the collector and renderer described by `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let collector = settings.collector()?;
        info!(kinds = ?collector.active_kinds(), "active subsystems");
        Ok(Self::new(collector, settings.render_options()))
    }

    /// Restrict rendering to `kinds`. Inactive subsystems stay unrendered.
    pub fn render_only(mut self, kinds: &[SubsystemKind]) -> Self {
        let active = self.collector.active_kinds();
        self.render_kinds = active.into_iter().filter(|k| kinds.contains(k)).collect();
        self
    }

    /// Build the full report for one event without writing it.
    ///
    /// The first line is always `# of TPs: N` with N counting every
    /// extracted primitive, rendered or not.
    pub fn report(&self, event: &Event) -> Result<Vec<String>, AdapterError> {
        let primitives = self.collector.aggregate(event)?;
        Ok(self.lines(&primitives))
    }

    /// Report one event into `sink`. Nothing is written if the event fails.
    ///
    /// Returns the number of primitives in the event.
    pub fn process<W: Write>(&self, event: &Event, sink: &mut W) -> Result<usize, ReportError> {
        let primitives = self.collector.aggregate(event)?;

        let mut buf = String::new();
        for line in self.lines(&primitives) {
            buf.push_str(&line);
            buf.push('\n');
        }
        sink.write_all(buf.as_bytes())?;

        Ok(primitives.len())
    }

    /// Report every event of `source` into `sink`.
    ///
    /// Events whose input is unreadable or malformed are skipped with a
    /// warning. Contract violations, source failures and sink errors end
    /// the run.
    pub fn run<S, W>(
        &self,
        source: &mut S,
        sink: &mut W,
        max_events: Option<usize>,
    ) -> Result<RunSummary, ReportError>
    where
        S: EventSource + ?Sized,
        W: Write,
    {
        let mut summary = RunSummary::default();

        while max_events.map_or(true, |max| summary.processed + summary.skipped < max) {
            let event = match source.next_event() {
                None => break,
                Some(Ok(event)) => event,
                Some(Err(e)) if e.is_recoverable() => {
                    warn!(source = source.description(), error = %e, "skipping unreadable event");
                    summary.skipped += 1;
                    continue;
                }
                Some(Err(e)) => return Err(ReportError::Input(e)),
            };

            match self.process(&event, sink) {
                Ok(primitives) => {
                    summary.processed += 1;
                    summary.primitives += primitives;
                }
                Err(ReportError::Source(e)) if !e.is_contract_violation() => {
                    warn!(
                        run = event.run,
                        event = event.event,
                        kind = %e.kind(),
                        error = %e,
                        "skipping event"
                    );
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        sink.flush()?;
        info!(
            processed = summary.processed,
            skipped = summary.skipped,
            primitives = summary.primitives,
            "run finished"
        );
        Ok(summary)
    }

    fn lines(&self, primitives: &PrimitiveCollection) -> Vec<String> {
        let mut lines = vec![format!("# of TPs: {}", primitives.len())];
        for group in RENDER_GROUPS {
            let kinds: Vec<SubsystemKind> = group
                .iter()
                .copied()
                .filter(|k| self.render_kinds.contains(k))
                .collect();
            if !kinds.is_empty() {
                lines.extend(self.renderer.render(primitives, &kinds));
            }
        }
        lines
    }
}
