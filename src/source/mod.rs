//! Event source abstraction.
//!
//! An event source hands out one input batch at a time. Sources are
//! sequential: the next event is only requested after the previous one has
//! been fully reported.

mod file;
mod memory;
mod stream;

pub use file::FileSource;
pub use memory::VecSource;
pub use stream::StreamSource;

use std::fmt::Debug;
use std::io;

use thiserror::Error;
use tpdump_adapters::Event;

/// Errors reading or decoding the next event.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("read error: {0}")]
    Read(#[from] io::Error),

    #[error("parse error on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// Whether the source can still deliver further events after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SourceError::Parse { .. })
    }
}

/// Trait for receiving events from various inputs.
///
/// # Example
///
/// ```
/// use tpdump::{EventSource, VecSource};
/// use tpdump_adapters::Event;
///
/// let mut source = VecSource::new(vec![Event::new(1, 1), Event::new(1, 2)]);
/// while let Some(event) = source.next_event() {
///     println!("event {}", event.unwrap().event);
/// }
/// ```
pub trait EventSource: Debug {
    /// The next event, `None` once the source is exhausted.
    fn next_event(&mut self) -> Option<Result<Event, SourceError>>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}
