//! Stream-based event source.
//!
//! Reads newline-delimited JSON events from any buffered reader.

use std::io::BufRead;

use tpdump_adapters::Event;

use super::{EventSource, SourceError};

/// An event source reading one JSON event per line.
///
/// Blank lines are skipped. A line that does not parse yields a
/// [`SourceError::Parse`] carrying its 1-based line number; reading goes on
/// with the next line.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use tpdump::{EventSource, StreamSource};
///
/// let data = "{\"run\": 1, \"event\": 5}\n";
/// let mut source = StreamSource::new(Cursor::new(data), "example");
/// assert_eq!(source.next_event().unwrap().unwrap().event, 5);
/// assert!(source.next_event().is_none());
/// ```
#[derive(Debug)]
pub struct StreamSource<R> {
    reader: R,
    description: String,
    line: usize,
    buf: String,
    failed: bool,
}

impl<R: BufRead> StreamSource<R> {
    pub fn new(reader: R, description: &str) -> Self {
        Self {
            reader,
            description: format!("stream: {}", description),
            line: 0,
            buf: String::new(),
            failed: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead + std::fmt::Debug> EventSource for StreamSource<R> {
    fn next_event(&mut self) -> Option<Result<Event, SourceError>> {
        if self.failed {
            return None;
        }

        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line += 1;
                    let text = self.buf.trim();
                    if text.is_empty() {
                        continue;
                    }
                    return Some(serde_json::from_str(text).map_err(|source| {
                        SourceError::Parse {
                            line: self.line,
                            source,
                        }
                    }));
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(SourceError::Read(e)));
                }
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_events_and_skips_blank_lines() {
        let data = "{\"run\": 1, \"event\": 1}\n\n   \n{\"run\": 1, \"event\": 2}\n";
        let mut source = StreamSource::new(Cursor::new(data), "test");

        assert_eq!(source.next_event().unwrap().unwrap().event, 1);
        assert_eq!(source.next_event().unwrap().unwrap().event, 2);
        assert!(source.next_event().is_none());
        assert_eq!(source.line(), 4);
        assert_eq!(source.description(), "stream: test");
    }

    #[test]
    fn bad_line_reports_line_number_and_continues() {
        let data = "{\"event\": 1}\nnot json\n{\"event\": 3}";
        let mut source = StreamSource::new(Cursor::new(data), "test");

        assert!(source.next_event().unwrap().is_ok());
        match source.next_event().unwrap() {
            Err(SourceError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
        assert_eq!(source.next_event().unwrap().unwrap().event, 3);
        assert!(source.next_event().is_none());
    }

    #[test]
    fn products_are_kept_verbatim() {
        let data = r#"{"event": 9, "products": {"simMuonRPCDigis": [{"region": 1}]}}"#;
        let mut source = StreamSource::new(Cursor::new(data), "test");

        let event = source.next_event().unwrap().unwrap();
        assert_eq!(event.products["simMuonRPCDigis"][0]["region"], 1);
    }
}
