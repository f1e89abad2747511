//! File-based event source.
//!
//! Reads a JSON Lines file, one event per line.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tpdump_adapters::Event;

use super::{EventSource, SourceError, StreamSource};

/// A data source that reads events from a JSON Lines file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    inner: StreamSource<BufReader<File>>,
}

impl FileSource {
    /// Open the file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let description = format!("file: {}", path.display());
        let inner = StreamSource::new(BufReader::new(file), &description);
        Ok(Self {
            path,
            description,
            inner,
        })
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for FileSource {
    fn next_event(&mut self) -> Option<Result<Event, SourceError>> {
        self.inner.next_event()
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_events_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"run": 3, "event": 1}}"#).unwrap();
        writeln!(file, r#"{{"run": 3, "event": 2}}"#).unwrap();

        let mut source = FileSource::open(file.path()).unwrap();
        assert_eq!(source.path(), file.path());
        assert!(source.description().starts_with("file: "));

        let events: Vec<u64> = std::iter::from_fn(|| source.next_event())
            .map(|e| e.unwrap().event)
            .collect();
        assert_eq!(events, vec![1, 2]);
    }

    #[test]
    fn missing_file() {
        let err = FileSource::open("/nonexistent/path/events.jsonl").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
