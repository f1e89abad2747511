//! In-memory event source.

use std::collections::VecDeque;

use tpdump_adapters::Event;

use super::{EventSource, SourceError};

/// Serves a fixed list of events in order.
#[derive(Debug, Default)]
pub struct VecSource {
    events: VecDeque<Event>,
}

impl VecSource {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for VecSource {
    fn next_event(&mut self) -> Option<Result<Event, SourceError>> {
        self.events.pop_front().map(Ok)
    }

    fn description(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_in_order() {
        let mut source = VecSource::new(vec![Event::new(1, 1), Event::new(1, 2)]);
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_event().unwrap().unwrap().event, 1);
        assert_eq!(source.next_event().unwrap().unwrap().event, 2);
        assert!(source.next_event().is_none());
    }
}
