//! Ordered, heterogeneous collection of trigger primitives.

use crate::{PrimitiveRecord, SubsystemKind};

/// All trigger primitives of one event, across every subsystem.
///
/// Records keep their insertion order. Nothing is sorted or deduplicated:
/// two identical primitives from the same subsystem stay two records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveCollection {
    records: Vec<PrimitiveRecord>,
}

impl PrimitiveCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the end.
    pub fn push(&mut self, record: PrimitiveRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrimitiveRecord> {
        self.records.iter()
    }

    /// Records of one kind, in collection order.
    pub fn of_kind(&self, kind: SubsystemKind) -> impl Iterator<Item = &PrimitiveRecord> {
        self.records.iter().filter(move |r| r.kind() == kind)
    }

    /// Records whose kind is any of `kinds`, in collection order.
    pub fn of_kinds<'a>(
        &'a self,
        kinds: &'a [SubsystemKind],
    ) -> impl Iterator<Item = &'a PrimitiveRecord> + 'a {
        self.records.iter().filter(move |r| kinds.contains(&r.kind()))
    }

    /// Number of records of one kind.
    pub fn count_of(&self, kind: SubsystemKind) -> usize {
        self.of_kind(kind).count()
    }

    /// Records appended at or after `start`.
    pub fn since(&self, start: usize) -> &[PrimitiveRecord] {
        self.records.get(start..).unwrap_or(&[])
    }
}

impl<'a> IntoIterator for &'a PrimitiveCollection {
    type Item = &'a PrimitiveRecord;
    type IntoIter = std::slice::Iter<'a, PrimitiveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
