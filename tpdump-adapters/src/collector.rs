//! Aggregation of every active subsystem into one collection.

use std::collections::BTreeMap;

use tpdump_types::{PrimitiveCollection, SubsystemKind};
use tracing::debug;

use crate::{AdapterError, Event, ExtractionAdapter, SetupError};

/// Runs the active adapters in subsystem order and concatenates their output.
///
/// The activation set is fixed when the collector is built. The order of
/// the resulting collection depends only on that set and on each adapter's
/// own order: subsystems follow [`SubsystemKind::ALL`], records within a
/// subsystem follow the event product.
#[derive(Debug)]
pub struct Collector {
    adapters: Vec<Box<dyn ExtractionAdapter>>,
}

impl Collector {
    /// Create a new builder for configuring the collector.
    pub fn builder() -> CollectorBuilder {
        CollectorBuilder::default()
    }

    /// The subsystems this collector extracts, in extraction order.
    pub fn active_kinds(&self) -> Vec<SubsystemKind> {
        self.adapters.iter().map(|a| a.kind()).collect()
    }

    pub fn is_active(&self, kind: SubsystemKind) -> bool {
        self.adapters.iter().any(|a| a.kind() == kind)
    }

    /// Extract every active subsystem from `event`.
    ///
    /// The first adapter error aborts the whole aggregation; records already
    /// extracted for this event are discarded with the partial collection.
    pub fn aggregate(&self, event: &Event) -> Result<PrimitiveCollection, AdapterError> {
        let mut out = PrimitiveCollection::new();

        for adapter in &self.adapters {
            let kind = adapter.kind();
            let start = out.len();
            let reported = adapter.extract(event, &mut out)?;
            let appended = out.len() - start;

            if reported != appended {
                return Err(AdapterError::ContractViolation {
                    kind,
                    detail: format!("reported {} records but appended {}", reported, appended),
                });
            }
            if let Some(stray) = out.since(start).iter().find(|r| r.kind() != kind) {
                return Err(AdapterError::ContractViolation {
                    kind,
                    detail: format!("appended a {} primitive", stray.kind()),
                });
            }

            debug!(%kind, appended, event = event.event, "extracted primitives");
        }

        Ok(out)
    }
}

/// Builder for [`Collector`].
#[derive(Debug, Default)]
pub struct CollectorBuilder {
    registered: BTreeMap<SubsystemKind, Box<dyn ExtractionAdapter>>,
    active: BTreeMap<SubsystemKind, bool>,
}

impl CollectorBuilder {
    /// Register the adapter for its subsystem, replacing any earlier one.
    pub fn register<A>(self, adapter: A) -> Self
    where
        A: ExtractionAdapter + 'static,
    {
        self.register_boxed(Box::new(adapter))
    }

    /// Register an already boxed adapter.
    pub fn register_boxed(mut self, adapter: Box<dyn ExtractionAdapter>) -> Self {
        self.registered.insert(adapter.kind(), adapter);
        self
    }

    /// Switch a subsystem on or off. Subsystems are off unless activated.
    pub fn activate(mut self, kind: SubsystemKind, active: bool) -> Self {
        self.active.insert(kind, active);
        self
    }

    /// Apply a whole activation list at once.
    pub fn activation(mut self, flags: &[(SubsystemKind, bool)]) -> Self {
        for &(kind, active) in flags {
            self.active.insert(kind, active);
        }
        self
    }

    /// Build the collector.
    ///
    /// Fails when an active subsystem has no registered adapter. Adapters
    /// registered for inactive subsystems are kept out of the collector.
    pub fn build(mut self) -> Result<Collector, SetupError> {
        let mut adapters = Vec::new();

        for kind in SubsystemKind::ALL {
            let active = self.active.get(&kind).copied().unwrap_or(false);
            match (active, self.registered.remove(&kind)) {
                (true, Some(adapter)) => adapters.push(adapter),
                (true, None) => return Err(SetupError::Unregistered(kind)),
                (false, Some(_)) => debug!(%kind, "adapter registered but inactive"),
                (false, None) => {}
            }
        }

        Ok(Collector { adapters })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AdapterInputs, Locator};
    use tpdump_types::{
        CscData, CscDetId, DtChamberId, DtData, GemData, GemDetId, Primitive, PrimitiveRecord,
    };

    /// Appends a fixed number of DT-shaped records tagged with `tag`.
    #[derive(Debug)]
    struct FixedAdapter {
        kind: SubsystemKind,
        count: usize,
        tag: SubsystemKind,
        fail: bool,
        inputs: AdapterInputs,
    }

    impl FixedAdapter {
        fn new(kind: SubsystemKind, count: usize) -> Self {
            Self {
                kind,
                count,
                tag: kind,
                fail: false,
                inputs: AdapterInputs::Single(Locator::new(kind.name()).unwrap()),
            }
        }

        fn failing(kind: SubsystemKind) -> Self {
            Self {
                fail: true,
                ..Self::new(kind, 0)
            }
        }
    }

    fn record(kind: SubsystemKind, strip: i32) -> PrimitiveRecord {
        let detail = match kind {
            SubsystemKind::Dt => Primitive::Dt {
                id: DtChamberId {
                    wheel: 0,
                    sector: 1,
                    station: 1,
                },
                data: DtData {
                    bti_group: strip,
                    bending_angle: 0,
                    quality_code: 0,
                    theta_bti_group: None,
                    theta_quality: None,
                },
            },
            SubsystemKind::Gem => Primitive::Gem {
                id: GemDetId {
                    region: 1,
                    station: 1,
                    ring: 1,
                    chamber: 1,
                    roll: 1,
                    layer: 1,
                },
                data: GemData {
                    pad_low: strip,
                    pad_hi: strip,
                },
            },
            _ => Primitive::Csc {
                id: CscDetId {
                    endcap: 1,
                    sector: 1,
                    station: 1,
                    ring: 1,
                    chamber: 1,
                },
                data: CscData {
                    csc_id: 1,
                    bend: 0,
                    quality: 0,
                    pattern: 0,
                },
            },
        };
        PrimitiveRecord::new(0, strip, 0, detail)
    }

    impl ExtractionAdapter for FixedAdapter {
        fn kind(&self) -> SubsystemKind {
            self.kind
        }

        fn inputs(&self) -> &AdapterInputs {
            &self.inputs
        }

        fn extract(
            &self,
            _event: &Event,
            out: &mut PrimitiveCollection,
        ) -> Result<usize, AdapterError> {
            if self.fail {
                return Err(AdapterError::Malformed {
                    kind: self.kind,
                    locator: self.inputs.primary().key(),
                    reason: "corrupt".to_string(),
                });
            }
            for i in 0..self.count {
                out.push(record(self.tag, i as i32));
            }
            Ok(self.count)
        }
    }

    #[test]
    fn concatenates_in_kind_order() {
        // Registration order must not matter.
        let collector = Collector::builder()
            .register(FixedAdapter::new(SubsystemKind::Dt, 2))
            .register(FixedAdapter::new(SubsystemKind::Csc, 3))
            .register(FixedAdapter::new(SubsystemKind::Gem, 1))
            .activation(&[
                (SubsystemKind::Csc, true),
                (SubsystemKind::Gem, true),
                (SubsystemKind::Dt, true),
            ])
            .build()
            .unwrap();

        let out = collector.aggregate(&Event::new(1, 1)).unwrap();

        assert_eq!(out.len(), 6);
        let kinds: Vec<SubsystemKind> = out.iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SubsystemKind::Csc,
                SubsystemKind::Csc,
                SubsystemKind::Csc,
                SubsystemKind::Gem,
                SubsystemKind::Dt,
                SubsystemKind::Dt,
            ]
        );
        let csc_strips: Vec<i32> = out.of_kind(SubsystemKind::Csc).map(|r| r.strip()).collect();
        assert_eq!(csc_strips, vec![0, 1, 2]);
    }

    #[test]
    fn length_is_sum_for_every_activation() {
        let counts = [(SubsystemKind::Csc, 3), (SubsystemKind::Gem, 1), (SubsystemKind::Dt, 2)];

        for mask in 0..8u8 {
            let mut builder = Collector::builder();
            let mut expected = 0;
            for (bit, &(kind, count)) in counts.iter().enumerate() {
                let active = mask & (1 << bit) != 0;
                if active {
                    expected += count;
                }
                builder = builder
                    .register(FixedAdapter::new(kind, count))
                    .activate(kind, active);
            }

            let out = builder.build().unwrap().aggregate(&Event::new(1, 1)).unwrap();
            assert_eq!(out.len(), expected, "mask {:03b}", mask);
        }
    }

    #[test]
    fn nothing_active_is_empty() {
        let collector = Collector::builder()
            .register(FixedAdapter::new(SubsystemKind::Csc, 3))
            .build()
            .unwrap();

        assert!(collector.active_kinds().is_empty());
        assert!(collector.aggregate(&Event::new(1, 1)).unwrap().is_empty());
    }

    #[test]
    fn active_without_adapter_fails_setup() {
        let err = Collector::builder()
            .register(FixedAdapter::new(SubsystemKind::Csc, 1))
            .activate(SubsystemKind::Csc, true)
            .activate(SubsystemKind::Me0, true)
            .build()
            .unwrap_err();

        assert_eq!(err, SetupError::Unregistered(SubsystemKind::Me0));
    }

    #[test]
    fn first_error_aborts() {
        let collector = Collector::builder()
            .register(FixedAdapter::new(SubsystemKind::Csc, 2))
            .register(FixedAdapter::failing(SubsystemKind::Gem))
            .activate(SubsystemKind::Csc, true)
            .activate(SubsystemKind::Gem, true)
            .build()
            .unwrap();

        let err = collector.aggregate(&Event::new(1, 1)).unwrap_err();
        assert_eq!(err.kind(), SubsystemKind::Gem);
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn wrong_kind_is_contract_violation() {
        let mut liar = FixedAdapter::new(SubsystemKind::Gem, 1);
        liar.tag = SubsystemKind::Dt;

        let collector = Collector::builder()
            .register(liar)
            .activate(SubsystemKind::Gem, true)
            .build()
            .unwrap();

        let err = collector.aggregate(&Event::new(1, 1)).unwrap_err();
        assert!(err.is_contract_violation());
        assert!(err.to_string().contains("dt primitive"));
    }
}
