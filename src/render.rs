//! Diagnostic line rendering.
//!
//! Every primitive becomes exactly one line of the form
//! `<label> #<index>: <key value pairs>`. The labels and field order are
//! fixed per subsystem; the index counts records of that subsystem only and
//! restarts at 0 on every [`Renderer::render`] call.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};
use tpdump_adapters::{Primitive, PrimitiveCollection, PrimitiveRecord, SubsystemKind};

/// How RPC lines show the region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionStyle {
    /// `endcap N` in CSC numbering: region -1 is shown as 2.
    #[default]
    Endcap,
    /// `region N` with the raw region value.
    Region,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub region_style: RegionStyle,
}

/// Turns primitives into diagnostic lines. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render every record whose kind is in `kinds`, in collection order.
    pub fn render(&self, collection: &PrimitiveCollection, kinds: &[SubsystemKind]) -> Vec<String> {
        let mut counters: BTreeMap<SubsystemKind, usize> = BTreeMap::new();

        collection
            .of_kinds(kinds)
            .map(|record| {
                let index = counters.entry(record.kind()).or_insert(0);
                let line = self.line(*index, record);
                *index += 1;
                line
            })
            .collect()
    }

    /// Render a single record with the given local index.
    pub fn line(&self, index: usize, record: &PrimitiveRecord) -> String {
        let mut line = format!("{} #{}: BX {}", record.kind().label(), index, record.bx());

        // Writing into a String cannot fail.
        let _ = match record.detail() {
            Primitive::Csc { id, data } => write!(
                line,
                " endcap {} sector {} station {} ring {} chamber {} cscid {} strip {} wire {} bend {} qual {} pattern {}",
                id.endcap,
                id.sector,
                id.station,
                id.ring,
                id.chamber,
                data.csc_id,
                record.strip(),
                record.wire(),
                data.bend,
                data.quality,
                data.pattern,
            ),
            Primitive::Rpc { id, data } | Primitive::Irpc { id, data } => {
                let region = match self.options.region_style {
                    RegionStyle::Endcap => format!("endcap {}", id.endcap()),
                    RegionStyle::Region => format!("region {}", id.region),
                };
                write!(
                    line,
                    " {} sector_rpc {} station {} ring {} subsector_rpc {} roll {} strip {} (low) {} (hi) {} time {} valid {}",
                    region,
                    id.sector,
                    id.station,
                    id.ring,
                    id.subsector,
                    id.roll,
                    record.strip(),
                    data.strip_low,
                    data.strip_hi,
                    data.time,
                    u8::from(data.valid),
                )
            }
            Primitive::Gem { id, data } => write!(
                line,
                " region {} station {} ring {} chamber {} roll {} layer {} strip {} pad (low) {} (hi) {}",
                id.region,
                id.station,
                id.ring,
                id.chamber,
                id.roll,
                id.layer,
                record.strip(),
                data.pad_low,
                data.pad_hi,
            ),
            Primitive::Me0 { id, data } => write!(
                line,
                " region {} station {} ring {} chamber {} roll {} layer {} strip {} phi_position {} delta_phi {} bend {} qual {} partition {}",
                id.region,
                id.station,
                id.ring,
                id.chamber,
                id.roll,
                id.layer,
                record.strip(),
                data.phi_position,
                data.delta_phi,
                data.bend,
                data.quality,
                data.partition,
            ),
            Primitive::Dt { id, data } => {
                let mut result = write!(
                    line,
                    " wheel {} sector {} station {} strip {} bti_group {} bend_angle {} qual_code {}",
                    id.wheel,
                    id.sector,
                    id.station,
                    record.strip(),
                    data.bti_group,
                    data.bending_angle,
                    data.quality_code,
                );
                if let (Some(bti), Some(quality)) = (data.theta_bti_group, data.theta_quality) {
                    result = write!(line, " theta_bti {} theta_qual {}", bti, quality);
                }
                result
            }
        };

        line
    }
}
