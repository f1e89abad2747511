//! ME0 adapter for segments.
//!
//! ME0 is a single GEM station in front of ME1/1, so entries carry no
//! station or ring; both are always 1.

use serde::Deserialize;
use tpdump_types::{GemDetId, Me0Data, Primitive, PrimitiveCollection, PrimitiveRecord, SubsystemKind};

use crate::adapter::Product;
use crate::{AdapterError, AdapterInputs, Event, ExtractionAdapter, Locator};

#[derive(Debug, Deserialize)]
struct RawSegment {
    region: i32,
    chamber: i32,
    roll: i32,
    layer: i32,
    bx: i32,
    phi_position: i32,
    delta_phi: i32,
    bend: i32,
    quality: i32,
    partition: i32,
}

/// Extracts ME0 segments. The record strip is the phi position.
#[derive(Debug, Clone)]
pub struct Me0Adapter {
    inputs: AdapterInputs,
}

impl Me0Adapter {
    pub fn new(locator: Locator) -> Self {
        Self {
            inputs: AdapterInputs::Single(locator),
        }
    }

    fn convert(product: &Product<'_>, seg: RawSegment) -> Result<PrimitiveRecord, AdapterError> {
        product.check_endcap_region(seg.region)?;
        product.check("chamber", seg.chamber, 1..=18)?;
        product.check("layer", seg.layer, 0..=6)?;

        let id = GemDetId {
            region: seg.region,
            station: 1,
            ring: 1,
            chamber: seg.chamber,
            roll: seg.roll,
            layer: seg.layer,
        };
        let data = Me0Data {
            phi_position: seg.phi_position,
            delta_phi: seg.delta_phi,
            bend: seg.bend,
            quality: seg.quality,
            partition: seg.partition,
        };
        Ok(PrimitiveRecord::new(
            seg.bx,
            seg.phi_position,
            0,
            Primitive::Me0 { id, data },
        ))
    }
}

impl ExtractionAdapter for Me0Adapter {
    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Me0
    }

    fn inputs(&self) -> &AdapterInputs {
        &self.inputs
    }

    fn extract(
        &self,
        event: &Event,
        out: &mut PrimitiveCollection,
    ) -> Result<usize, AdapterError> {
        let product = Product::new(self.kind(), self.inputs.primary());
        let records = product
            .decode::<RawSegment>(event)?
            .into_iter()
            .map(|seg| Self::convert(&product, seg))
            .collect::<Result<Vec<_>, _>>()?;

        let count = records.len();
        for record in records {
            out.push(record);
        }
        Ok(count)
    }
}
