//! CSC adapter for local charged tracks.
//!
//! Reads the MPC-sorted LCTs of every chamber. Each entry carries its chamber
//! in trigger numbering together with the LCT quantities:
//!
//! ```json
//! [{"endcap": 1, "sector": 3, "station": 1, "ring": 2, "chamber": 5,
//!   "csc_id": 10, "bx": 0, "strip": 20, "wire": 3,
//!   "bend": -2, "quality": 4, "pattern": 7}]
//! ```

use serde::Deserialize;
use tpdump_types::{
    CscData, CscDetId, Primitive, PrimitiveCollection, PrimitiveRecord, SubsystemKind,
};

use crate::adapter::Product;
use crate::{AdapterError, AdapterInputs, Event, ExtractionAdapter, Locator};

#[derive(Debug, Deserialize)]
struct RawLct {
    #[serde(flatten)]
    id: CscDetId,
    csc_id: i32,
    bx: i32,
    strip: i32,
    wire: i32,
    bend: i32,
    quality: i32,
    pattern: i32,
}

/// Extracts CSC local charged tracks.
#[derive(Debug, Clone)]
pub struct CscAdapter {
    inputs: AdapterInputs,
}

impl CscAdapter {
    pub fn new(locator: Locator) -> Self {
        Self {
            inputs: AdapterInputs::Single(locator),
        }
    }

    fn convert(product: &Product<'_>, lct: RawLct) -> Result<PrimitiveRecord, AdapterError> {
        let id = lct.id;
        product.check("endcap", id.endcap, 1..=2)?;
        product.check("sector", id.sector, 1..=6)?;
        product.check("station", id.station, 1..=4)?;
        product.check("ring", id.ring, 1..=4)?;
        product.check("chamber", id.chamber, 1..=36)?;

        let data = CscData {
            csc_id: lct.csc_id,
            bend: lct.bend,
            quality: lct.quality,
            pattern: lct.pattern,
        };
        Ok(PrimitiveRecord::new(
            lct.bx,
            lct.strip,
            lct.wire,
            Primitive::Csc { id, data },
        ))
    }
}

impl ExtractionAdapter for CscAdapter {
    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Csc
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
            .decode::<RawLct>(event)?
            .into_iter()
            .map(|lct| Self::convert(&product, lct))
            .collect::<Result<Vec<_>, _>>()?;

        let count = records.len();
        for record in records {
            out.push(record);
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn locator() -> Locator {
        "simCscTriggerPrimitiveDigis:MPCSORTED".parse().unwrap()
    }

    fn lct(chamber: i32, strip: i32) -> serde_json::Value {
        json!({
            "endcap": 1, "sector": 3, "station": 1, "ring": 2, "chamber": chamber,
            "csc_id": 10, "bx": 0, "strip": strip, "wire": 3,
            "bend": -2, "quality": 4, "pattern": 7
        })
    }

    #[test]
    fn extracts_in_product_order() {
        let event = Event::new(1, 1).with_product(&locator(), json!([lct(5, 20), lct(6, 8)]));
        let mut out = PrimitiveCollection::new();

        let count = CscAdapter::new(locator()).extract(&event, &mut out).unwrap();

        assert_eq!(count, 2);
        let first = out.iter().next().unwrap();
        let (id, data) = first.csc().unwrap();
        assert_eq!(id.chamber, 5);
        assert_eq!(id.sector, 3);
        assert_eq!(data.csc_id, 10);
        assert_eq!(first.strip(), 20);
        assert_eq!(first.wire(), 3);
        assert_eq!(out.iter().nth(1).unwrap().strip(), 8);
    }

    #[test]
    fn keeps_duplicates() {
        let event = Event::new(1, 1).with_product(&locator(), json!([lct(5, 20), lct(5, 20)]));
        let mut out = PrimitiveCollection::new();

        CscAdapter::new(locator()).extract(&event, &mut out).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn missing_product_appends_nothing() {
        let mut out = PrimitiveCollection::new();
        let count = CscAdapter::new(locator())
            .extract(&Event::new(1, 1), &mut out)
            .unwrap();
        assert_eq!(count, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn out_of_range_chamber_is_malformed() {
        let event = Event::new(1, 1).with_product(&locator(), json!([lct(37, 20)]));
        let mut out = PrimitiveCollection::new();

        let err = CscAdapter::new(locator())
            .extract(&event, &mut out)
            .unwrap_err();
        assert!(err.to_string().contains("chamber 37"));
        assert!(out.is_empty());
    }

    #[test]
    fn missing_field_is_malformed() {
        let event = Event::new(1, 1).with_product(&locator(), json!([{"endcap": 1}]));
        let mut out = PrimitiveCollection::new();

        let err = CscAdapter::new(locator())
            .extract(&event, &mut out)
            .unwrap_err();
        assert_eq!(err.kind(), SubsystemKind::Csc);
    }
}
