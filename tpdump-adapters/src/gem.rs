//! GEM adapter for pad clusters.

use serde::Deserialize;
use tpdump_types::{GemData, GemDetId, Primitive, PrimitiveCollection, PrimitiveRecord, SubsystemKind};

use crate::adapter::Product;
use crate::{AdapterError, AdapterInputs, Event, ExtractionAdapter, Locator};

#[derive(Debug, Deserialize)]
struct RawPadCluster {
    #[serde(flatten)]
    id: GemDetId,
    bx: i32,
    pad_low: i32,
    pad_hi: i32,
}

/// Extracts GEM pad clusters. The record strip is the first pad.
#[derive(Debug, Clone)]
pub struct GemAdapter {
    inputs: AdapterInputs,
}

impl GemAdapter {
    pub fn new(locator: Locator) -> Self {
        Self {
            inputs: AdapterInputs::Single(locator),
        }
    }

    fn convert(product: &Product<'_>, pad: RawPadCluster) -> Result<PrimitiveRecord, AdapterError> {
        let id = pad.id;
        product.check_endcap_region(id.region)?;
        product.check("station", id.station, 1..=2)?;
        product.check("layer", id.layer, 1..=2)?;
        if pad.pad_low > pad.pad_hi {
            return Err(product.malformed(format!(
                "pad_low {} above pad_hi {}",
                pad.pad_low, pad.pad_hi
            )));
        }

        let data = GemData {
            pad_low: pad.pad_low,
            pad_hi: pad.pad_hi,
        };
        Ok(PrimitiveRecord::new(pad.bx, pad.pad_low, 0, Primitive::Gem { id, data }))
    }
}

impl ExtractionAdapter for GemAdapter {
    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Gem
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
            .decode::<RawPadCluster>(event)?
            .into_iter()
            .map(|pad| Self::convert(&product, pad))
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
        Locator::new("simMuonGEMPadDigiClusters").unwrap()
    }

    #[test]
    fn extracts_pad_clusters() {
        let product = json!([{
            "region": -1, "station": 1, "ring": 1, "chamber": 12,
            "roll": 4, "layer": 2, "bx": 1, "pad_low": 40, "pad_hi": 42
        }]);
        let event = Event::new(1, 1).with_product(&locator(), product);
        let mut out = PrimitiveCollection::new();

        let count = GemAdapter::new(locator()).extract(&event, &mut out).unwrap();

        assert_eq!(count, 1);
        let record = out.iter().next().unwrap();
        let (id, data) = record.gem().unwrap();
        assert_eq!(id.chamber, 12);
        assert_eq!(id.layer, 2);
        assert_eq!(data.pad_hi, 42);
        assert_eq!(record.strip(), 40);
        assert_eq!(record.bx(), 1);
    }

    #[test]
    fn region_zero_is_malformed() {
        let product = json!([{
            "region": 0, "station": 1, "ring": 1, "chamber": 12,
            "roll": 4, "layer": 2, "bx": 1, "pad_low": 40, "pad_hi": 42
        }]);
        let event = Event::new(1, 1).with_product(&locator(), product);
        let mut out = PrimitiveCollection::new();

        let err = GemAdapter::new(locator()).extract(&event, &mut out).unwrap_err();
        assert_eq!(err.kind(), SubsystemKind::Gem);
        assert!(err.to_string().contains("region 0"));
    }

    #[test]
    fn non_list_product_is_malformed() {
        let event = Event::new(1, 1).with_product(&locator(), json!("garbage"));
        let mut out = PrimitiveCollection::new();

        assert!(GemAdapter::new(locator()).extract(&event, &mut out).is_err());
    }
}
