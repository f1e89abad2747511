//! RPC and iRPC adapters for strip clusters.
//!
//! Both subsystems share one product. Clusters in the improved chambers
//! RE3/1 and RE4/1 belong to iRPC, everything else belongs to RPC, so the
//! two adapters together see every cluster exactly once.
//!
//! ```json
//! [{"region": -1, "sector": 2, "station": 1, "ring": 2, "subsector": 3,
//!   "roll": 1, "bx": 0, "strip_low": 10, "strip_hi": 12,
//!   "time": 0, "valid": true}]
//! ```

use serde::Deserialize;
use tpdump_types::{Primitive, PrimitiveCollection, PrimitiveRecord, RpcData, RpcDetId, SubsystemKind};

use crate::adapter::Product;
use crate::{AdapterError, AdapterInputs, Event, ExtractionAdapter, Locator};

#[derive(Debug, Deserialize)]
struct RawCluster {
    #[serde(flatten)]
    id: RpcDetId,
    bx: i32,
    strip_low: i32,
    strip_hi: i32,
    #[serde(default)]
    time: i32,
    #[serde(default = "default_valid")]
    valid: bool,
}

fn default_valid() -> bool {
    true
}

/// Extracts RPC or iRPC clusters, depending on how it was built.
#[derive(Debug, Clone)]
pub struct RpcAdapter {
    kind: SubsystemKind,
    inputs: AdapterInputs,
}

impl RpcAdapter {
    /// Adapter for clusters outside the improved chambers.
    pub fn rpc(locator: Locator) -> Self {
        Self {
            kind: SubsystemKind::Rpc,
            inputs: AdapterInputs::Single(locator),
        }
    }

    /// Adapter for clusters in RE3/1 and RE4/1.
    pub fn irpc(locator: Locator) -> Self {
        Self {
            kind: SubsystemKind::Irpc,
            inputs: AdapterInputs::Single(locator),
        }
    }

    fn accepts(&self, id: &RpcDetId) -> bool {
        match self.kind {
            SubsystemKind::Irpc => id.is_irpc(),
            _ => !id.is_irpc(),
        }
    }

    fn convert(
        &self,
        product: &Product<'_>,
        cluster: RawCluster,
    ) -> Result<PrimitiveRecord, AdapterError> {
        let id = cluster.id;
        product.check("region", id.region, -1..=1)?;
        product.check("station", id.station, 1..=4)?;
        if cluster.strip_low > cluster.strip_hi {
            return Err(product.malformed(format!(
                "strip_low {} above strip_hi {}",
                cluster.strip_low, cluster.strip_hi
            )));
        }

        let data = RpcData {
            strip_low: cluster.strip_low,
            strip_hi: cluster.strip_hi,
            time: cluster.time,
            valid: cluster.valid,
        };
        // The mean of two i32 values always fits back into an i32.
        let strip = ((i64::from(cluster.strip_low) + i64::from(cluster.strip_hi)) / 2) as i32;
        let detail = match self.kind {
            SubsystemKind::Irpc => Primitive::Irpc { id, data },
            _ => Primitive::Rpc { id, data },
        };
        Ok(PrimitiveRecord::new(cluster.bx, strip, 0, detail))
    }
}

impl ExtractionAdapter for RpcAdapter {
    fn kind(&self) -> SubsystemKind {
        self.kind
    }

    fn inputs(&self) -> &AdapterInputs {
        &self.inputs
    }

    fn extract(
        &self,
        event: &Event,
        out: &mut PrimitiveCollection,
    ) -> Result<usize, AdapterError> {
        let product = Product::new(self.kind, self.inputs.primary());
        let records = product
            .decode::<RawCluster>(event)?
            .into_iter()
            .filter(|cluster| self.accepts(&cluster.id))
            .map(|cluster| self.convert(&product, cluster))
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
        Locator::new("simMuonRPCDigis").unwrap()
    }

    fn cluster(region: i32, station: i32, ring: i32, low: i32, hi: i32) -> serde_json::Value {
        json!({
            "region": region, "sector": 2, "station": station, "ring": ring,
            "subsector": 3, "roll": 1, "bx": 0,
            "strip_low": low, "strip_hi": hi, "time": 1, "valid": true
        })
    }

    fn event() -> Event {
        Event::new(1, 1).with_product(
            &locator(),
            json!([
                cluster(-1, 1, 2, 10, 12),
                cluster(1, 3, 1, 30, 31),
                cluster(0, 2, 2, 4, 4),
                cluster(-1, 4, 1, 7, 9),
            ]),
        )
    }

    #[test]
    fn rpc_skips_improved_chambers() {
        let mut out = PrimitiveCollection::new();
        let count = RpcAdapter::rpc(locator()).extract(&event(), &mut out).unwrap();

        assert_eq!(count, 2);
        assert!(out.iter().all(|r| r.kind() == SubsystemKind::Rpc));
        let strips: Vec<i32> = out.iter().map(|r| r.strip()).collect();
        assert_eq!(strips, vec![11, 4]);
    }

    #[test]
    fn irpc_takes_only_improved_chambers() {
        let mut out = PrimitiveCollection::new();
        let count = RpcAdapter::irpc(locator()).extract(&event(), &mut out).unwrap();

        assert_eq!(count, 2);
        assert!(out.iter().all(|r| r.kind() == SubsystemKind::Irpc));
        let (id, data) = out.iter().next().unwrap().rpc().unwrap();
        assert_eq!(id.station, 3);
        assert_eq!(data.strip_low, 30);
        assert_eq!(data.strip_hi, 31);
    }

    #[test]
    fn valid_and_time_default() {
        let product = json!([{
            "region": 1, "sector": 1, "station": 1, "ring": 2,
            "subsector": 1, "roll": 1, "bx": -1, "strip_low": 3, "strip_hi": 3
        }]);
        let event = Event::new(1, 1).with_product(&locator(), product);
        let mut out = PrimitiveCollection::new();

        RpcAdapter::rpc(locator()).extract(&event, &mut out).unwrap();
        let record = out.iter().next().unwrap();
        let (_, data) = record.rpc().unwrap();
        assert!(data.valid);
        assert_eq!(data.time, 0);
        assert_eq!(record.bx(), -1);
    }

    #[test]
    fn inverted_strip_range_is_malformed() {
        let event = Event::new(1, 1).with_product(&locator(), json!([cluster(1, 1, 2, 12, 10)]));
        let mut out = PrimitiveCollection::new();

        let err = RpcAdapter::rpc(locator()).extract(&event, &mut out).unwrap_err();
        assert!(err.to_string().contains("strip_low 12"));
    }

    #[test]
    fn cluster_centre_of_huge_strips() {
        let product = json!([
            cluster(1, 1, 2, 2_000_000_000, 2_000_000_000),
            cluster(1, 1, 2, i32::MIN, i32::MAX),
        ]);
        let event = Event::new(1, 1).with_product(&locator(), product);
        let mut out = PrimitiveCollection::new();

        RpcAdapter::rpc(locator()).extract(&event, &mut out).unwrap();
        let strips: Vec<i32> = out.iter().map(|r| r.strip()).collect();
        assert_eq!(strips, vec![2_000_000_000, 0]);
    }
}
