//! DT adapter for track segments.
//!
//! DT is the only subsystem with two input products. Phi segments make the
//! primitives; theta segments only enrich them. A phi segment picks up the
//! first theta segment of the same chamber and bunch crossing, and theta
//! segments without a phi partner are dropped.

use serde::Deserialize;
use tpdump_types::{DtChamberId, DtData, Primitive, PrimitiveCollection, PrimitiveRecord, SubsystemKind};

use crate::adapter::Product;
use crate::{AdapterError, AdapterInputs, Event, ExtractionAdapter, Locator};

#[derive(Debug, Deserialize)]
struct RawPhiSegment {
    #[serde(flatten)]
    id: DtChamberId,
    bx: i32,
    bti_group: i32,
    bending_angle: i32,
    quality_code: i32,
}

#[derive(Debug, Deserialize)]
struct RawThetaSegment {
    #[serde(flatten)]
    id: DtChamberId,
    bx: i32,
    bti_group: i32,
    quality: i32,
}

/// Extracts DT phi segments, matched with their theta view.
#[derive(Debug, Clone)]
pub struct DtAdapter {
    inputs: AdapterInputs,
}

impl DtAdapter {
    pub fn new(phi: Locator, theta: Locator) -> Self {
        Self {
            inputs: AdapterInputs::PhiTheta { phi, theta },
        }
    }

    fn check_chamber(product: &Product<'_>, id: &DtChamberId) -> Result<(), AdapterError> {
        product.check("wheel", id.wheel, -2..=2)?;
        product.check("sector", id.sector, 1..=14)?;
        product.check("station", id.station, 1..=4)
    }
}

impl ExtractionAdapter for DtAdapter {
    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Dt
    }

    fn inputs(&self) -> &AdapterInputs {
        &self.inputs
    }

    fn extract(
        &self,
        event: &Event,
        out: &mut PrimitiveCollection,
    ) -> Result<usize, AdapterError> {
        let (phi, theta) = match &self.inputs {
            AdapterInputs::PhiTheta { phi, theta } => (phi, theta),
            AdapterInputs::Single(locator) => (locator, locator),
        };
        let phi_product = Product::new(self.kind(), phi);
        let theta_product = Product::new(self.kind(), theta);

        let phis = phi_product.decode::<RawPhiSegment>(event)?;
        let thetas = theta_product.decode::<RawThetaSegment>(event)?;
        for seg in &thetas {
            Self::check_chamber(&theta_product, &seg.id)?;
        }

        let mut records = Vec::with_capacity(phis.len());
        for seg in phis {
            Self::check_chamber(&phi_product, &seg.id)?;
            let theta = thetas.iter().find(|t| t.id == seg.id && t.bx == seg.bx);
            let data = DtData {
                bti_group: seg.bti_group,
                bending_angle: seg.bending_angle,
                quality_code: seg.quality_code,
                theta_bti_group: theta.map(|t| t.bti_group),
                theta_quality: theta.map(|t| t.quality),
            };
            records.push(PrimitiveRecord::new(
                seg.bx,
                seg.bti_group,
                0,
                Primitive::Dt { id: seg.id, data },
            ));
        }

        let count = records.len();
        for record in records {
            out.push(record);
        }
        Ok(count)
    }
}
