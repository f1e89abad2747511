//! The extraction adapter contract.

use std::fmt::Debug;
use std::ops::RangeInclusive;

use serde::de::DeserializeOwned;
use tpdump_types::{PrimitiveCollection, SubsystemKind};

use crate::{AdapterError, Event, Locator};

/// Where an adapter reads its input from.
///
/// Most subsystems read a single product. DT reads its phi and theta views
/// from two separate products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterInputs {
    Single(Locator),
    PhiTheta { phi: Locator, theta: Locator },
}

impl AdapterInputs {
    /// Every locator, in reading order.
    pub fn locators(&self) -> Vec<&Locator> {
        match self {
            AdapterInputs::Single(locator) => vec![locator],
            AdapterInputs::PhiTheta { phi, theta } => vec![phi, theta],
        }
    }

    /// The main product: the single locator, or the phi view.
    pub fn primary(&self) -> &Locator {
        match self {
            AdapterInputs::Single(locator) => locator,
            AdapterInputs::PhiTheta { phi, .. } => phi,
        }
    }
}

/// Turns one subsystem's event products into trigger primitives.
///
/// Implementations append in the product's native order, never reorder or
/// deduplicate, and never touch records already in `out`. A product that is
/// absent from the event yields no records and no error.
pub trait ExtractionAdapter: Debug {
    /// The subsystem this adapter produces. Every appended record has this kind.
    fn kind(&self) -> SubsystemKind;

    /// The products this adapter reads.
    fn inputs(&self) -> &AdapterInputs;

    /// Append this subsystem's primitives for `event` to `out`.
    ///
    /// Returns the number of records appended.
    fn extract(&self, event: &Event, out: &mut PrimitiveCollection)
        -> Result<usize, AdapterError>;
}

/// Validation helper bound to one adapter and one product.
#[allow(dead_code)]
pub(crate) struct Product<'a> {
    kind: SubsystemKind,
    locator: &'a Locator,
}

#[allow(dead_code)]
impl<'a> Product<'a> {
    pub(crate) fn new(kind: SubsystemKind, locator: &'a Locator) -> Self {
        Self { kind, locator }
    }

    pub(crate) fn decode<T: DeserializeOwned>(&self, event: &Event) -> Result<Vec<T>, AdapterError> {
        event.decode(self.kind, self.locator)
    }

    pub(crate) fn malformed(&self, reason: impl Into<String>) -> AdapterError {
        AdapterError::Malformed {
            kind: self.kind,
            locator: self.locator.key(),
            reason: reason.into(),
        }
    }

    /// Fail unless `value` lies in `range`.
    pub(crate) fn check(
        &self,
        field: &str,
        value: i32,
        range: RangeInclusive<i32>,
    ) -> Result<(), AdapterError> {
        if range.contains(&value) {
            Ok(())
        } else {
            Err(self.malformed(format!(
                "{} {} outside {}..={}",
                field,
                value,
                range.start(),
                range.end()
            )))
        }
    }

    /// Fail unless `value` is -1 or 1.
    pub(crate) fn check_endcap_region(&self, value: i32) -> Result<(), AdapterError> {
        if value == -1 || value == 1 {
            Ok(())
        } else {
            Err(self.malformed(format!("region {} is not -1 or 1", value)))
        }
    }
}
