//! Events and the locators that address products inside them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tpdump_types::SubsystemKind;

use crate::{AdapterError, LocatorError};

/// Address of a product inside an event: `label[:instance[:process]]`.
///
/// Locators are parsed once at setup and reused for every event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    label: String,
    instance: String,
    process: String,
}

impl Locator {
    /// Create a locator with only a label.
    pub fn new(label: impl Into<String>) -> Result<Self, LocatorError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(LocatorError::EmptyLabel(label));
        }
        Ok(Self {
            label,
            instance: String::new(),
            process: String::new(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn process(&self) -> &str {
        &self.process
    }

    /// Canonical key used to look the product up in an event.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Locator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() > 3 {
            return Err(LocatorError::TooManyParts(s.to_string()));
        }
        let mut locator = Locator::new(parts[0])?;
        locator.instance = parts.get(1).copied().unwrap_or_default().to_string();
        locator.process = parts.get(2).copied().unwrap_or_default().to_string();
        Ok(locator)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)?;
        if !self.instance.is_empty() || !self.process.is_empty() {
            write!(f, ":{}", self.instance)?;
        }
        if !self.process.is_empty() {
            write!(f, ":{}", self.process)?;
        }
        Ok(())
    }
}

/// One input batch: the decoded subsystem products of a single event.
///
/// Products are keyed by [`Locator::key`] and hold a JSON array of
/// subsystem-specific entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub run: u64,
    #[serde(default)]
    pub event: u64,
    #[serde(default)]
    pub products: BTreeMap<String, Value>,
}

impl Event {
    pub fn new(run: u64, event: u64) -> Self {
        Self {
            run,
            event,
            products: BTreeMap::new(),
        }
    }

    /// Add a product, builder style.
    pub fn with_product(mut self, locator: &Locator, entries: Value) -> Self {
        self.insert(locator, entries);
        self
    }

    /// Store a product under the given locator, replacing any previous one.
    pub fn insert(&mut self, locator: &Locator, entries: Value) {
        self.products.insert(locator.key(), entries);
    }

    pub fn product(&self, locator: &Locator) -> Option<&Value> {
        self.products.get(&locator.key())
    }

    /// Decode the product under `locator` as a list of entries.
    ///
    /// A missing product decodes to an empty list.
    pub fn decode<T: DeserializeOwned>(
        &self,
        kind: SubsystemKind,
        locator: &Locator,
    ) -> Result<Vec<T>, AdapterError> {
        match self.product(locator) {
            None => Ok(Vec::new()),
            Some(value) => {
                Vec::<T>::deserialize(value).map_err(|e| AdapterError::Malformed {
                    kind,
                    locator: locator.key(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
