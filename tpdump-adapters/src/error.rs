//! Error types for adapters.

use thiserror::Error;
use tpdump_types::SubsystemKind;

/// Errors raised while extracting primitives from an event.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The event product could not be decoded or holds out-of-range values.
    #[error("{kind}: malformed product '{locator}': {reason}")]
    Malformed {
        kind: SubsystemKind,
        locator: String,
        reason: String,
    },

    /// An adapter broke its contract. This is a programming error.
    #[error("{kind} adapter violated its contract: {detail}")]
    ContractViolation { kind: SubsystemKind, detail: String },
}

impl AdapterError {
    /// The subsystem whose adapter failed.
    pub fn kind(&self) -> SubsystemKind {
        match self {
            AdapterError::Malformed { kind, .. } => *kind,
            AdapterError::ContractViolation { kind, .. } => *kind,
        }
    }

    /// Whether this error is a programming error rather than bad input.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, AdapterError::ContractViolation { .. })
    }
}

/// Errors parsing a locator string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocatorError {
    #[error("locator '{0}' has an empty label")]
    EmptyLabel(String),

    #[error("locator '{0}' has more than three parts")]
    TooManyParts(String),
}

/// Errors building a [`Collector`](crate::Collector).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// The subsystem is active but no adapter was registered, usually because
    /// its cargo feature is disabled.
    #[error("{0} is active but no adapter is registered for it")]
    Unregistered(SubsystemKind),
}
