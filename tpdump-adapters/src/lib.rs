//! # tpdump-adapters
//!
//! Extraction adapters that pull already-decoded subsystem entries out of an
//! [`Event`] and turn them into trigger primitives.
//!
//! ## Supported Subsystems
//!
//! - **CSC** (`csc` feature) - local charged tracks from the MPC
//! - **RPC / iRPC** (`rpc` feature) - strip clusters, split between classic
//!   RPC chambers and the improved RE3/1 and RE4/1 chambers
//! - **GEM** (`gem` feature) - pad clusters
//! - **ME0** (`me0` feature) - ME0 segments
//! - **DT** (`dt` feature) - phi segments, enriched with the theta view
//!
//! The enabled features form the build-time capability set: a subsystem
//! whose feature is off has no adapter, and activating it is a setup error.
//!
//! ## Quick Start
//!
//! ```rust
//! use tpdump_adapters::{csc::CscAdapter, Collector, Event, Locator};
//! use tpdump_types::SubsystemKind;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let locator: Locator = "simCscTriggerPrimitiveDigis:MPCSORTED".parse()?;
//! let collector = Collector::builder()
//!     .register(CscAdapter::new(locator))
//!     .activate(SubsystemKind::Csc, true)
//!     .build()?;
//!
//! let primitives = collector.aggregate(&Event::new(1, 1))?;
//! assert!(primitives.is_empty());
//! # Ok(())
//! # }
//! ```

mod adapter;
mod collector;
pub mod error;
mod event;

#[cfg(feature = "csc")]
pub mod csc;

#[cfg(feature = "rpc")]
pub mod rpc;

#[cfg(feature = "gem")]
pub mod gem;

#[cfg(feature = "me0")]
pub mod me0;

#[cfg(feature = "dt")]
pub mod dt;

pub use adapter::{AdapterInputs, ExtractionAdapter};
pub use collector::{Collector, CollectorBuilder};
pub use error::{AdapterError, LocatorError, SetupError};
pub use event::{Event, Locator};

// Re-export types for convenience
pub use tpdump_types::{Primitive, PrimitiveCollection, PrimitiveRecord, SubsystemKind};
