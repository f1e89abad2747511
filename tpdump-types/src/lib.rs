//! # tpdump-types
//!
//! Core types for muon trigger primitives. A trigger primitive is the compact
//! per-chamber record (timing, position and quality) that a muon subsystem's
//! front-end logic hands to the trigger. Every subsystem describes its
//! chambers and measurements differently, so this crate keeps one identifier
//! shape and one payload shape per subsystem and ties them together in a
//! single closed sum type.
//!
//! ## Design Goals
//!
//! - **Closed set**: [`SubsystemKind`] never grows at runtime, and every
//!   consumer matches on it exhaustively
//! - **No mismatches**: a [`PrimitiveRecord`] stores its identifier and payload
//!   inside one [`Primitive`] variant, so the kind can never disagree with them
//! - **Optional serialization**: enable the `serde` feature to (de)serialize
//!   identifiers and payloads
//!
//! ## Example
//!
//! ```rust
//! use tpdump_types::{CscData, CscDetId, Primitive, PrimitiveCollection, PrimitiveRecord, SubsystemKind};
//!
//! let id = CscDetId { endcap: 1, sector: 3, station: 1, ring: 2, chamber: 5 };
//! let data = CscData { csc_id: 10, bend: -2, quality: 4, pattern: 7 };
//!
//! let mut collection = PrimitiveCollection::new();
//! collection.push(PrimitiveRecord::new(0, 20, 3, Primitive::Csc { id, data }));
//!
//! assert_eq!(collection.len(), 1);
//! assert_eq!(collection.count_of(SubsystemKind::Csc), 1);
//! ```

mod collection;
mod data;
mod detid;
mod kind;
mod primitive;

pub use collection::*;
pub use data::*;
pub use detid::*;
pub use kind::*;
pub use primitive::*;
