//! # tpdump
//!
//! Aggregates muon trigger primitives from every detector subsystem into one
//! ordered collection and dumps them as diagnostic text, one line per
//! primitive.
//!
//! ## Architecture
//!
//! ```text
//!               Settings (defaults, TOML, TPDUMP_*)
//!                   │
//!                   ▼
//! ┌──────────┐   ┌─────────────────────┐   ┌──────────┐   ┌────────┐
//! │  source  │──▶│ Collector           │──▶│ Renderer │──▶│  sink  │
//! │ (events) │   │ CSC RPC iRPC GEM    │   │ (lines)  │   │        │
//! │          │   │ ME0 DT              │   │          │   │        │
//! └──────────┘   └─────────────────────┘   └──────────┘   └────────┘
//! ```
//!
//! - **[`source`]**: event input ([`EventSource`] trait) from JSON Lines
//!   files, arbitrary readers or memory
//! - **[`config`]**: input locators, subsystem activation and render style,
//!   layered from defaults, a TOML file and the environment
//! - **[`render`]**: the per-subsystem line layouts
//! - **[`report`]**: the [`Reporter`] that runs one all-or-nothing pass per event
//!
//! Extraction itself lives in `tpdump-adapters`, the record types in
//! `tpdump-types`.
//!
//! ## Usage
//!
//! ```bash
//! # Dump CSC primitives (the default) from a JSON Lines event file
//! tpdump --events events.jsonl
//!
//! # Turn on RPC as well, printing raw regions
//! TPDUMP_USERPC=true TPDUMP_RPCREGIONSTYLE=region tpdump --events events.jsonl
//!
//! # Show every option with its default
//! tpdump --describe
//! ```
//!
//! ### As a library
//!
//! ```
//! use tpdump::{Reporter, Settings, VecSource};
//! use tpdump_adapters::Event;
//!
//! let reporter = Reporter::from_settings(&Settings::default()).unwrap();
//! let mut source = VecSource::new(vec![Event::new(1, 1)]);
//! let mut out = Vec::new();
//!
//! let summary = reporter.run(&mut source, &mut out, None).unwrap();
//! assert_eq!(summary.processed, 1);
//! assert_eq!(String::from_utf8(out).unwrap(), "# of TPs: 0\n");
//! ```

pub mod config;
pub mod render;
pub mod report;
pub mod source;

// Re-export main types for convenience
pub use config::{ConfigError, Settings};
pub use render::{RegionStyle, RenderOptions, Renderer};
pub use report::{ReportError, Reporter, RunSummary};
pub use source::{EventSource, FileSource, SourceError, StreamSource, VecSource};
