//! Data layer: instrument file readers, normalized model, classification.
//!
//! Architecture:
//! ```text
//!  .csv / .txt / .dta / .mpt
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  pick reader by extension → ParsedData
//!   └──────────┘
//!        │  (delimited / gamry / biologic)
//!        ▼
//!   ┌────────────┐
//!   │ ParsedData  │  columns + rows, units, metadata
//!   └────────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ technique  │  first-match rule table → Technique
//!   └───────────┘
//! ```

pub mod biologic;
pub mod columns;
pub mod delimited;
pub mod export;
pub mod gamry;
pub mod loader;
pub mod model;
pub mod technique;
pub mod units;

pub use loader::{load_file, parse_file, FormatReader, LoadError, RawFile};
pub use model::{Cell, DataTable, Instrument, MetadataValue, ParsedData, Technique};
