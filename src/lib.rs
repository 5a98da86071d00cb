//! Electrochemistry data ingestion and analysis.
//!
//! * [`data`] reads instrument files (generic CSV/TXT, Gamry `.dta`,
//!   BioLogic `.mpt`) into a normalized [`data::ParsedData`] and tags it
//!   with the detected technique.
//! * [`plotting`] turns a dataset into declarative plot configs (CV,
//!   Nyquist, Bode, battery cycling, generic XY).
//! * [`analysis`] fits regression models, computes statistics and finds
//!   peaks on numeric columns.
//!
//! Every call is a pure function of its inputs, so any of them can run
//! concurrently without coordination.

pub mod analysis;
pub mod data;
pub mod plotting;
pub mod settings;
