//! Galaxy tool API client and TSV export
//!
//! Fetches the toolbox listing and per-tool I/O details from a Galaxy
//! instance and writes the tool-inputs/tool-outputs TSV files the mapper
//! consumes. The mapper itself never talks to the live API.

pub mod client;
pub mod export;
pub mod models;

pub use client::GalaxyClient;
pub use export::{export_tool_io, FetchReport};
pub use models::*;
