//! Galaxy tool graph
//!
//! Builds a Neo4j property graph of Galaxy tools, their versioned input and
//! output slots, datatypes with EDAM formats, and the workflow connections
//! observed between tools. Metadata is fetched from a Galaxy instance's tool
//! API into TSV files, loaded with merge-by-key semantics so reloads are
//! idempotent, and queried for tool-to-tool paths.

pub mod galaxy;
pub mod mapper;
pub mod neo4j;
pub mod records;
pub mod schema;
