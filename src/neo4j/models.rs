//! Graph models for tools, versions, data slots, formats, and workflows.
//!
//! Every node carries its natural key; composite keys are flattened into a
//! single `id` string so each kind is merged on exactly one property.

use serde::{Deserialize, Serialize};

/// An executable analysis tool, independent of version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolNode {
    pub name: String,
}

/// A specific release of a tool. Never merged without its owning tool's
/// HAS_VERSION edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionNode {
    /// `{tool}:{version}`
    pub id: String,
    pub tool: String,
    pub version: String,
}

impl VersionNode {
    pub fn new(tool: &str, version: &str) -> Self {
        Self {
            id: format!("{tool}:{version}"),
            tool: tool.to_string(),
            version: version.to_string(),
        }
    }
}

/// A named input or output data slot of a tool version. Which of the two it
/// is determines the node label (`ToolInput` / `ToolOutput`) at upsert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSlotNode {
    /// `{tool}:{version}:{slot}`
    pub id: String,
    pub tool: String,
    pub version: String,
    pub name: String,
}

impl ToolSlotNode {
    pub fn new(tool: &str, version: &str, name: &str) -> Self {
        Self {
            id: format!("{tool}:{version}:{name}"),
            tool: tool.to_string(),
            version: version.to_string(),
            name: name.to_string(),
        }
    }

    /// Key of the version node this slot belongs to.
    pub fn version_id(&self) -> String {
        format!("{}:{}", self.tool, self.version)
    }
}

/// A file-format label, optionally mapped to an EDAM ontology format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatatypeNode {
    pub name: String,
    /// EDAM format identifier, e.g. `format_1930`.
    pub edam_format: Option<String>,
}

/// A pipeline identified by its external workflow id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,
}

/// One edge actually used in some real workflow: a producing ToolOutput wired
/// to a consuming ToolInput. Never created standalone: the upsert merges the
/// node together with its IS_CONNECTED_BY, TO_INPUT, and WORKFLOW edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionNode {
    /// `{workflow}:{source slot id}->{target slot id}`
    pub id: String,
    pub workflow_id: String,
    /// Key of the producing ToolOutput node.
    pub source_output: String,
    /// Key of the consuming ToolInput node.
    pub target_input: String,
}

impl ConnectionNode {
    pub fn new(workflow_id: &str, source_output: &str, target_input: &str) -> Self {
        Self {
            id: format!("{workflow_id}:{source_output}->{target_input}"),
            workflow_id: workflow_id.to_string(),
            source_output: source_output.to_string(),
            target_input: target_input.to_string(),
        }
    }
}

/// One resolved workflow connection leaving a tool, as returned by
/// `direct_connections`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConnection {
    pub workflow_id: String,
    pub source_output: String,
    pub target_tool: String,
    pub target_input: String,
}
