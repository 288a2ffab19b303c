//! Tabular input parsing for tool I/O and workflow-connection files.
//!
//! Input files are tab-separated with a header row. Column order is never
//! assumed: each semantic [`Role`] is resolved against the actual header via
//! a [`ColumnSpec`], and a missing expected column rejects the whole file
//! before any row is processed.

mod header;
mod reader;

pub use header::HeaderMap;
pub use reader::{ConnectionReader, ToolIoReader};

use thiserror::Error;

/// Semantic role of a column in an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    // Tool I/O files
    Tool,
    Version,
    Slot,
    Datatype,
    EdamFormat,
    // Workflow-connection files
    WorkflowId,
    SourceTool,
    SourceVersion,
    SourceOutput,
    TargetTool,
    TargetVersion,
    TargetInput,
}

/// Mapping from semantic roles to the header names expected in a file.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub columns: Vec<(Role, String)>,
}

impl ColumnSpec {
    /// Expected columns of a tool-inputs or tool-outputs file.
    pub fn tool_io() -> Self {
        Self {
            columns: vec![
                (Role::Tool, "tool".into()),
                (Role::Version, "version".into()),
                (Role::Slot, "slot".into()),
                (Role::Datatype, "datatype".into()),
                (Role::EdamFormat, "edam_format".into()),
            ],
        }
    }

    /// Expected columns of a workflow-connections file.
    ///
    /// Column names follow the Galaxy workflow-connections export, where
    /// `in_tool` is the producing side of the edge.
    pub fn connections() -> Self {
        Self {
            columns: vec![
                (Role::WorkflowId, "wf_id".into()),
                (Role::SourceTool, "in_tool".into()),
                (Role::SourceVersion, "in_tool_version".into()),
                (Role::SourceOutput, "tool_outputs".into()),
                (Role::TargetTool, "out_tool".into()),
                (Role::TargetVersion, "out_tool_version".into()),
                (Role::TargetInput, "tool_inputs".into()),
            ],
        }
    }
}

/// Errors raised while reading a tabular input file.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The header row lacks a column the spec requires. Fails the whole file.
    #[error("{file}: missing required column '{column}' ({role:?})")]
    MissingColumn {
        file: String,
        column: String,
        role: Role,
    },

    /// The file is empty (no header row).
    #[error("{file}: empty file, expected a header row")]
    EmptyFile { file: String },

    /// A data row has fewer fields than the header references.
    #[error("{file}:{line}: row has {found} fields, header requires at least {required}")]
    ShortRow {
        file: String,
        line: usize,
        found: usize,
        required: usize,
    },

    #[error("{file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// One parsed row of a tool-inputs or tool-outputs file.
///
/// Fields are trimmed. Empty required fields are not an error here; the
/// mapper skips such rows and counts them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolIoRecord {
    pub tool: String,
    pub version: String,
    pub slot: String,
    pub datatype: String,
    pub edam_format: Option<String>,
}

impl ToolIoRecord {
    pub(crate) fn from_row(header: &HeaderMap, fields: &[String]) -> Self {
        let get = |role| header.field(fields, role).trim().to_string();
        let edam = get(Role::EdamFormat);
        Self {
            tool: get(Role::Tool),
            version: get(Role::Version),
            slot: get(Role::Slot),
            datatype: get(Role::Datatype),
            edam_format: if edam.is_empty() { None } else { Some(edam) },
        }
    }

    /// Whether every field the graph needs is present.
    pub fn is_complete(&self) -> bool {
        !self.tool.is_empty()
            && !self.version.is_empty()
            && !self.slot.is_empty()
            && !self.datatype.is_empty()
    }
}

/// One parsed row of a workflow-connections file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub workflow_id: String,
    pub source_tool: String,
    pub source_version: String,
    pub source_output: String,
    pub target_tool: String,
    pub target_version: String,
    pub target_input: String,
}

impl ConnectionRecord {
    pub(crate) fn from_row(header: &HeaderMap, fields: &[String]) -> Self {
        let get = |role| header.field(fields, role).trim().to_string();
        Self {
            workflow_id: get(Role::WorkflowId),
            source_tool: get(Role::SourceTool),
            source_version: get(Role::SourceVersion),
            source_output: get(Role::SourceOutput),
            target_tool: get(Role::TargetTool),
            target_version: get(Role::TargetVersion),
            target_input: get(Role::TargetInput),
        }
    }

    /// Whether every field the graph needs is present.
    pub fn is_complete(&self) -> bool {
        !self.workflow_id.is_empty()
            && !self.source_tool.is_empty()
            && !self.source_version.is_empty()
            && !self.source_output.is_empty()
            && !self.target_tool.is_empty()
            && !self.target_version.is_empty()
            && !self.target_input.is_empty()
    }
}
