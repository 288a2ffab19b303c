//! Declarative property-graph schema for the tool/workflow graph.
//!
//! Node labels, relationship types, and merge keys live in these two tables
//! instead of being scattered through the Cypher-building code. The Neo4j
//! client derives its uniqueness constraints and its generic merge queries
//! from them, so the upsert logic stays reusable if the schema grows.

/// A node kind in the tool/workflow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An executable analysis tool, independent of version.
    Tool,
    /// A specific release of a tool.
    Version,
    /// A named data slot consumed by a tool version.
    ToolInput,
    /// A named data slot produced by a tool version.
    ToolOutput,
    /// A file-format label ("tabular", "bam", ...).
    Datatype,
    /// An EDAM ontology format identifier.
    EdamFormat,
    /// A pipeline composed of tool connections.
    Workflow,
    /// One edge in a workflow, linking a producing output to a consuming input.
    WorkflowConnection,
}

impl NodeKind {
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Tool,
        NodeKind::Version,
        NodeKind::ToolInput,
        NodeKind::ToolOutput,
        NodeKind::Datatype,
        NodeKind::EdamFormat,
        NodeKind::Workflow,
        NodeKind::WorkflowConnection,
    ];

    /// Neo4j label for this node kind.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Tool => "Tool",
            NodeKind::Version => "Version",
            NodeKind::ToolInput => "ToolInput",
            NodeKind::ToolOutput => "ToolOutput",
            NodeKind::Datatype => "Datatype",
            NodeKind::EdamFormat => "EDAMFormat",
            NodeKind::Workflow => "Workflow",
            NodeKind::WorkflowConnection => "WorkflowConnection",
        }
    }

    /// The single natural-key property this kind is merged on.
    pub fn key_property(&self) -> &'static str {
        match self {
            NodeKind::Tool | NodeKind::Datatype => "name",
            NodeKind::Version
            | NodeKind::ToolInput
            | NodeKind::ToolOutput
            | NodeKind::EdamFormat
            | NodeKind::Workflow
            | NodeKind::WorkflowConnection => "id",
        }
    }
}

/// A relationship kind in the tool/workflow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelKind {
    /// Tool -> Version
    HasVersion,
    /// Version -> ToolOutput
    GeneratesOutput,
    /// ToolInput -> Version
    FeedsInto,
    /// ToolOutput -> WorkflowConnection
    IsConnectedBy,
    /// WorkflowConnection -> ToolInput
    ToInput,
    /// WorkflowConnection -> Workflow
    Workflow,
    /// ToolInput|ToolOutput -> Datatype
    HasDatatype,
    /// Datatype -> EDAMFormat
    IsOfFormat,
}

impl RelKind {
    pub const ALL: [RelKind; 8] = [
        RelKind::HasVersion,
        RelKind::GeneratesOutput,
        RelKind::FeedsInto,
        RelKind::IsConnectedBy,
        RelKind::ToInput,
        RelKind::Workflow,
        RelKind::HasDatatype,
        RelKind::IsOfFormat,
    ];

    /// Cypher relationship type.
    pub fn type_name(&self) -> &'static str {
        match self {
            RelKind::HasVersion => "HAS_VERSION",
            RelKind::GeneratesOutput => "GENERATES_OUTPUT",
            RelKind::FeedsInto => "FEEDS_INTO",
            RelKind::IsConnectedBy => "IS_CONNECTED_BY",
            RelKind::ToInput => "TO_INPUT",
            RelKind::Workflow => "WORKFLOW",
            RelKind::HasDatatype => "HAS_DATATYPE",
            RelKind::IsOfFormat => "IS_OF_FORMAT",
        }
    }

    /// Allowed source kinds and the single target kind of this relationship.
    pub fn endpoints(&self) -> (&'static [NodeKind], NodeKind) {
        match self {
            RelKind::HasVersion => (&[NodeKind::Tool], NodeKind::Version),
            RelKind::GeneratesOutput => (&[NodeKind::Version], NodeKind::ToolOutput),
            RelKind::FeedsInto => (&[NodeKind::ToolInput], NodeKind::Version),
            RelKind::IsConnectedBy => (&[NodeKind::ToolOutput], NodeKind::WorkflowConnection),
            RelKind::ToInput => (&[NodeKind::WorkflowConnection], NodeKind::ToolInput),
            RelKind::Workflow => (&[NodeKind::WorkflowConnection], NodeKind::Workflow),
            RelKind::HasDatatype => (
                &[NodeKind::ToolInput, NodeKind::ToolOutput],
                NodeKind::Datatype,
            ),
            RelKind::IsOfFormat => (&[NodeKind::Datatype], NodeKind::EdamFormat),
        }
    }
}
