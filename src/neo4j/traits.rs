//! GraphStore trait definition
//!
//! Defines the abstract interface for all graph operations the mapper and the
//! CLI perform, enabling testing with a mock implementation and future
//! backend swaps. The mapper only ever talks to this trait, never to a
//! concrete client.

use crate::neo4j::models::*;
use crate::schema::{NodeKind, RelKind};
use anyhow::Result;
use async_trait::async_trait;

/// Abstract interface for the tool/workflow graph store.
///
/// Every upsert is merge-by-natural-key: re-running it with the same input
/// leaves the node/edge set unchanged.
#[async_trait]
pub trait GraphStore: Send + Sync {
    // ========================================================================
    // Upsert operations (emitted by the mapper, in dependency order)
    // ========================================================================

    /// Merge a Tool by name.
    async fn upsert_tool(&self, tool: &ToolNode) -> Result<()>;

    /// Merge a Version together with the HAS_VERSION edge from its tool.
    async fn upsert_version(&self, version: &VersionNode) -> Result<()>;

    /// Merge a Datatype and, when it maps to one, its EDAMFormat with the
    /// IS_OF_FORMAT edge.
    async fn upsert_datatype(&self, datatype: &DatatypeNode) -> Result<()>;

    /// Merge a ToolInput slot with its FEEDS_INTO edge to the version and,
    /// when the datatype is known, its HAS_DATATYPE edge.
    async fn upsert_tool_input(&self, slot: &ToolSlotNode, datatype: Option<&str>) -> Result<()>;

    /// Merge a ToolOutput slot with its GENERATES_OUTPUT edge from the
    /// version and, when the datatype is known, its HAS_DATATYPE edge.
    async fn upsert_tool_output(&self, slot: &ToolSlotNode, datatype: Option<&str>) -> Result<()>;

    /// Merge a Workflow by its external id.
    async fn upsert_workflow(&self, workflow: &WorkflowNode) -> Result<()>;

    /// Merge a WorkflowConnection together with its IS_CONNECTED_BY,
    /// TO_INPUT, and WORKFLOW edges. The referenced slots and workflow must
    /// already exist.
    async fn upsert_connection(&self, connection: &ConnectionNode) -> Result<()>;

    // ========================================================================
    // Query operations (delegated to the graph engine)
    // ========================================================================

    /// Count nodes of one kind.
    async fn count_nodes(&self, kind: NodeKind) -> Result<u64>;

    /// Count relationships of one kind.
    async fn count_relationships(&self, kind: RelKind) -> Result<u64>;

    /// Shortest path between two tools, as the display names of the nodes
    /// along it. `None` when the tools are not connected.
    async fn shortest_path(&self, from_tool: &str, to_tool: &str) -> Result<Option<Vec<String>>>;

    /// Workflow connections whose producing side is the given tool.
    async fn direct_connections(&self, tool: &str) -> Result<Vec<ToolConnection>>;

    /// Delete every node and relationship. Used before a fresh bulk load.
    async fn wipe(&self) -> Result<()>;
}
