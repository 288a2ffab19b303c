//! In-memory mock implementation of GraphStore for testing.
//!
//! Nodes are key sets per kind and edges are (kind, source key, target key)
//! triples behind `tokio::sync::RwLock`, with the same merge-by-key semantics
//! as the Neo4j client: inserting an existing key is a no-op.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::neo4j::models::*;
use crate::neo4j::traits::GraphStore;
use crate::schema::{NodeKind, RelKind};

/// In-memory mock implementation of GraphStore for testing.
#[derive(Default)]
pub(crate) struct MockGraphStore {
    pub nodes: RwLock<HashMap<NodeKind, HashSet<String>>>,
    pub edges: RwLock<HashSet<(RelKind, String, String)>>,
    pub connections: RwLock<HashMap<String, ConnectionNode>>,
}

impl MockGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn merge_node(&self, kind: NodeKind, key: &str) {
        self.nodes
            .write()
            .await
            .entry(kind)
            .or_default()
            .insert(key.to_string());
    }

    async fn merge_edge(&self, rel: RelKind, src: &str, dst: &str) {
        self.edges
            .write()
            .await
            .insert((rel, src.to_string(), dst.to_string()));
    }

    async fn has_node(&self, kind: NodeKind, key: &str) -> bool {
        self.nodes
            .read()
            .await
            .get(&kind)
            .is_some_and(|keys| keys.contains(key))
    }

    /// Keys of all nodes of one kind, for assertions.
    pub async fn node_keys(&self, kind: NodeKind) -> HashSet<String> {
        self.nodes.read().await.get(&kind).cloned().unwrap_or_default()
    }

    /// (source, target) pairs of all edges of one kind, for assertions.
    pub async fn edge_pairs(&self, rel: RelKind) -> Vec<(String, String)> {
        self.edges
            .read()
            .await
            .iter()
            .filter(|(kind, _, _)| *kind == rel)
            .map(|(_, src, dst)| (src.clone(), dst.clone()))
            .collect()
    }

    /// Total node and edge counts across all kinds, for idempotence checks.
    pub async fn totals(&self) -> (usize, usize) {
        let nodes = self.nodes.read().await.values().map(HashSet::len).sum();
        let edges = self.edges.read().await.len();
        (nodes, edges)
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn upsert_tool(&self, tool: &ToolNode) -> Result<()> {
        self.merge_node(NodeKind::Tool, &tool.name).await;
        Ok(())
    }

    async fn upsert_version(&self, version: &VersionNode) -> Result<()> {
        self.merge_node(NodeKind::Version, &version.id).await;
        self.merge_edge(RelKind::HasVersion, &version.tool, &version.id)
            .await;
        Ok(())
    }

    async fn upsert_datatype(&self, datatype: &DatatypeNode) -> Result<()> {
        self.merge_node(NodeKind::Datatype, &datatype.name).await;
        if let Some(edam) = &datatype.edam_format {
            self.merge_node(NodeKind::EdamFormat, edam).await;
            self.merge_edge(RelKind::IsOfFormat, &datatype.name, edam)
                .await;
        }
        Ok(())
    }

    async fn upsert_tool_input(&self, slot: &ToolSlotNode, datatype: Option<&str>) -> Result<()> {
        self.merge_node(NodeKind::ToolInput, &slot.id).await;
        self.merge_edge(RelKind::FeedsInto, &slot.id, &slot.version_id())
            .await;
        if let Some(datatype) = datatype {
            self.merge_edge(RelKind::HasDatatype, &slot.id, datatype)
                .await;
        }
        Ok(())
    }

    async fn upsert_tool_output(&self, slot: &ToolSlotNode, datatype: Option<&str>) -> Result<()> {
        self.merge_node(NodeKind::ToolOutput, &slot.id).await;
        self.merge_edge(RelKind::GeneratesOutput, &slot.version_id(), &slot.id)
            .await;
        if let Some(datatype) = datatype {
            self.merge_edge(RelKind::HasDatatype, &slot.id, datatype)
                .await;
        }
        Ok(())
    }

    async fn upsert_workflow(&self, workflow: &WorkflowNode) -> Result<()> {
        self.merge_node(NodeKind::Workflow, &workflow.id).await;
        Ok(())
    }

    async fn upsert_connection(&self, connection: &ConnectionNode) -> Result<()> {
        // Mirrors the Cypher MATCH clauses: without its endpoints and its
        // workflow the connection node is not created.
        if !self
            .has_node(NodeKind::ToolOutput, &connection.source_output)
            .await
            || !self.has_node(NodeKind::ToolInput, &connection.target_input).await
            || !self.has_node(NodeKind::Workflow, &connection.workflow_id).await
        {
            return Ok(());
        }

        self.merge_node(NodeKind::WorkflowConnection, &connection.id)
            .await;
        self.merge_edge(RelKind::IsConnectedBy, &connection.source_output, &connection.id)
            .await;
        self.merge_edge(RelKind::ToInput, &connection.id, &connection.target_input)
            .await;
        self.merge_edge(RelKind::Workflow, &connection.id, &connection.workflow_id)
            .await;
        self.connections
            .write()
            .await
            .insert(connection.id.clone(), connection.clone());
        Ok(())
    }

    async fn count_nodes(&self, kind: NodeKind) -> Result<u64> {
        Ok(self.node_keys(kind).await.len() as u64)
    }

    async fn count_relationships(&self, kind: RelKind) -> Result<u64> {
        Ok(self.edge_pairs(kind).await.len() as u64)
    }

    async fn shortest_path(
        &self,
        _from_tool: &str,
        _to_tool: &str,
    ) -> Result<Option<Vec<String>>> {
        // Path queries belong to the graph engine; they are exercised against
        // a live Neo4j in the integration tests.
        Ok(None)
    }

    async fn direct_connections(&self, tool: &str) -> Result<Vec<ToolConnection>> {
        let prefix = format!("{tool}:");
        let connections = self.connections.read().await;
        let mut out = Vec::new();
        for conn in connections.values() {
            if conn.source_output.starts_with(&prefix) {
                let target_tool = conn
                    .target_input
                    .split(':')
                    .next()
                    .unwrap_or_default()
                    .to_string();
                out.push(ToolConnection {
                    workflow_id: conn.workflow_id.clone(),
                    source_output: conn.source_output.clone(),
                    target_tool,
                    target_input: conn.target_input.clone(),
                });
            }
        }
        Ok(out)
    }

    async fn wipe(&self) -> Result<()> {
        self.nodes.write().await.clear();
        self.edges.write().await.clear();
        self.connections.write().await.clear();
        Ok(())
    }
}
