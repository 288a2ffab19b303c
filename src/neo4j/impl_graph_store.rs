//! `GraphStore` implementation for `Neo4jClient`.
//!
//! Every method simply delegates to the corresponding inherent method on `Neo4jClient`.

use async_trait::async_trait;

use super::client::Neo4jClient;
use super::models::*;
use super::traits::GraphStore;
use crate::schema::{NodeKind, RelKind};

#[async_trait]
impl GraphStore for Neo4jClient {
    async fn upsert_tool(&self, tool: &ToolNode) -> anyhow::Result<()> {
        self.upsert_tool(tool).await
    }

    async fn upsert_version(&self, version: &VersionNode) -> anyhow::Result<()> {
        self.upsert_version(version).await
    }

    async fn upsert_datatype(&self, datatype: &DatatypeNode) -> anyhow::Result<()> {
        self.upsert_datatype(datatype).await
    }

    async fn upsert_tool_input(
        &self,
        slot: &ToolSlotNode,
        datatype: Option<&str>,
    ) -> anyhow::Result<()> {
        self.upsert_tool_input(slot, datatype).await
    }

    async fn upsert_tool_output(
        &self,
        slot: &ToolSlotNode,
        datatype: Option<&str>,
    ) -> anyhow::Result<()> {
        self.upsert_tool_output(slot, datatype).await
    }

    async fn upsert_workflow(&self, workflow: &WorkflowNode) -> anyhow::Result<()> {
        self.upsert_workflow(workflow).await
    }

    async fn upsert_connection(&self, connection: &ConnectionNode) -> anyhow::Result<()> {
        self.upsert_connection(connection).await
    }

    async fn count_nodes(&self, kind: NodeKind) -> anyhow::Result<u64> {
        self.count_nodes(kind).await
    }

    async fn count_relationships(&self, kind: RelKind) -> anyhow::Result<u64> {
        self.count_relationships(kind).await
    }

    async fn shortest_path(
        &self,
        from_tool: &str,
        to_tool: &str,
    ) -> anyhow::Result<Option<Vec<String>>> {
        self.shortest_path(from_tool, to_tool).await
    }

    async fn direct_connections(&self, tool: &str) -> anyhow::Result<Vec<ToolConnection>> {
        self.direct_connections(tool).await
    }

    async fn wipe(&self) -> anyhow::Result<()> {
        self.wipe().await
    }
}
