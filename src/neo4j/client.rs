//! Neo4j client for the tool/workflow graph
//!
//! All upserts go through two generic helpers that build parameterized MERGE
//! queries from the declarative schema tables; node labels and relationship
//! types are never assembled from user data.

use super::models::*;
use crate::schema::{NodeKind, RelKind};
use anyhow::{Context, Result};
use neo4rs::{query, Graph};
use std::sync::Arc;

/// Client for Neo4j operations
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

impl Neo4jClient {
    /// Connect and initialize the schema constraints.
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .context("Failed to connect to Neo4j")?;

        let client = Self {
            graph: Arc::new(graph),
        };
        client.init_schema().await?;
        Ok(client)
    }

    /// Create a uniqueness constraint on the natural key of every node kind.
    async fn init_schema(&self) -> Result<()> {
        for kind in NodeKind::ALL {
            let constraint = format!(
                "CREATE CONSTRAINT {}_{}_key IF NOT EXISTS FOR (n:{}) REQUIRE n.{} IS UNIQUE",
                kind.label().to_lowercase(),
                kind.key_property(),
                kind.label(),
                kind.key_property(),
            );
            if let Err(e) = self.graph.run(query(&constraint)).await {
                tracing::warn!("Constraint may already exist: {}", e);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Generic merge helpers (schema-table driven)
    // ========================================================================

    /// MERGE a node on its natural key, setting the given extra properties.
    async fn merge_node(&self, kind: NodeKind, key: &str, props: &[(&str, &str)]) -> Result<()> {
        let mut text = format!(
            "MERGE (n:{} {{{}: $key}})",
            kind.label(),
            kind.key_property()
        );
        if !props.is_empty() {
            let assignments: Vec<String> = props
                .iter()
                .enumerate()
                .map(|(i, (name, _))| format!("n.{name} = $p{i}"))
                .collect();
            text.push_str(" SET ");
            text.push_str(&assignments.join(", "));
        }

        let mut q = query(&text).param("key", key);
        for (i, (_, value)) in props.iter().enumerate() {
            q = q.param(&format!("p{i}"), *value);
        }
        self.graph.run(q).await?;
        Ok(())
    }

    /// MERGE a relationship between two existing nodes, matched by key.
    async fn merge_link(
        &self,
        rel: RelKind,
        src: NodeKind,
        src_key: &str,
        dst_key: &str,
    ) -> Result<()> {
        let (allowed_sources, dst) = rel.endpoints();
        debug_assert!(
            allowed_sources.contains(&src),
            "{src:?} is not a valid source for {rel:?}"
        );

        let text = format!(
            "MATCH (a:{} {{{}: $src}}) MATCH (b:{} {{{}: $dst}}) MERGE (a)-[:{}]->(b)",
            src.label(),
            src.key_property(),
            dst.label(),
            dst.key_property(),
            rel.type_name(),
        );
        let q = query(&text).param("src", src_key).param("dst", dst_key);
        self.graph.run(q).await?;
        Ok(())
    }

    /// Shared body of the two slot upserts.
    async fn upsert_slot(
        &self,
        kind: NodeKind,
        version_link: RelKind,
        slot: &ToolSlotNode,
        datatype: Option<&str>,
    ) -> Result<()> {
        self.merge_node(
            kind,
            &slot.id,
            &[
                ("tool", &slot.tool),
                ("version", &slot.version),
                ("name", &slot.name),
            ],
        )
        .await?;

        let version_id = slot.version_id();
        match version_link {
            // Version -GENERATES_OUTPUT-> ToolOutput
            RelKind::GeneratesOutput => {
                self.merge_link(version_link, NodeKind::Version, &version_id, &slot.id)
                    .await?
            }
            // ToolInput -FEEDS_INTO-> Version
            _ => {
                self.merge_link(version_link, kind, &slot.id, &version_id)
                    .await?
            }
        }

        if let Some(datatype) = datatype {
            self.merge_link(RelKind::HasDatatype, kind, &slot.id, datatype)
                .await?;
        }
        Ok(())
    }

    // ========================================================================
    // Upsert operations
    // ========================================================================

    /// Merge a Tool by name.
    pub async fn upsert_tool(&self, tool: &ToolNode) -> Result<()> {
        self.merge_node(NodeKind::Tool, &tool.name, &[]).await
    }

    /// Merge a Version together with the HAS_VERSION edge from its tool.
    pub async fn upsert_version(&self, version: &VersionNode) -> Result<()> {
        self.merge_node(
            NodeKind::Version,
            &version.id,
            &[("tool", &version.tool), ("version", &version.version)],
        )
        .await?;
        self.merge_link(
            RelKind::HasVersion,
            NodeKind::Tool,
            &version.tool,
            &version.id,
        )
        .await
    }

    /// Merge a Datatype and its EDAMFormat mapping when present.
    pub async fn upsert_datatype(&self, datatype: &DatatypeNode) -> Result<()> {
        self.merge_node(NodeKind::Datatype, &datatype.name, &[]).await?;
        if let Some(edam) = &datatype.edam_format {
            self.merge_node(NodeKind::EdamFormat, edam, &[]).await?;
            self.merge_link(RelKind::IsOfFormat, NodeKind::Datatype, &datatype.name, edam)
                .await?;
        }
        Ok(())
    }

    /// Merge a ToolInput slot with its FEEDS_INTO and HAS_DATATYPE edges.
    pub async fn upsert_tool_input(
        &self,
        slot: &ToolSlotNode,
        datatype: Option<&str>,
    ) -> Result<()> {
        self.upsert_slot(NodeKind::ToolInput, RelKind::FeedsInto, slot, datatype)
            .await
    }

    /// Merge a ToolOutput slot with its GENERATES_OUTPUT and HAS_DATATYPE edges.
    pub async fn upsert_tool_output(
        &self,
        slot: &ToolSlotNode,
        datatype: Option<&str>,
    ) -> Result<()> {
        self.upsert_slot(NodeKind::ToolOutput, RelKind::GeneratesOutput, slot, datatype)
            .await
    }

    /// Merge a Workflow by its external id.
    pub async fn upsert_workflow(&self, workflow: &WorkflowNode) -> Result<()> {
        self.merge_node(NodeKind::Workflow, &workflow.id, &[]).await
    }

    /// Merge a WorkflowConnection with its three edges. One round trip so the
    /// connection node can never exist without them.
    pub async fn upsert_connection(&self, connection: &ConnectionNode) -> Result<()> {
        let q = query(
            r#"
            MATCH (o:ToolOutput {id: $source_output})
            MATCH (i:ToolInput {id: $target_input})
            MATCH (w:Workflow {id: $workflow_id})
            MERGE (c:WorkflowConnection {id: $id})
            SET c.workflow_id = $workflow_id
            MERGE (o)-[:IS_CONNECTED_BY]->(c)
            MERGE (c)-[:TO_INPUT]->(i)
            MERGE (c)-[:WORKFLOW]->(w)
            "#,
        )
        .param("id", connection.id.clone())
        .param("workflow_id", connection.workflow_id.clone())
        .param("source_output", connection.source_output.clone())
        .param("target_input", connection.target_input.clone());

        self.graph.run(q).await?;
        Ok(())
    }

    // ========================================================================
    // Query operations
    // ========================================================================

    /// Count nodes of one kind.
    pub async fn count_nodes(&self, kind: NodeKind) -> Result<u64> {
        let text = format!("MATCH (n:{}) RETURN count(n) AS count", kind.label());
        let mut result = self.graph.execute(query(&text)).await?;
        match result.next().await? {
            Some(row) => Ok(row.get::<i64>("count")? as u64),
            None => Ok(0),
        }
    }

    /// Count relationships of one kind.
    pub async fn count_relationships(&self, kind: RelKind) -> Result<u64> {
        let text = format!(
            "MATCH ()-[r:{}]->() RETURN count(r) AS count",
            kind.type_name()
        );
        let mut result = self.graph.execute(query(&text)).await?;
        match result.next().await? {
            Some(row) => Ok(row.get::<i64>("count")? as u64),
            None => Ok(0),
        }
    }

    /// Shortest path between two tools, ignoring edge direction the way the
    /// graph is actually wired (outputs and inputs point at versions).
    pub async fn shortest_path(
        &self,
        from_tool: &str,
        to_tool: &str,
    ) -> Result<Option<Vec<String>>> {
        let q = query(
            r#"
            MATCH (a:Tool {name: $from}), (b:Tool {name: $to}),
                  p = shortestPath((a)-[*]-(b))
            RETURN [n IN nodes(p) | head(labels(n)) + ':' + coalesce(n.name, n.id)] AS path
            "#,
        )
        .param("from", from_tool)
        .param("to", to_tool);

        let mut result = self.graph.execute(q).await?;
        match result.next().await? {
            Some(row) => Ok(Some(row.get::<Vec<String>>("path")?)),
            None => Ok(None),
        }
    }

    /// Workflow connections whose producing side is the given tool.
    pub async fn direct_connections(&self, tool: &str) -> Result<Vec<ToolConnection>> {
        let q = query(
            r#"
            MATCH (t:Tool {name: $tool})-[:HAS_VERSION]->(:Version)
                  -[:GENERATES_OUTPUT]->(o:ToolOutput)
                  -[:IS_CONNECTED_BY]->(c:WorkflowConnection)-[:TO_INPUT]->(i:ToolInput)
            MATCH (c)-[:WORKFLOW]->(w:Workflow)
            MATCH (i)-[:FEEDS_INTO]->(:Version)<-[:HAS_VERSION]-(t2:Tool)
            RETURN w.id AS workflow_id, o.name AS source_output,
                   t2.name AS target_tool, i.name AS target_input
            ORDER BY workflow_id, target_tool
            "#,
        )
        .param("tool", tool);

        let mut result = self.graph.execute(q).await?;
        let mut connections = Vec::new();
        while let Some(row) = result.next().await? {
            connections.push(ToolConnection {
                workflow_id: row.get("workflow_id")?,
                source_output: row.get("source_output")?,
                target_tool: row.get("target_tool")?,
                target_input: row.get("target_input")?,
            });
        }
        Ok(connections)
    }

    /// Delete every node and relationship.
    pub async fn wipe(&self) -> Result<()> {
        self.graph.run(query("MATCH (n) DETACH DELETE n")).await?;
        Ok(())
    }
}
