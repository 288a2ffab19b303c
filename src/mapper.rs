//! Tool/Workflow record mapper.
//!
//! Translates rows of tabular input into merge operations against the
//! property-graph schema, in dependency order: Tool before Version, Datatype
//! before the slot that references it, Workflow before the connections that
//! belong to it. Every emitted operation is merge-by-natural-key, so loading
//! the same file twice produces the identical node/edge set.

use std::collections::HashSet;
use std::io::BufRead;

use anyhow::Result;

use crate::neo4j::{
    ConnectionNode, DatatypeNode, GraphStore, ToolNode, ToolSlotNode, VersionNode, WorkflowNode,
};
use crate::records::{ConnectionReader, ToolIoReader};

/// Which side of a tool version a tool-I/O file describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoDirection {
    Input,
    Output,
}

/// Counters accumulated over one load pass.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub rows_read: usize,
    /// Rows with an empty required field, dropped without touching the graph.
    pub rows_skipped: usize,
    /// Distinct workflows merged (connection loads only).
    pub workflows: usize,
    /// Connections merged (connection loads only).
    pub connections: usize,
}

/// Maps parsed records onto graph upserts against an explicit store handle.
pub struct Mapper<'a> {
    store: &'a dyn GraphStore,
}

impl<'a> Mapper<'a> {
    pub fn new(store: &'a dyn GraphStore) -> Self {
        Self { store }
    }

    /// Load one tool-inputs or tool-outputs file.
    ///
    /// Per row, in dependency order: Tool, Version (with its HAS_VERSION
    /// edge), Datatype (with its EDAMFormat mapping), then the slot node
    /// linked to both.
    pub async fn load_tool_io<R: BufRead>(
        &self,
        rows: ToolIoReader<R>,
        direction: IoDirection,
    ) -> Result<LoadReport> {
        let mut report = LoadReport::default();

        for row in rows {
            let rec = row?;
            report.rows_read += 1;
            if !rec.is_complete() {
                report.rows_skipped += 1;
                tracing::debug!(?rec, "skipping row with empty required field");
                continue;
            }

            self.store
                .upsert_tool(&ToolNode {
                    name: rec.tool.clone(),
                })
                .await?;
            self.store
                .upsert_version(&VersionNode::new(&rec.tool, &rec.version))
                .await?;
            self.store
                .upsert_datatype(&DatatypeNode {
                    name: rec.datatype.clone(),
                    edam_format: rec.edam_format.clone(),
                })
                .await?;

            let slot = ToolSlotNode::new(&rec.tool, &rec.version, &rec.slot);
            match direction {
                IoDirection::Input => {
                    self.store
                        .upsert_tool_input(&slot, Some(&rec.datatype))
                        .await?
                }
                IoDirection::Output => {
                    self.store
                        .upsert_tool_output(&slot, Some(&rec.datatype))
                        .await?
                }
            }
        }

        tracing::info!(
            rows = report.rows_read,
            skipped = report.rows_skipped,
            "tool I/O load finished"
        );
        Ok(report)
    }

    /// Load one workflow-connections file.
    ///
    /// The input lists one row per connection, not per workflow, so workflow
    /// ids are deduplicated as they stream past: each distinct id merges its
    /// Workflow node once, at first occurrence, before any connection that
    /// references it. Connection endpoints (tools, versions, slots) are
    /// merged on demand; an unseen tool or version is normal, not an error.
    pub async fn load_connections<R: BufRead>(
        &self,
        rows: ConnectionReader<R>,
    ) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        let mut seen_workflows: HashSet<String> = HashSet::new();

        for row in rows {
            let rec = row?;
            report.rows_read += 1;
            if !rec.is_complete() {
                report.rows_skipped += 1;
                tracing::debug!(?rec, "skipping row with empty required field");
                continue;
            }

            if seen_workflows.insert(rec.workflow_id.clone()) {
                self.store
                    .upsert_workflow(&WorkflowNode {
                        id: rec.workflow_id.clone(),
                    })
                    .await?;
                report.workflows += 1;
            }

            self.store
                .upsert_tool(&ToolNode {
                    name: rec.source_tool.clone(),
                })
                .await?;
            self.store
                .upsert_version(&VersionNode::new(&rec.source_tool, &rec.source_version))
                .await?;
            let source = ToolSlotNode::new(&rec.source_tool, &rec.source_version, &rec.source_output);
            self.store.upsert_tool_output(&source, None).await?;

            self.store
                .upsert_tool(&ToolNode {
                    name: rec.target_tool.clone(),
                })
                .await?;
            self.store
                .upsert_version(&VersionNode::new(&rec.target_tool, &rec.target_version))
                .await?;
            let target = ToolSlotNode::new(&rec.target_tool, &rec.target_version, &rec.target_input);
            self.store.upsert_tool_input(&target, None).await?;

            self.store
                .upsert_connection(&ConnectionNode::new(&rec.workflow_id, &source.id, &target.id))
                .await?;
            report.connections += 1;
        }

        tracing::info!(
            rows = report.rows_read,
            skipped = report.rows_skipped,
            workflows = report.workflows,
            connections = report.connections,
            "workflow connection load finished"
        );
        Ok(report)
    }
}
