//! Export of fetched tool metadata into the loader's TSV layout.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::client::GalaxyClient;
use super::models::{flatten_tools, IoSlot};

/// Counters from one export run.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchReport {
    pub tools: usize,
    pub input_rows: usize,
    pub output_rows: usize,
    pub failures: usize,
}

/// Fetches I/O details for every tool in the toolbox and writes
/// `tool_inputs.tsv` and `tool_outputs.tsv` under `out_dir`.
///
/// One row per slot and accepted datatype. Tools whose detail fetch fails
/// are skipped and counted; a failed toolbox fetch aborts the run.
pub async fn export_tool_io(
    client: &GalaxyClient,
    out_dir: &Path,
    limit: Option<usize>,
) -> Result<FetchReport> {
    let toolbox = client.toolbox().await?;
    let tools = flatten_tools(&toolbox);
    let total = limit.map_or(tools.len(), |n| n.min(tools.len()));
    tracing::info!(tools = total, "fetching tool io details");

    let mut inputs = tsv_writer(&out_dir.join("tool_inputs.tsv"))?;
    let mut outputs = tsv_writer(&out_dir.join("tool_outputs.tsv"))?;

    let mut report = FetchReport {
        tools: total,
        ..FetchReport::default()
    };
    for tool in tools.into_iter().take(total) {
        let details = match client.io_details(&tool.id).await {
            Ok(details) => details,
            Err(error) => {
                tracing::warn!(tool = %tool.id, %error, "skipping tool, io details fetch failed");
                report.failures += 1;
                continue;
            }
        };
        report.input_rows += write_slots(
            &mut inputs,
            &details.name,
            &details.version,
            &details.input_slots(),
        )?;
        report.output_rows += write_slots(
            &mut outputs,
            &details.name,
            &details.version,
            &details.output_slots(),
        )?;
    }

    inputs.flush().context("Failed to flush tool_inputs.tsv")?;
    outputs.flush().context("Failed to flush tool_outputs.tsv")?;
    Ok(report)
}

fn tsv_writer(path: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "tool\tversion\tslot\tdatatype\tedam_format")
        .with_context(|| format!("Failed to write header to {}", path.display()))?;
    Ok(writer)
}

fn write_slots(
    writer: &mut impl Write,
    tool: &str,
    version: &str,
    slots: &[IoSlot],
) -> Result<usize> {
    let mut rows = 0;
    for slot in slots {
        for (i, format) in slot.formats.iter().enumerate() {
            // edam_formats runs parallel to the extension list; a missing
            // entry leaves the column empty.
            let edam = slot.edam_formats.get(i).map_or("", String::as_str);
            writeln!(writer, "{tool}\t{version}\t{}\t{format}\t{edam}", slot.name)
                .context("Failed to write tsv row")?;
            rows += 1;
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn export_writes_one_row_per_slot_and_datatype() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tools"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"model_class": "Tool", "id": "cutadapt", "name": "Cutadapt", "version": "1.16"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/tools/cutadapt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cutadapt", "name": "Cutadapt", "version": "1.16",
                "inputs": [
                    {"model_class": "DataToolParameter", "name": "reads",
                     "extensions": ["fastq", "fastq.gz"],
                     "edam": {"edam_formats": ["format_1930"]}}
                ],
                "outputs": [
                    {"model_class": "ToolOutput", "name": "out1", "format": "fastq",
                     "edam_format": "format_1930"}
                ]
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = GalaxyClient::new(&server.uri());
        let report = export_tool_io(&client, dir.path(), None).await.unwrap();
        assert_eq!(report.tools, 1);
        assert_eq!(report.input_rows, 2);
        assert_eq!(report.output_rows, 1);
        assert_eq!(report.failures, 0);

        let inputs = std::fs::read_to_string(dir.path().join("tool_inputs.tsv")).unwrap();
        let lines: Vec<&str> = inputs.lines().collect();
        assert_eq!(lines[0], "tool\tversion\tslot\tdatatype\tedam_format");
        assert_eq!(lines[1], "Cutadapt\t1.16\treads\tfastq\tformat_1930");
        // second extension has no parallel edam entry
        assert_eq!(lines[2], "Cutadapt\t1.16\treads\tfastq.gz\t");

        let outputs = std::fs::read_to_string(dir.path().join("tool_outputs.tsv")).unwrap();
        assert_eq!(
            outputs.lines().nth(1).unwrap(),
            "Cutadapt\t1.16\tout1\tfastq\tformat_1930"
        );
    }

    #[tokio::test]
    async fn failed_tool_is_counted_and_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tools"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"model_class": "Tool", "id": "broken", "name": "Broken", "version": "1"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/tools/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = GalaxyClient::new(&server.uri());
        let report = export_tool_io(&client, dir.path(), None).await.unwrap();
        assert_eq!(report.failures, 1);
        assert_eq!(report.input_rows, 0);
    }

    #[tokio::test]
    async fn limit_caps_the_number_of_tools_fetched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tools"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"model_class": "Tool", "id": "a", "name": "A", "version": "1"},
                {"model_class": "Tool", "id": "b", "name": "B", "version": "1"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/tools/a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "a", "name": "A", "version": "1", "inputs": [], "outputs": []
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = GalaxyClient::new(&server.uri());
        let report = export_tool_io(&client, dir.path(), Some(1)).await.unwrap();
        assert_eq!(report.tools, 1);
        assert_eq!(report.failures, 0);
    }
}
