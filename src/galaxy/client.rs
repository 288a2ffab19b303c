//! HTTP client for the Galaxy tool API.

use anyhow::{Context, Result};

use super::models::{ToolIoDetails, ToolboxItem};

/// Client for a Galaxy instance's `/api/tools` endpoints.
pub struct GalaxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl GalaxyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The full toolbox listing (sections with their tools).
    pub async fn toolbox(&self) -> Result<Vec<ToolboxItem>> {
        let url = format!("{}/api/tools", self.base_url);
        let items = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch toolbox from {url}"))?
            .error_for_status()
            .with_context(|| format!("Toolbox request to {url} failed"))?
            .json()
            .await
            .context("Failed to parse toolbox response")?;
        Ok(items)
    }

    /// I/O details of one tool. Tool ids from the toolshed contain slashes,
    /// so the id is percent-encoded into the path.
    pub async fn io_details(&self, tool_id: &str) -> Result<ToolIoDetails> {
        let url = format!(
            "{}/api/tools/{}?io_details=True",
            self.base_url,
            urlencoding::encode(tool_id)
        );
        let details = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch io details for tool '{tool_id}'"))?
            .error_for_status()
            .with_context(|| format!("Io details request for tool '{tool_id}' failed"))?
            .json()
            .await
            .with_context(|| format!("Failed to parse io details for tool '{tool_id}'"))?;
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn toolbox_deserializes_sections() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tools"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"model_class": "ToolSection", "id": "align", "name": "Alignment", "elems": [
                    {"model_class": "Tool", "id": "bowtie2", "name": "Bowtie2", "version": "2.2"}
                ]}
            ])))
            .mount(&server)
            .await;

        let client = GalaxyClient::new(&server.uri());
        let toolbox = client.toolbox().await.unwrap();
        assert_eq!(toolbox.len(), 1);
        assert_eq!(toolbox[0].elems[0].id, "bowtie2");
    }

    #[tokio::test]
    async fn io_details_requests_the_io_details_view() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tools/cutadapt"))
            .and(query_param("io_details", "True"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cutadapt", "name": "Cutadapt", "version": "1.16",
                "inputs": [
                    {"model_class": "DataToolParameter", "name": "reads",
                     "extensions": ["fastq"], "edam": {"edam_formats": ["format_1930"]}}
                ],
                "outputs": [
                    {"model_class": "ToolOutput", "name": "out1", "format": "fastq",
                     "edam_format": "format_1930"}
                ]
            })))
            .mount(&server)
            .await;

        let client = GalaxyClient::new(&server.uri());
        let details = client.io_details("cutadapt").await.unwrap();
        assert_eq!(details.version, "1.16");
        assert_eq!(details.input_slots()[0].name, "reads");
        assert_eq!(details.output_slots()[0].formats, vec!["fastq"]);
    }

    #[tokio::test]
    async fn server_error_surfaces_as_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tools"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = GalaxyClient::new(&server.uri());
        assert!(client.toolbox().await.is_err());
    }
}
