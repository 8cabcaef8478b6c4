//! HTTP implementation of [`TransferGateway`].
//!
//! Owns a Tokio runtime and exposes blocking methods over `reqwest`, so the
//! rest of the workflow stays synchronous.

use std::path::Path;

use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::runtime::Runtime;

use crate::error::{GatewayError, Result};
use crate::models::{ConnectionConfig, SelectedFile};

use super::{ConnectOutcome, IngestOutcome, JobDescriptor, PreviewRow, TransferGateway, UploadedFile};

/// Blocking HTTP client for the transfer backend.
pub struct HttpGateway {
    /// Tokio runtime for reqwest async operations
    runtime: Runtime,
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct PreviewRequest {
    table: String,
    columns: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    success: bool,
    #[serde(default)]
    message: String,
    file: Option<UploadedFile>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: String,
}

impl HttpGateway {
    /// Create a gateway for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let runtime = Runtime::new()?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("clickbridge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GatewayError::from)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { runtime, client, base_url })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }
}

/// Pull the backend's `{message}` out of a failed response, falling back to
/// the HTTP status when the body carries none.
async fn read_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) if !body.message.is_empty() => body.message,
        _ => format!("server returned {status}"),
    }
}

impl TransferGateway for HttpGateway {
    fn connect(
        &self,
        config: &ConnectionConfig,
    ) -> std::result::Result<ConnectOutcome, GatewayError> {
        let url = self.url("connect");
        let client = self.client.clone();
        let config = config.clone();
        self.runtime.block_on(async move {
            let response = client.post(url).json(&config).send().await?;
            if !response.status().is_success() {
                // The connect contract reports refusal in-band
                let message = read_error_message(response).await;
                return Ok(ConnectOutcome { success: false, message });
            }
            Ok(response.json::<ConnectOutcome>().await?)
        })
    }

    fn preview(
        &self,
        table: &str,
        columns: &[String],
    ) -> std::result::Result<Vec<PreviewRow>, GatewayError> {
        let url = self.url("previewData");
        let client = self.client.clone();
        let request = PreviewRequest { table: table.to_string(), columns: columns.to_vec() };
        self.runtime.block_on(async move {
            let response = client.post(url).json(&request).send().await?;
            if !response.status().is_success() {
                return Err(GatewayError::Preview(read_error_message(response).await));
            }
            Ok(response.json::<Vec<PreviewRow>>().await?)
        })
    }

    fn upload(&self, file: &SelectedFile) -> std::result::Result<UploadedFile, GatewayError> {
        let url = self.url("uploadFile");
        let client = self.client.clone();
        let name = file.name.clone();
        let path = file.path.clone();
        self.runtime.block_on(async move {
            let bytes = tokio::fs::read(&path).await?;
            let response = client
                .post(url)
                .query(&[("filename", name.as_str())])
                .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
                .body(bytes)
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(GatewayError::Upload(read_error_message(response).await));
            }
            let body: UploadResponse = response.json().await?;
            match body.file {
                Some(file) if body.success => Ok(file),
                _ => {
                    let message = if body.message.is_empty() {
                        "upload rejected by server".to_string()
                    } else {
                        body.message
                    };
                    Err(GatewayError::Upload(message))
                }
            }
        })
    }

    fn ingest(&self, job: &JobDescriptor) -> std::result::Result<IngestOutcome, GatewayError> {
        let url = self.url("ingestData");
        let client = self.client.clone();
        let job = job.clone();
        self.runtime.block_on(async move {
            let response = client.post(url).json(&job).send().await?;
            if !response.status().is_success() {
                return Err(GatewayError::Ingest(read_error_message(response).await));
            }
            Ok(response.json::<IngestOutcome>().await?)
        })
    }

    fn download(&self, filename: &str, dest: &Path) -> std::result::Result<u64, GatewayError> {
        let url = self.url("downloadFile");
        let client = self.client.clone();
        let filename = filename.to_string();
        let dest = dest.to_path_buf();
        self.runtime.block_on(async move {
            let response = client.get(url).query(&[("filename", filename.as_str())]).send().await?;
            if !response.status().is_success() {
                return Err(GatewayError::Download(read_error_message(response).await));
            }

            let mut file = tokio::fs::File::create(&dest).await?;
            let mut stream = response.bytes_stream();
            let mut written = 0u64;
            while let Some(chunk) = stream.try_next().await? {
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }
            file.flush().await?;
            Ok(written)
        })
    }
}
