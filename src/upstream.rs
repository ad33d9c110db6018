//! Client for the media server that owns libraries and scheduled tasks.
//!
//! The dashboard only needs four calls, grouped behind [`MediaServer`] so the
//! page controller can be driven by a fake in tests.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::UpstreamConfig;
use crate::types::{CreateLibraryRequest, LiveTask, VirtualFolder};

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("media server returned {status} for {endpoint}")]
    Status { status: u16, endpoint: String },
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

#[async_trait]
pub trait MediaServer: Send + Sync {
    async fn virtual_folders(&self) -> UpstreamResult<Vec<VirtualFolder>>;

    /// Scheduled tasks, hidden ones excluded.
    async fn live_tasks(&self) -> UpstreamResult<Vec<LiveTask>>;

    async fn start_task(&self, task_id: &str) -> UpstreamResult<()>;

    async fn add_virtual_folder(&self, req: &CreateLibraryRequest) -> UpstreamResult<()>;
}

// -- Request body types --

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct AddVirtualFolderBody<'a> {
    library_options: LibraryOptions<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct LibraryOptions<'a> {
    path_infos: Vec<PathInfo<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PathInfo<'a> {
    path: &'a str,
}

/// Jellyfin-compatible HTTP client.
pub struct JellyfinClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl JellyfinClient {
    pub fn new(cfg: &UpstreamConfig) -> UpstreamResult<Self> {
        let http = reqwest::Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
        Ok(Self {
            base_url: cfg.base_url.trim().trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            http,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            req
        } else {
            req.header("X-Emby-Token", &self.api_key)
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder, endpoint: &str) -> UpstreamResult<reqwest::Response> {
        let resp = self.authorized(req).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { status: status.as_u16(), endpoint: endpoint.to_string() });
        }
        Ok(resp)
    }
}

#[async_trait]
impl MediaServer for JellyfinClient {
    async fn virtual_folders(&self) -> UpstreamResult<Vec<VirtualFolder>> {
        let endpoint = "/Library/VirtualFolders";
        let resp = self.send(self.http.get(self.url(endpoint)), endpoint).await?;
        Ok(resp.json().await?)
    }

    async fn live_tasks(&self) -> UpstreamResult<Vec<LiveTask>> {
        let endpoint = "/ScheduledTasks";
        let req = self.http.get(self.url(endpoint)).query(&[("isHidden", "false")]);
        let resp = self.send(req, endpoint).await?;
        Ok(resp.json().await?)
    }

    async fn start_task(&self, task_id: &str) -> UpstreamResult<()> {
        let endpoint = format!("/ScheduledTasks/Running/{}", task_id);
        self.send(self.http.post(self.url(&endpoint)), &endpoint).await?;
        Ok(())
    }

    async fn add_virtual_folder(&self, req: &CreateLibraryRequest) -> UpstreamResult<()> {
        let endpoint = "/Library/VirtualFolders";
        let body = AddVirtualFolderBody {
            library_options: LibraryOptions {
                path_infos: req.paths.iter().map(|p| PathInfo { path: p.as_str() }).collect(),
            },
        };
        let http_req = self
            .http
            .post(self.url(endpoint))
            .query(&[
                ("name", req.name.as_str()),
                ("collectionType", req.collection_type.as_param()),
                ("refreshLibrary", "true"),
            ])
            .json(&body);
        self.send(http_req, endpoint).await?;
        Ok(())
    }
}
