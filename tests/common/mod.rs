//! In-memory collaborators that record every call

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

use workspace_icons::collaborators::{LogoUrlResolver, WorkspaceImageReader};
use workspace_icons::errors::{CollaboratorError, CollaboratorResult};

#[derive(Default)]
pub struct FakeReader {
    files: HashMap<(String, String), String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, workspace_id: &str, path: &str, content: &str) -> Self {
        self.files.insert(
            (workspace_id.to_string(), path.to_string()),
            content.to_string(),
        );
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl WorkspaceImageReader for FakeReader {
    async fn read_workspace_image(
        &self,
        workspace_id: &str,
        relative_path: &str,
    ) -> CollaboratorResult<String> {
        self.calls
            .lock()
            .push((workspace_id.to_string(), relative_path.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.files
            .get(&(workspace_id.to_string(), relative_path.to_string()))
            .cloned()
            .ok_or_else(|| CollaboratorError::NotFound {
                workspace_id: workspace_id.to_string(),
                path: relative_path.to_string(),
            })
    }
}

pub enum LogoResponse {
    Found(String),
    Missing,
    TransportError,
}

pub struct FakeLogoResolver {
    response: LogoResponse,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeLogoResolver {
    pub fn new(response: LogoResponse) -> Self {
        Self {
            response,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl LogoUrlResolver for FakeLogoResolver {
    async fn get_logo_url(
        &self,
        service_url: &str,
        provider: &str,
    ) -> CollaboratorResult<Option<String>> {
        self.calls
            .lock()
            .push((service_url.to_string(), provider.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.response {
            LogoResponse::Found(url) => Ok(Some(url.clone())),
            LogoResponse::Missing => Ok(None),
            LogoResponse::TransportError => Err(CollaboratorError::transport(
                service_url,
                "connection refused",
            )),
        }
    }
}
