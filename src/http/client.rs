use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;

use super::transport::{FetchFailed, Transport};
use crate::config::ClientSettings;
use crate::dom::Fragment;
use crate::errors::fetch_context;
use crate::pagination::build_paginated_url;

/// Transport that fetches pages over HTTP
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let client = Self::build_client(settings.user_agent, settings.timeout_secs)?;
        Ok(Self { client })
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response, FetchFailed> {
        self.client.get(url).send().await.map_err(|e| {
            warn!("{}: {}", fetch_context(url), e);
            FetchFailed::Network(e.to_string())
        })
    }

    async fn read_body(response: reqwest::Response) -> Result<String, FetchFailed> {
        response
            .text()
            .await
            .map_err(|e| FetchFailed::Network(e.to_string()))
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, url: &str, page: u32) -> Result<Fragment, FetchFailed> {
        let url = build_paginated_url(url, page);
        debug!("GET {}", url);

        let response = self.send_get_request(&url).await?;
        let status = response.status();
        let body = Self::read_body(response).await?;

        if !status.is_success() {
            warn!("{}: HTTP {}", fetch_context(&url), status);
            let payload = Some(Fragment::new(body)).filter(|fragment| !fragment.is_empty());
            return Err(FetchFailed::Status {
                status: status.as_u16(),
                payload,
            });
        }

        Ok(Fragment::new(body))
    }
}
