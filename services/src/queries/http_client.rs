use crate::error::{self, Result};
use async_trait::async_trait;
use snafu::ResultExt;
use std::fmt::Debug;

/// Sends the requests built by the query service
#[async_trait]
pub trait HttpClient: Send + Sync + Debug {
    async fn get(&self, url: &str) -> Result<String>;

    async fn post(&self, url: &str, body: String, headers: &[(String, String)]) -> Result<String>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {url}");

        self.client
            .get(url)
            .send()
            .await
            .context(error::Http)?
            .error_for_status()
            .context(error::Http)?
            .text()
            .await
            .context(error::Http)
    }

    async fn post(&self, url: &str, body: String, headers: &[(String, String)]) -> Result<String> {
        tracing::debug!("POST {url}");

        let mut request = self.client.post(url).body(body);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        request
            .send()
            .await
            .context(error::Http)?
            .error_for_status()
            .context(error::Http)?
            .text()
            .await
            .context(error::Http)
    }
}
