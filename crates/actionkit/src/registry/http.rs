//! HTTP transport for the remote action registry.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::action::ActionRecord;
use crate::config::RegistryConfig;
use crate::error::{ActionError, ActionResult};
use crate::registry::RegistryTransport;

/// Supplies the bearer token attached to registry requests.
///
/// Authentication itself lives outside this crate; whoever owns the login
/// session implements this and clears the client cache on auth changes.
pub trait TokenProvider: Send + Sync {
    /// Current token, or `None` when unauthenticated.
    fn token(&self) -> Option<String>;
}

/// Wire envelope returned by the registry endpoint.
#[derive(Debug, Deserialize)]
struct ActionList {
    #[serde(rename = "ActionList", default)]
    actions: Vec<ActionRecord>,
}

/// Fetches action records over HTTP: `GET {base_url}?path={pattern}`.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    token_provider: Option<Arc<dyn TokenProvider>>,
}

impl HttpTransport {
    pub fn new(config: &RegistryConfig) -> ActionResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| {
                ActionError::Internal(format!("failed to build http client: {error}"))
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_provider: None,
        })
    }

    pub fn with_token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    fn query_url(&self, pattern: &str) -> String {
        format!("{}?path={}", self.base_url, urlencoding::encode(pattern))
    }
}

#[async_trait::async_trait]
impl RegistryTransport for HttpTransport {
    async fn fetch(&self, pattern: &str) -> ActionResult<Vec<ActionRecord>> {
        let url = self.query_url(pattern);
        let mut request = self.client.get(&url);
        if let Some(provider) = &self.token_provider {
            if let Some(token) = provider.token() {
                request = request.bearer_auth(token);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|error| ActionError::Network(format!("registry fetch failed: {error}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ActionError::Network(format!(
                "registry returned {status} for {url}"
            )));
        }
        let list: ActionList = response.json().await.map_err(|error| {
            ActionError::Network(format!("invalid registry response: {error}"))
        })?;
        Ok(list.actions)
    }
}
