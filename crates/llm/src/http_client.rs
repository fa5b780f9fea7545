//! HTTP Client Factory
//!
//! Builds the reqwest client used by providers: request timeout plus an
//! optional proxy.

use std::time::Duration;

use crate::types::{LlmError, LlmResult, ProviderConfig};

/// Build a `reqwest::Client` from the provider configuration.
///
/// - `proxy_url: Some(url)` -> route every request through that proxy
/// - `proxy_url: None` -> explicitly disable proxy (`no_proxy`), ignoring env vars
pub fn build_http_client(config: &ProviderConfig) -> LlmResult<reqwest::Client> {
    let mut builder =
        reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs.max(1)));

    match &config.proxy_url {
        Some(url) => {
            let proxy = reqwest::Proxy::all(url).map_err(|e| LlmError::ClientConfig {
                message: format!("Invalid proxy URL '{}': {}", url, e),
            })?;
            builder = builder.proxy(proxy);
        }
        None => {
            builder = builder.no_proxy();
        }
    }

    builder.build().map_err(|e| LlmError::ClientConfig {
        message: e.to_string(),
    })
}
