//! HTTP client abstraction for testability
//!
//! Probes run on the single page event loop, so the futures here are not
//! required to be `Send`.

use async_trait::async_trait;

/// HTTP response from a probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait(?Send)]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient {
    /// Send an uncached GET request to the given URL.
    ///
    /// Transport-level failures (connection refused, reset, DNS) are
    /// returned as `PageKitError::Http`; any HTTP status is `Ok`.
    async fn get(&self, url: &str) -> crate::Result<HttpResponse>;
}

/// Native HTTP client using reqwest
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> crate::Result<HttpResponse> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| crate::PageKitError::Http(format!("GET {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        tracing::debug!("GET {} -> {}", url, status);
        Ok(HttpResponse { status })
    }
}

/// Browser HTTP client using the fetch API
#[cfg(all(feature = "csr", target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct GlooHttpClient;

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
#[async_trait(?Send)]
impl HttpClient for GlooHttpClient {
    async fn get(&self, url: &str) -> crate::Result<HttpResponse> {
        tracing::debug!("GET {}", url);
        let response = gloo_net::http::Request::get(url)
            .cache(web_sys::RequestCache::NoStore)
            .send()
            .await
            .map_err(|e| crate::PageKitError::Http(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        tracing::debug!("GET {} -> {}", url, status);
        Ok(HttpResponse { status })
    }
}
