//! `fetch` transport for the request authorizer.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds and tests: every send fails with a transport error, since
//! there is no browser to talk to.
//!
//! ERROR HANDLING
//! ==============
//! Only "no response" is an error here. Every HTTP status, including 4xx
//! and 5xx, comes back as an `ApiResponse` so the authorizer can apply its
//! status rules.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use session::{ApiRequest, ApiResponse, HttpTransport, TransportError};
#[cfg(any(test, feature = "csr"))]
use session::Method;

/// Base URL for backend calls, fixed at build time.
#[must_use]
pub fn api_base_url() -> &'static str {
    option_env!("PORTAL_API_URL").unwrap_or(session::config::DEFAULT_API_URL)
}

#[cfg(any(test, feature = "csr"))]
fn fetch_failed_message(method: Method, url: &str, detail: &str) -> String {
    format!("{} {url} failed: {detail}", method.as_str())
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl HttpTransport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::{Method as FetchMethod, RequestBuilder};

            let method = request.method;
            let fail = |detail: String| TransportError(fetch_failed_message(method, &request.url, &detail));

            let fetch_method = match method {
                Method::Get => FetchMethod::GET,
                Method::Post => FetchMethod::POST,
                Method::Put => FetchMethod::PUT,
                Method::Patch => FetchMethod::PATCH,
                Method::Delete => FetchMethod::DELETE,
            };
            let mut builder = RequestBuilder::new(&request.url).method(fetch_method);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let prepared = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| fail(e.to_string()))?;

            let response = prepared.send().await.map_err(|e| fail(e.to_string()))?;
            let status = response.status();
            let body = response.text().await.map_err(|e| fail(e.to_string()))?;
            Ok(ApiResponse::new(status, body))
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(TransportError(format!("no browser transport for {}", request.url)))
        }
    }
}
