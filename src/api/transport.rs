// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! HTTP plumbing behind the API client.
//!
//! The client speaks in [`ApiRequest`]/[`ApiResponse`] values so it can run against the real
//! API through [`HttpTransport`] or against a scripted transport in tests.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::api::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Transport-neutral request: path segments are raw and get percent-encoded on send.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// `/a/b` form of the path, for logs and assertions.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Full URL under `base`, keeping any path prefix the base already has.
    pub fn url(&self, base: &Url) -> Result<Url, ApiError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(base.to_string()))?
            .pop_if_empty()
            .extend(&self.segments);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

/// Raw status and body of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can carry an [`ApiRequest`] to the server.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Blocking reqwest transport, run on worker threads.
pub struct HttpTransport {
    base: Url,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::Url(format!("{base_url}: {e}")))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { base, client })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = request.url(&self.base)?;
        debug!(method = request.method.as_str(), %url, "sending request");

        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().map_err(|e| {
            warn!(method = request.method.as_str(), path = %request.path(), error = %e, "request failed");
            ApiError::Transport(e.to_string())
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_segments_and_query() {
        let base = Url::parse("https://api.example.com").unwrap();
        let request = ApiRequest::new(Method::Get, ["managers", "a b/c", "identities"])
            .query("managerId", "a b/c");
        let url = request.url(&base).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/managers/a%20b%2Fc/identities?managerId=a+b%2Fc"
        );
        assert_eq!(request.path(), "/managers/a b/c/identities");
    }

    #[test]
    fn url_keeps_base_prefix() {
        let base = Url::parse("http://localhost:8080/api/").unwrap();
        let url = ApiRequest::new(Method::Delete, ["jobs", "j-1"])
            .url(&base)
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/jobs/j-1");
    }

    #[test]
    fn success_range() {
        let ok = ApiResponse {
            status: 204,
            body: String::new(),
        };
        let missing = ApiResponse {
            status: 404,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!missing.is_success());
    }
}
