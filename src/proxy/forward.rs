//! Request forwarding
//!
//! Rebuilds an incoming Axum request as a reqwest request against the
//! rule's upstream, then converts the upstream response back. Headers and
//! status codes cross the two HTTP stacks by name/bytes and numeric code.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::Response,
};
use std::time::{Duration, Instant};

use crate::config::ProxyConfig;
use crate::proxy::error::ProxyError;
use crate::proxy::rule::ProxyRule;

/// Connection-scoped headers that must not be forwarded
const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "content-length",
];

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// Forwards requests upstream with a shared HTTP client
#[derive(Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    max_body_size: usize,
}

impl Forwarder {
    pub fn new(config: &ProxyConfig) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ProxyError::Client(e.to_string()))?;

        Ok(Self {
            client,
            max_body_size: config.max_body_size,
        })
    }

    /// Forward `request` according to `rule` and return the upstream response
    pub async fn forward(&self, rule: &ProxyRule, request: Request) -> Result<Response, ProxyError> {
        let start = Instant::now();
        let (parts, body) = request.into_parts();

        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let url = rule.upstream_url(path_and_query);

        let request_id = parts
            .headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let method = reqwest::Method::from_bytes(parts.method.as_str().as_bytes())
            .map_err(|e| ProxyError::Upstream(format!("unsupported method: {}", e)))?;

        let body = axum::body::to_bytes(body, self.max_body_size)
            .await
            .map_err(|e| ProxyError::Body(e.to_string()))?;

        let headers = self.upstream_headers(rule, &parts.headers, &request_id);

        tracing::debug!(
            request_id = %request_id,
            method = %parts.method,
            upstream = %url,
            "Forwarding request"
        );

        let upstream = self
            .client
            .request(method, &url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = StatusCode::from_u16(upstream.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let response_headers = downstream_headers(upstream.headers());
        let bytes = upstream.bytes().await?;

        tracing::info!(
            request_id = %request_id,
            method = %parts.method,
            path = %parts.uri.path(),
            upstream = %rule.authority(),
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Proxied request"
        );

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;
        Ok(response)
    }

    /// Copy end-to-end headers. With `change_origin` the Host header is
    /// dropped so the client derives it from the upstream URL.
    fn upstream_headers(
        &self,
        rule: &ProxyRule,
        incoming: &HeaderMap,
        request_id: &str,
    ) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();

        for (name, value) in incoming {
            let name = name.as_str();
            if is_hop_by_hop(name) || (rule.change_origin() && name == "host") {
                continue;
            }
            if let (Ok(name), Ok(value)) = (
                reqwest::header::HeaderName::from_bytes(name.as_bytes()),
                reqwest::header::HeaderValue::from_bytes(value.as_bytes()),
            ) {
                headers.append(name, value);
            }
        }

        if rule.change_origin() {
            if let Some(host) = incoming.get("host") {
                if let Ok(value) = reqwest::header::HeaderValue::from_bytes(host.as_bytes()) {
                    headers.insert("x-forwarded-host", value);
                }
            }
        }

        if let Ok(value) = reqwest::header::HeaderValue::from_str(request_id) {
            headers.insert("x-request-id", value);
        }

        headers
    }
}

fn downstream_headers(upstream: &reqwest::header::HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in upstream {
        if is_hop_by_hop(name.as_str()) {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_str().as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) {
            headers.append(name, value);
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hop_by_hop() {
        assert!(is_hop_by_hop("Connection"));
        assert!(is_hop_by_hop("transfer-encoding"));
        assert!(!is_hop_by_hop("content-type"));
        assert!(!is_hop_by_hop("x-request-id"));
    }

    #[test]
    fn test_upstream_headers_rewrite_origin() {
        let forwarder = Forwarder::new(&ProxyConfig::default()).unwrap();
        let rule = ProxyRule::new("/bills", "http://10.206.104.164:8000", true).unwrap();

        let mut incoming = HeaderMap::new();
        incoming.insert("host", HeaderValue::from_static("localhost:5002"));
        incoming.insert("connection", HeaderValue::from_static("keep-alive"));
        incoming.insert("accept", HeaderValue::from_static("application/json"));

        let headers = forwarder.upstream_headers(&rule, &incoming, "req-1");
        assert!(headers.get("host").is_none());
        assert!(headers.get("connection").is_none());
        assert_eq!(headers["accept"], "application/json");
        assert_eq!(headers["x-forwarded-host"], "localhost:5002");
        assert_eq!(headers["x-request-id"], "req-1");
    }

    #[test]
    fn test_upstream_headers_keep_host_without_change_origin() {
        let forwarder = Forwarder::new(&ProxyConfig::default()).unwrap();
        let rule = ProxyRule::new("/bills", "http://backend:8000", false).unwrap();

        let mut incoming = HeaderMap::new();
        incoming.insert("host", HeaderValue::from_static("localhost:5002"));

        let headers = forwarder.upstream_headers(&rule, &incoming, "req-2");
        assert_eq!(headers["host"], "localhost:5002");
        assert!(headers.get("x-forwarded-host").is_none());
    }
}
