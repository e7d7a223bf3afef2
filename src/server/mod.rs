//! Dev Server
//!
//! Serves the compiled UI and proxies API prefixes to the backend.
//!
//! ```text
//! request ──► matches a proxy rule? ──yes──► Forwarder ──► backend
//!                     │
//!                     no
//!                     ▼
//!             ServeDir(static_dir) ── not a file ──► index.html
//! ```
//!
//! Every client-side route (`/billsplitter`, ...) falls through to
//! `index.html`, so deep links and reloads land on the application shell.

use axum::{
    body::Body,
    extract::{Request, State},
    response::{IntoResponse, Response},
    Router,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::util::ServiceExt;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::{ProxyConfig, ServerConfig};
use crate::proxy::{Forwarder, ProxyError, ProxyTable};
use crate::signal::shutdown_signal;

/// Shared state for the dev server handler
#[derive(Clone)]
pub struct DevServerState {
    table: Arc<ProxyTable>,
    forwarder: Forwarder,
    static_files: ServeDir<ServeFile>,
}

impl DevServerState {
    pub fn new(
        proxy: &ProxyConfig,
        static_dir: impl Into<PathBuf>,
    ) -> Result<Self, ProxyError> {
        let table = ProxyTable::from_config(proxy)?;
        let forwarder = Forwarder::new(proxy)?;
        Ok(Self::with_parts(table, forwarder, static_dir))
    }

    pub fn with_parts(
        table: ProxyTable,
        forwarder: Forwarder,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        let static_dir = static_dir.into();
        let index = static_dir.join("index.html");

        Self {
            table: Arc::new(table),
            forwarder,
            static_files: ServeDir::new(static_dir).fallback(ServeFile::new(index)),
        }
    }
}

/// Build the dev server router
pub fn build_router(state: DevServerState) -> Router {
    Router::new()
        .fallback(proxy_or_static)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn proxy_or_static(State(state): State<DevServerState>, request: Request) -> Response {
    let path = request.uri().path().to_string();

    if let Some(rule) = state.table.match_path(&path) {
        return match state.forwarder.forward(rule, request).await {
            Ok(response) => response,
            Err(e) => e.into_response(),
        };
    }

    match state.static_files.clone().oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}

/// Log the effective routing so a misconfigured target is obvious at startup
fn log_routes(table: &ProxyTable, static_dir: &Path) {
    for rule in table.rules() {
        tracing::info!(
            prefix = %rule.prefix(),
            upstream = %rule.authority(),
            change_origin = rule.change_origin(),
            "Proxy rule"
        );
    }
    if !static_dir.join("index.html").exists() {
        tracing::warn!(
            "No index.html in {:?}; build the UI first (trunk build in billswithfriends-ui)",
            static_dir
        );
    }
}

/// Run the dev server until a shutdown signal arrives
pub async fn serve(server: &ServerConfig, proxy: &ProxyConfig) -> Result<(), ServeError> {
    let static_dir = PathBuf::from(&server.static_dir);
    let state = DevServerState::new(proxy, &static_dir)?;
    log_routes(&state.table, &static_dir);

    let addr = server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("BillsWithFriends dev server listening on http://{}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Dev server shut down gracefully");
    Ok(())
}

/// Errors that stop the dev server
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error(transparent)]
    Proxy(#[from] ProxyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::ProxyRule;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::get,
    };
    use tempfile::tempdir;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Upstream that echoes the Host header it received
    async fn spawn_upstream() -> String {
        let app = Router::new()
            .route(
                "/bills",
                get(|headers: HeaderMap| async move {
                    let host = headers
                        .get("host")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    format!("bills via {}", host)
                }),
            )
            .route("/bills/:id", get(|| async { (StatusCode::NOT_FOUND, "missing") }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn static_dir() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<div id=\"root\"></div>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log('app')").unwrap();
        dir
    }

    fn app(target: &str, dir: &Path) -> Router {
        let table = ProxyTable::new(vec![ProxyRule::new("/bills", target, true).unwrap()]);
        let forwarder = Forwarder::new(&ProxyConfig::default()).unwrap();
        build_router(DevServerState::with_parts(table, forwarder, dir))
    }

    fn get_request(uri: &str) -> Request {
        Request::builder()
            .uri(uri)
            .header("host", "localhost:5002")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_client_routes_serve_index() {
        let dir = static_dir();
        let app = app("http://127.0.0.1:9", dir.path());

        for path in ["/billsplitter", "/expenseplanner", "/socialaccountability", "/unknown"] {
            let response = app.clone().oneshot(get_request(path)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{path}");
            assert_eq!(body_string(response).await, "<div id=\"root\"></div>");
        }
    }

    #[tokio::test]
    async fn test_serves_assets() {
        let dir = static_dir();
        let app = app("http://127.0.0.1:9", dir.path());

        let response = app.oneshot(get_request("/app.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "console.log('app')");
    }

    #[tokio::test]
    async fn test_proxies_with_rewritten_origin() {
        let dir = static_dir();
        let upstream = spawn_upstream().await;
        let authority = upstream.trim_start_matches("http://").to_string();
        let app = app(&upstream, dir.path());

        let response = app.clone().oneshot(get_request("/bills")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, format!("bills via {}", authority));

        // Upstream status codes pass through untouched
        let response = app.oneshot(get_request("/bills/3")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "missing");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let dir = static_dir();
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let app = app(&format!("http://{}", addr), dir.path());
        let response = app.oneshot(get_request("/bills")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
