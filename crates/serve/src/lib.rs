//! Static file server.
//!
//! `GET /` answers with the root's `index.html`; every other path is looked up
//! as a file under the root. There are no other routes.

use axum::Router;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Port used when none is given.
pub const DEFAULT_PORT: u16 = 3500;

/// Directory served when none is given.
pub const DEFAULT_ROOT: &str = "public";

/// Entry document returned for `/`.
pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("static root {0} is not a directory")]
    MissingRoot(PathBuf),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Routes for serving `root`.
pub fn router(root: impl AsRef<Path>) -> Router {
    let root = root.as_ref();
    Router::new()
        .route_service("/", ServeFile::new(root.join(INDEX_FILE)))
        .fallback_service(ServeDir::new(root))
        .layer(TraceLayer::new_for_http())
}

/// Serve `root` on `addr` until the process is stopped.
pub async fn serve(addr: SocketAddr, root: impl AsRef<Path>) -> Result<(), ServeError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(ServeError::MissingRoot(root.to_path_buf()));
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    tracing::info!(addr = %listener.local_addr()?, root = %root.display(), "serving static files");

    axum::serve(listener, router(root)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn site() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(INDEX_FILE), "<h1>stage</h1>").unwrap();
        std::fs::create_dir(tmp.path().join("engine")).unwrap();
        std::fs::write(tmp.path().join("engine").join("eng.js"), "export {}").unwrap();
        tmp
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn root_returns_index() {
        let tmp = site();
        let (status, body) = get(router(tmp.path()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>stage</h1>");
    }

    #[tokio::test]
    async fn nested_files_are_served() {
        let tmp = site();
        let (status, body) = get(router(tmp.path()), "/engine/eng.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "export {}");
    }

    #[tokio::test]
    async fn unknown_paths_are_not_found() {
        let tmp = site();
        let (status, _) = get(router(tmp.path()), "/missing.css").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn serve_rejects_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let err = serve(addr, tmp.path().join("nope")).await.unwrap_err();
        assert!(matches!(err, ServeError::MissingRoot(_)));
    }
}
