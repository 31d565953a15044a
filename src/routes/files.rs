use std::path::{Component, Path};

use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Serves `name` from under `root`.
///
/// Only plain relative paths are accepted; `..`, absolute paths and prefixes
/// are rejected before the filesystem is touched.
pub async fn serve(root: &Path, name: &str) -> Response {
    let relative = Path::new(name);

    let contained = !name.is_empty()
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    if !contained {
        tracing::debug!(path = name, "Rejected file path outside the root");
        return Response::bad_request(b"Invalid file path\n".to_vec());
    }

    match tokio::fs::read(root.join(relative)).await {
        Ok(contents) => ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "application/octet-stream")
            .body(contents)
            .build(),
        Err(e) => {
            tracing::debug!(path = name, error = %e, "File not readable");
            Response::not_found(b"File not found\n".to_vec())
        }
    }
}
