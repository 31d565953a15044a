//! Request handlers.
//!
//! The session loop only knows the [`Handler`] trait. [`Router`] is the fixed
//! route table the binary serves:
//!
//! | Path              | Response                                         |
//! |-------------------|--------------------------------------------------|
//! | `/`               | `Hello, World!`                                  |
//! | `/echo/{text}`    | `{text}` as `text/plain`                         |
//! | `/user-agent`     | the `User-Agent` header, or 400 when missing     |
//! | `/files/{path}`   | the file under the configured root, or 404       |
//! | anything else     | 404                                              |

pub mod files;

use std::future::Future;
use std::path::PathBuf;

use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};

/// Maps a request to a response.
///
/// Handlers report failure through the response status only; they have no
/// error channel back into the session.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, request: &Request) -> impl Future<Output = Response> + Send;
}

#[derive(Debug, Clone)]
pub struct Router {
    files_root: PathBuf,
}

impl Router {
    pub fn new(files_root: impl Into<PathBuf>) -> Self {
        Self {
            files_root: files_root.into(),
        }
    }

    async fn route(&self, req: &Request) -> Response {
        if req.method.is_empty() || req.path.is_empty() {
            return Response::bad_request(b"Malformed request line\n".to_vec());
        }

        let path = req.path.as_str();

        if path == "/" {
            Response::ok(b"Hello, World!\n".to_vec())
        } else if let Some(text) = path.strip_prefix("/echo/") {
            Response::text(StatusCode::Ok, text)
        } else if path.starts_with("/user-agent") {
            match req.header("User-Agent") {
                Some(agent) => Response::text(StatusCode::Ok, agent),
                None => Response::bad_request(b"User-Agent header not found\n".to_vec()),
            }
        } else if let Some(name) = path.strip_prefix("/files/") {
            files::serve(&self.files_root, name).await
        } else {
            Response::not_found(b"Not Found!\n".to_vec())
        }
    }
}

impl Handler for Router {
    fn handle(&self, request: &Request) -> impl Future<Output = Response> + Send {
        self.route(request)
    }
}
