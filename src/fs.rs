//! Directory-backed static content handler.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use http::StatusCode;
use tracing::warn;

use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler, private};
use crate::request::Request;
use crate::response::{ContentType, Response};

/// Serves files below a root directory.
///
/// Meant for [`Router::static_root`](crate::Router::static_root) and
/// [`Router::static_files`](crate::Router::static_files):
///
/// ```rust,no_run
/// use trellis::{Router, ServeDir};
///
/// let router = Router::new();
/// router.static_files("/assets", ServeDir::new("public/assets"));
/// router.static_root(ServeDir::new("public"));
/// ```
///
/// The request path is percent-decoded and mapped onto the directory segment
/// by segment; any `..`, absolute component or encoded separator yields `404`. A directory answers with its
/// `index.html`. Only `GET` and `HEAD` are served.
#[derive(Clone, Debug)]
pub struct ServeDir {
    root: Arc<PathBuf>,
}

impl ServeDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: Arc::new(root.into()) }
    }

    /// Maps a percent-encoded URL path onto the directory. Each segment is
    /// decoded on its own and must stay a single plain file name.
    fn resolve(&self, url_path: &str) -> Option<PathBuf> {
        let mut path = PathBuf::from(self.root.as_path());
        for segment in url_path.split('/') {
            let segment = urlencoding::decode(segment).ok()?;
            if segment.contains(['/', '\\', '\0']) {
                return None;
            }
            let mut components = Path::new(segment.as_ref()).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(name)), None) => path.push(name),
                (None | Some(Component::CurDir), None) => {}
                _ => return None,
            }
        }
        Some(path)
    }

    async fn serve(self, req: Request) -> Response {
        if !matches!(req.method(), "GET" | "HEAD") {
            return Response::builder()
                .status(StatusCode::METHOD_NOT_ALLOWED)
                .header("allow", "GET, HEAD")
                .no_body();
        }

        let Some(path) = self.resolve(req.path()) else {
            return Response::status(StatusCode::NOT_FOUND);
        };

        match read(path).await {
            Ok((bytes, content_type)) => Response::builder().bytes(content_type, bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Response::status(StatusCode::NOT_FOUND),
            Err(e) => {
                warn!(path = %req.path(), "static read failed: {e}");
                Response::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

async fn read(mut path: PathBuf) -> io::Result<(Vec<u8>, ContentType)> {
    if tokio::fs::metadata(&path).await?.is_dir() {
        path.push("index.html");
    }
    let bytes = tokio::fs::read(&path).await?;
    let content_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(ContentType::OctetStream, ContentType::from_extension);
    Ok((bytes, content_type))
}

impl ErasedHandler for ServeDir {
    fn call(&self, req: Request) -> BoxFuture {
        Box::pin(self.clone().serve(req))
    }
}

impl private::Sealed for ServeDir {}

impl Handler for ServeDir {
    fn into_boxed_handler(self) -> BoxedHandler {
        BoxedHandler::from_erased(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, Router, Routes};

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hello.txt"), "Hello\n").unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/index.html"), "<h1>docs</h1>").unwrap();
        dir
    }

    #[test]
    fn traversal_is_refused() {
        let files = ServeDir::new("/srv/www");
        assert!(files.resolve("/../etc/passwd").is_none());
        assert!(files.resolve("/a/../../b").is_none());
        assert_eq!(files.resolve("/a/./b.css"), Some(PathBuf::from("/srv/www/a/b.css")));
    }

    #[test]
    fn segments_are_decoded_before_checking() {
        let files = ServeDir::new("/srv/www");
        assert_eq!(
            files.resolve("/my%20docs/r%C3%A9sum%C3%A9.txt"),
            Some(PathBuf::from("/srv/www/my docs/résumé.txt"))
        );
        assert!(files.resolve("/%2e%2e/etc/passwd").is_none());
        assert!(files.resolve("/a%2f..%2f..%2fetc").is_none());
        assert!(files.resolve("/a%5cb").is_none());
        assert!(files.resolve("/%FF").is_none());
    }

    #[tokio::test]
    async fn serves_names_with_spaces() {
        let dir = site();
        std::fs::write(dir.path().join("my notes.txt"), "notes").unwrap();

        let res = ServeDir::new(dir.path())
            .serve(Request::new(Method::Get, "/my%20notes.txt"))
            .await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"notes");
    }

    #[tokio::test]
    async fn serves_files_and_indexes() {
        let dir = site();
        let files = ServeDir::new(dir.path());

        let res = files.clone().serve(Request::new(Method::Get, "/hello.txt")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
        assert_eq!(res.body(), b"Hello\n");

        let res = files.clone().serve(Request::new(Method::Get, "/docs")).await;
        assert_eq!(res.body(), b"<h1>docs</h1>");

        let res = files.clone().serve(Request::new(Method::Get, "/nope.txt")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

        let res = files.serve(Request::new(Method::Delete, "/hello.txt")).await;
        assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn mounted_under_a_prefix() {
        let dir = site();
        let router = Router::new();
        router.get("/api", |_req: Request| async { "api" });
        router.static_files("/static", ServeDir::new(dir.path()));
        router.static_root(ServeDir::new(dir.path()));
        let app = router.handler();

        let res = app.dispatch(Request::new(Method::Get, "/static/hello.txt")).await;
        assert_eq!(res.body(), b"Hello\n");

        let res = app.dispatch(Request::new(Method::Get, "/docs/")).await;
        assert_eq!(res.body(), b"<h1>docs</h1>");

        let res = app.dispatch(Request::new(Method::Get, "/api")).await;
        assert_eq!(res.body(), b"api");
    }
}
