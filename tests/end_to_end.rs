//! Drives a real server over TCP with hand-written HTTP/1.1 requests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use trellis::{App, BoxedHandler, Request, Response, Router, Routes, Server, StatusCode, middleware};

const RESPONSE_BODY: &str = "Hello, World!";

type Log = Arc<Mutex<Vec<String>>>;

struct Running {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: tokio::task::JoinHandle<Result<(), trellis::Error>>,
}

async fn start(app: App) -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        Server::from_listener(listener)
            .serve_with_shutdown(app, async {
                let _ = stopped.await;
            })
            .await
    });
    Running { addr, stop, task }
}

impl Running {
    async fn shutdown(self) {
        self.stop.send(()).unwrap();
        self.task.await.unwrap().unwrap();
    }
}

/// Sends one request with `connection: close` and returns (status, body).
async fn send(addr: SocketAddr, method: &str, path: &str, body: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{method} {path} HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\ncontent-length: {}\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();

    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap();
    (status, body.to_owned())
}

fn logging(log: &Log) -> impl middleware::Middleware + use<> {
    let log = Arc::clone(log);
    middleware::from_fn(move |req: Request, next: BoxedHandler| {
        log.lock().unwrap().push(format!("log {} {}", req.method(), req.path()));
        async move { next.call(req).await }
    })
}

async fn echo_body(req: Request) -> Response {
    if req.body() != RESPONSE_BODY.as_bytes() {
        return Response::status(StatusCode::BAD_REQUEST);
    }
    Response::status(StatusCode::OK)
}

#[tokio::test]
async fn grouped_route_runs_its_middleware_first() {
    let log = Log::default();
    let router = Router::new();
    router.not_found(|_req: Request| async {
        Response::builder().status(StatusCode::NOT_FOUND).text("custom not found")
    });

    let mut api = router.group("/api/v1");
    api.middleware(logging(&log));
    let handler_log = Arc::clone(&log);
    api.get("/settings", move |_req: Request| {
        handler_log.lock().unwrap().push("handler".to_owned());
        async { RESPONSE_BODY }
    });

    let server = start(router.handler()).await;

    let (status, body) = send(server.addr, "GET", "/api/v1/settings", "").await;
    assert_eq!(status, 200);
    assert_eq!(body, RESPONSE_BODY);
    assert_eq!(*log.lock().unwrap(), ["log GET /api/v1/settings", "handler"]);

    let (status, body) = send(server.addr, "GET", "/api/v1/unknown", "").await;
    assert_eq!(status, 404);
    assert_eq!(body, "custom not found");
    assert_eq!(log.lock().unwrap().len(), 2);

    server.shutdown().await;
}

#[tokio::test]
async fn every_method_through_nested_groups() {
    let router = Router::new();
    let api = router.group("/api/v1");
    api.get("/settings", |_req: Request| async { RESPONSE_BODY })
        .post("/settings", echo_body)
        .put("/settings", echo_body)
        .patch("/settings", echo_body)
        .delete("/settings", |_req: Request| async { StatusCode::OK })
        .head("/settings", |_req: Request| async { StatusCode::OK })
        .options("/settings", |_req: Request| async {
            Response::builder()
                .header("allow", "HEAD,GET,PUT,POST,DELETE,OPTIONS")
                .no_body()
        });

    let group1 = api.group("/group1");
    group1.get("/hello", |_req: Request| async { RESPONSE_BODY });
    group1.group("/group2").get("/hello", |_req: Request| async { RESPONSE_BODY });

    let server = start(router.handler()).await;

    for method in ["POST", "PUT", "PATCH"] {
        assert_eq!(send(server.addr, method, "/api/v1/settings", RESPONSE_BODY).await.0, 200);
        assert_eq!(send(server.addr, method, "/api/v1/settings", "").await.0, 400);
    }
    for method in ["DELETE", "OPTIONS"] {
        assert_eq!(send(server.addr, method, "/api/v1/settings", "").await.0, 200);
    }

    let (status, body) = send(server.addr, "GET", "/api/v1/group1/group2/hello", "").await;
    assert_eq!((status, body.as_str()), (200, RESPONSE_BODY));

    let (status, _) = send(server.addr, "TRACE", "/api/v1/settings", "").await;
    assert_eq!(status, 405);

    server.shutdown().await;
}

#[tokio::test]
async fn trace_middleware_passes_responses_through() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut router = Router::new();
    router.middleware(middleware::trace());
    router.get("/", |_req: Request| async { RESPONSE_BODY });

    let server = start(router.handler()).await;
    let (status, body) = send(server.addr, "GET", "/", "").await;
    assert_eq!((status, body.as_str()), (200, RESPONSE_BODY));
    assert_eq!(send(server.addr, "GET", "/missing", "").await.0, 404);
    server.shutdown().await;
}
