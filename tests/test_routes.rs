use plinth::http::request::{Method, Request, RequestBuilder};
use plinth::http::response::StatusCode;
use plinth::routes::{Handler, Router};

fn get(path: &str) -> Request {
    RequestBuilder::new()
        .method(Method::GET)
        .path(path)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_root_says_hello() {
    let response = Router::new(".").handle(&get("/")).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"Hello, World!\n");
}

#[tokio::test]
async fn test_echo_returns_segment() {
    let response = Router::new(".").handle(&get("/echo/foo")).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.headers.get("Content-Type"), Some("text/plain"));
    assert_eq!(response.body, b"foo");
}

#[tokio::test]
async fn test_echo_is_not_percent_decoded() {
    let response = Router::new(".").handle(&get("/echo/a%20b")).await;

    assert_eq!(response.body, b"a%20b");
}

#[tokio::test]
async fn test_user_agent_echoed() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/user-agent")
        .header("user-agent", "curl/8.0")
        .build()
        .unwrap();

    let response = Router::new(".").handle(&req).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"curl/8.0");
}

#[tokio::test]
async fn test_user_agent_missing() {
    let response = Router::new(".").handle(&get("/user-agent")).await;

    assert_eq!(response.status, StatusCode::BadRequest);
    assert_eq!(response.body, b"User-Agent header not found\n");
}

#[tokio::test]
async fn test_files_served_from_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"\x00binary\xff").unwrap();

    let response = Router::new(dir.path()).handle(&get("/files/notes.txt")).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(
        response.headers.get("Content-Type"),
        Some("application/octet-stream")
    );
    assert_eq!(response.body, b"\x00binary\xff");
}

#[tokio::test]
async fn test_files_nested_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    std::fs::write(dir.path().join("sub").join("a.txt"), b"nested").unwrap();

    let response = Router::new(dir.path()).handle(&get("/files/sub/a.txt")).await;

    assert_eq!(response.body, b"nested");
}

#[tokio::test]
async fn test_files_missing() {
    let dir = tempfile::tempdir().unwrap();

    let response = Router::new(dir.path()).handle(&get("/files/nope")).await;

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, b"File not found\n");
}

#[tokio::test]
async fn test_files_rejects_escaping_paths() {
    let dir = tempfile::tempdir().unwrap();
    let router = Router::new(dir.path().join("public"));

    for path in ["/files/../secret", "/files//etc/passwd", "/files/a/../../b", "/files/"] {
        let response = router.handle(&get(path)).await;
        assert_eq!(response.status, StatusCode::BadRequest, "{}", path);
    }
}

#[tokio::test]
async fn test_unknown_path_not_found() {
    let response = Router::new(".").handle(&get("/nowhere")).await;

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, b"Not Found!\n");
}

#[tokio::test]
async fn test_empty_method_or_target_rejected() {
    let router = Router::new(".");

    let no_target = get("");
    assert_eq!(router.handle(&no_target).await.status, StatusCode::BadRequest);

    let no_method = RequestBuilder::new()
        .method(Method::parse(""))
        .path("/")
        .build()
        .unwrap();
    assert_eq!(router.handle(&no_method).await.status, StatusCode::BadRequest);
}

#[tokio::test]
async fn test_routes_answer_any_method() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/echo/x")
        .build()
        .unwrap();

    assert_eq!(Router::new(".").handle(&req).await.status, StatusCode::Ok);
}
