mod common;

use common::ClosedSink;
use plinth::http::response::{Response, ResponseBuilder, StatusCode};
use plinth::http::writer::{ResponseWriter, encode_response};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Created.as_u16(), 201);
    assert_eq!(StatusCode::NoContent.as_u16(), 204);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::MethodNotAllowed.reason_phrase(),
        "Method Not Allowed"
    );
    assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
}

#[test]
fn test_response_builder_with_headers() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("X-Custom", "value")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.version, "HTTP/1.1");
    assert_eq!(response.headers.get("content-type"), Some("text/plain"));
    assert_eq!(response.headers.get("X-Custom"), Some("value"));
    // Content-Length is the encoder's job
    assert!(!response.headers.contains_key("Content-Length"));
}

#[test]
fn test_encode_injects_content_length() {
    let wire = encode_response(&Response::ok(b"abc".to_vec()));

    assert_eq!(&wire[..], b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\n\r\nabc");
}

#[test]
fn test_encode_header_order_is_stable() {
    let mut response = Response::text(StatusCode::Ok, "foo");
    response.headers.insert("Connection", "keep-alive");

    let wire = encode_response(&response);
    assert_eq!(
        &wire[..],
        &b"HTTP/1.1 200 OK\r\n\
           Content-Length: 3\r\n\
           Content-Type: text/plain\r\n\
           Connection: keep-alive\r\n\
           \r\n\
           foo"[..]
    );
}

#[test]
fn test_encode_preserves_handler_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("content-length", "999")
        .body(b"test".to_vec())
        .build();

    let wire = encode_response(&response);
    let text = String::from_utf8_lossy(&wire);

    assert!(text.contains("content-length: 999\r\n"));
    assert!(!text.contains("Content-Length: 4"));
}

#[test]
fn test_encode_empty_body() {
    let wire = encode_response(&ResponseBuilder::new(StatusCode::NoContent).build());

    assert_eq!(&wire[..], b"HTTP/1.1 204 No Content\r\nContent-Length: 0\r\n\r\n");
}

#[test]
fn test_encode_binary_body_verbatim() {
    let wire = encode_response(&Response::ok(vec![0u8, 13, 10, 255]));

    assert!(wire.ends_with(&[0u8, 13, 10, 255]));
}

#[test]
fn test_not_implemented_closes() {
    let response = Response::not_implemented();

    assert_eq!(response.status, StatusCode::NotImplemented);
    assert_eq!(response.headers.get("Connection"), Some("close"));
}

#[tokio::test]
async fn test_writer_sends_everything() {
    let response = Response::ok(b"hello".to_vec());
    let mut writer = ResponseWriter::new(&response);
    let mut out: Vec<u8> = Vec::new();

    writer.write_to(&mut out).await.unwrap();

    assert_eq!(out.len(), writer.len());
    assert!(out.ends_with(b"\r\n\r\nhello"));
}

#[tokio::test]
async fn test_writer_fails_on_zero_byte_send() {
    let mut writer = ResponseWriter::new(&Response::ok(b"hello".to_vec()));

    assert!(writer.write_to(&mut ClosedSink).await.is_err());
}
