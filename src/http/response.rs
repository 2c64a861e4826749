//! HTTP response building module
//!
//! Provides builders for every status code the server emits.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, ETAG};
use hyper::{Response, StatusCode};

/// Methods the icon resource answers to
pub const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Content type of the icon resource
pub const ICON_CONTENT_TYPE: &str = "image/x-icon";

/// Build 200 response carrying the icon
///
/// `HEAD` requests get the same headers with an empty body.
pub fn build_icon_response(
    body: &Bytes,
    etag: &str,
    cache_control: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let payload = if is_head { Bytes::new() } else { body.clone() };

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, ICON_CONTENT_TYPE)
        .header(CONTENT_LENGTH, body.len())
        .header(ETAG, etag)
        .header(CACHE_CONTROL, cache_control)
        .body(Full::new(payload))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, cache_control: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(ETAG, etag)
        .header(CACHE_CONTROL, cache_control)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build OPTIONS response
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(ALLOW, ALLOWED_METHODS)
        .header(CONTENT_LENGTH, 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(ALLOW, ALLOWED_METHODS)
        .header(CONTENT_LENGTH, 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(CONTENT_TYPE, "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build error response with a plain text message
pub fn build_error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(message.to_owned())))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut resp = Response::new(Full::new(Bytes::new()));
            *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            resp
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body()
            .collect()
            .await
            .expect("full body is infallible")
            .to_bytes()
    }

    #[tokio::test]
    async fn test_icon_response_head_keeps_length() {
        let body = Bytes::from_static(b"icon-bytes");
        let resp = build_icon_response(&body, "\"a-1\"", "public, max-age=5", true);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_LENGTH], "10");
        assert_eq!(resp.headers()[CONTENT_TYPE], ICON_CONTENT_TYPE);
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_method_responses() {
        let resp = build_405_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[ALLOW], ALLOWED_METHODS);
        assert!(body_bytes(resp).await.is_empty());

        let resp = build_options_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[ALLOW], ALLOWED_METHODS);
        assert!(resp.headers().get(CONTENT_TYPE).is_none());
        assert!(body_bytes(resp).await.is_empty());
    }

    #[test]
    fn test_304_has_no_content_type() {
        let resp = build_304_response("\"a-1\"", "public, max-age=0");
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(resp.headers()[ETAG], "\"a-1\"");
        assert_eq!(resp.headers()[CACHE_CONTROL], "public, max-age=0");
        assert!(resp.headers().get(CONTENT_TYPE).is_none());
    }
}
