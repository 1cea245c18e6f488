use std::fs::Metadata;
use std::path::Path;
use std::time::UNIX_EPOCH;

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{self, HeaderMap, HeaderValue};
use hyper::{Method, Response, StatusCode};
use log::chrono::{DateTime, Utc};

pub type Body = Full<Bytes>;

/// `Sun, 06 Nov 1994 08:49:37 GMT`
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Answer a GET or HEAD for the file at `resolved`.
///
/// Missing files, directories and files that cannot be read are all `404 Not Found`.
pub async fn respond(method: &Method, headers: &HeaderMap, resolved: &Path) -> Response<Body> {
    let head = match *method {
        Method::GET => false,
        Method::HEAD => true,
        _ => return plain(StatusCode::NOT_IMPLEMENTED, "Unsupported method"),
    };

    let metadata = match tokio::fs::metadata(resolved).await {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => return not_found(),
    };

    let last_modified = last_modified(&metadata);

    // an entity tag takes precedence over the date
    let since = match headers.contains_key(header::IF_NONE_MATCH) {
        true => None,
        false => if_modified_since(headers),
    };

    if let (Some(modified), Some(since)) = (last_modified, since) {
        if modified <= since {
            let mut response = empty(StatusCode::NOT_MODIFIED);
            insert_date(&mut response, modified);
            return response;
        }
    }

    let content = match tokio::fs::read(resolved).await {
        Ok(content) => content,
        Err(e) => {
            log::warn!("cannot read {}: {e}", resolved.display());
            return not_found();
        }
    };

    let mime = mime_guess::from_path(resolved).first_or_octet_stream();
    let length = content.len() as u64;

    let mut response = if head {
        empty(StatusCode::OK)
    } else {
        with_body(StatusCode::OK, Bytes::from(content))
    };

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));

    if let Some(modified) = last_modified {
        insert_date(&mut response, modified);
    }

    response
}

pub fn not_found() -> Response<Body> {
    plain(StatusCode::NOT_FOUND, "File not found")
}

fn plain(status: StatusCode, message: &'static str) -> Response<Body> {
    let mut response = with_body(status, Bytes::from_static(message.as_bytes()));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );

    response
}

fn empty(status: StatusCode) -> Response<Body> {
    with_body(status, Bytes::new())
}

fn with_body(status: StatusCode, body: Bytes) -> Response<Body> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));

    response
}

fn insert_date(response: &mut Response<Body>, modified: DateTime<Utc>) {
    let formatted = modified.format(HTTP_DATE).to_string();

    if let Ok(value) = HeaderValue::from_str(&formatted) {
        response.headers_mut().insert(header::LAST_MODIFIED, value);
    }
}

/// Modification time truncated to whole seconds, the resolution of an HTTP date.
fn last_modified(metadata: &Metadata) -> Option<DateTime<Utc>> {
    let since_epoch = metadata.modified().ok()?.duration_since(UNIX_EPOCH).ok()?;
    let seconds = i64::try_from(since_epoch.as_secs()).ok()?;

    DateTime::from_timestamp(seconds, 0)
}

fn if_modified_since(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    let value = headers.get(header::IF_MODIFIED_SINCE)?.to_str().ok()?;
    let parsed = DateTime::parse_from_rfc2822(value).ok()?;

    Some(parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::fs;

    async fn body_of(response: Response<Body>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn found_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, r#"{"hello": "world"}"#).unwrap();

        let response = respond(&Method::GET, &HeaderMap::new(), &path).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "18");
        assert_eq!(response.headers()[header::CONNECTION], "close");
        assert!(response.headers().contains_key(header::LAST_MODIFIED));
        assert_eq!(body_of(response).await, r#"{"hello": "world"}"#);
    }

    #[tokio::test]
    async fn head_has_headers_but_no_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let response = respond(&Method::HEAD, &HeaderMap::new(), &path).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "9");
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let response = respond(&Method::GET, &HeaderMap::new(), &dir.path().join("nope.json")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::create_dir(&path).unwrap();

        let response = respond(&Method::GET, &HeaderMap::new(), &path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unsupported_method() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, "{}").unwrap();

        let response = respond(&Method::POST, &HeaderMap::new(), &path).await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn not_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, "{}").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::IF_MODIFIED_SINCE,
            HeaderValue::from_static("Fri, 31 Dec 9999 23:59:59 GMT"),
        );
        let response = respond(&Method::GET, &headers, &path).await;
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert!(body_of(response).await.is_empty());

        headers.insert(
            header::IF_MODIFIED_SINCE,
            HeaderValue::from_static("Thu, 01 Jan 1970 00:00:00 GMT"),
        );
        let response = respond(&Method::GET, &headers, &path).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn if_none_match_skips_date_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, "{}").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::IF_MODIFIED_SINCE,
            HeaderValue::from_static("Fri, 31 Dec 9999 23:59:59 GMT"),
        );
        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("\"abc\""));

        let response = respond(&Method::GET, &headers, &path).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_of(response).await, "{}");
    }

    #[test]
    fn http_date_format() {
        let date = DateTime::from_timestamp(784111777, 0).unwrap();
        assert_eq!(date.format(HTTP_DATE).to_string(), "Sun, 06 Nov 1994 08:49:37 GMT");
    }
}
