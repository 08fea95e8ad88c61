//! Mapping of HTTP responses from Jenkins into [ResponseResult].
//!
//! Every endpoint of this crate has a `_raw` method which returns the
//! [reqwest::Response] as-is, and a typed method which passes it through one
//! of the [MapResponse] strategies defined here.
//!
//! An error status from Jenkins is not an [Err]: it is an [Ok] result without
//! an entity whose `error` is the response body. [Err] is reserved for
//! failures which have no HTTP status, or a broken contract with Jenkins
//! (see [IntFromText]).

use crate::errors::JenkinsError;
use crate::models::{ProgressiveText, SystemInfo};
use crate::types::QueueId;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::{HeaderMap, LOCATION, SERVER};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::num::ParseIntError;
use std::str::FromStr;

pub(crate) const X_TEXT_SIZE: &str = "X-Text-Size";
pub(crate) const X_MORE_DATA: &str = "X-More-Data";

lazy_static! {
    static ref BUILD_QUEUE_PATTERN: Regex = Regex::new(r"^.*/queue/item/(\d+)/$").unwrap();
}

/// Outcome of a call to Jenkins.
///
/// When [ResponseResult::is_success] is `false`, `entity` is `None` and
/// `error` holds the text of the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseResult<T> {
    pub status: StatusCode,
    pub entity: Option<T>,
    pub error: Option<String>,
}

impl<T> ResponseResult<T> {
    pub(crate) fn of(status: StatusCode, entity: Option<T>, error: Option<String>) -> Self {
        Self {
            status,
            entity,
            error,
        }
    }

    pub(crate) fn ok(status: StatusCode, entity: T) -> Self {
        Self::of(status, Some(entity), None)
    }

    pub(crate) fn err(status: StatusCode, error: String) -> Self {
        Self::of(status, None, Some(error))
    }

    /// Whether the status code is in `[200, 400)`.
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }

    pub fn entity(&self) -> Option<&T> {
        self.entity.as_ref()
    }

    pub fn into_entity(self) -> Option<T> {
        self.entity
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Transform the entity, keeping status and error.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ResponseResult<U> {
        ResponseResult {
            status: self.status,
            entity: self.entity.map(f),
            error: self.error,
        }
    }
}

pub(crate) fn is_success(status: StatusCode) -> bool {
    (200..400).contains(&status.as_u16())
}

/// A way of reading a [Response] into a [ResponseResult].
#[async_trait]
pub trait MapResponse {
    type Output;

    async fn map(res: Response) -> Result<ResponseResult<Self::Output>, JenkinsError>;
}

/// Map a response unless it is unsuccessful, in which case its body becomes the error.
async fn or_error<T>(res: Response) -> Result<Result<Response, ResponseResult<T>>, JenkinsError> {
    let status = res.status();
    if is_success(status) {
        Ok(Ok(res))
    } else {
        let text = res.text().await?;
        Ok(Err(ResponseResult::err(status, text)))
    }
}

/// Deserialize a JSON body.
pub struct Json<T>(PhantomData<T>);

#[async_trait]
impl<T: DeserializeOwned + Send + 'static> MapResponse for Json<T> {
    type Output = T;

    async fn map(res: Response) -> Result<ResponseResult<T>, JenkinsError> {
        let res = match or_error(res).await? {
            Ok(res) => res,
            Err(failed) => return Ok(failed),
        };
        let status = res.status();
        let body = res.bytes().await?;
        let result = match serde_json::from_slice(&body) {
            Ok(entity) => ResponseResult::ok(status, entity),
            Err(e) => ResponseResult::err(status, format!("Failed to parse response body: {}", e)),
        };
        Ok(result)
    }
}

/// The body as text, e.g. a job's `config.xml`.
pub struct Text;

#[async_trait]
impl MapResponse for Text {
    type Output = String;

    async fn map(res: Response) -> Result<ResponseResult<String>, JenkinsError> {
        let res = match or_error(res).await? {
            Ok(res) => res,
            Err(failed) => return Ok(failed),
        };
        let status = res.status();
        Ok(ResponseResult::ok(status, res.text().await?))
    }
}

/// The body as bytes, e.g. an artifact.
pub struct Bytes;

#[async_trait]
impl MapResponse for Bytes {
    type Output = bytes::Bytes;

    async fn map(res: Response) -> Result<ResponseResult<bytes::Bytes>, JenkinsError> {
        let res = match or_error(res).await? {
            Ok(res) => res,
            Err(failed) => return Ok(failed),
        };
        let status = res.status();
        Ok(ResponseResult::ok(status, res.bytes().await?))
    }
}

/// Only the status matters. The body of a successful response is not read.
pub struct Void;

#[async_trait]
impl MapResponse for Void {
    type Output = ();

    async fn map(res: Response) -> Result<ResponseResult<()>, JenkinsError> {
        let result = match or_error(res).await? {
            Ok(res) => ResponseResult::of(res.status(), None, None),
            Err(failed) => failed,
        };
        Ok(result)
    }
}

/// A body which is a bare integer, e.g. `lastBuild/buildNumber`.
///
/// A successful response which is not an integer is a [JenkinsError::IntParse].
pub struct IntFromText<N>(PhantomData<N>);

#[async_trait]
impl<N> MapResponse for IntFromText<N>
where
    N: FromStr<Err = ParseIntError> + Send + 'static,
{
    type Output = N;

    async fn map(res: Response) -> Result<ResponseResult<N>, JenkinsError> {
        let res = match or_error(res).await? {
            Ok(res) => res,
            Err(failed) => return Ok(failed),
        };
        let status = res.status();
        let body = res.text().await?;
        let number = body
            .trim()
            .parse()
            .map_err(|source| JenkinsError::IntParse {
                body: body.clone(),
                source,
            })?;
        Ok(ResponseResult::ok(status, number))
    }
}

/// A piece of console output, with its offset and continuation flag read from headers.
pub struct Progressive;

#[async_trait]
impl MapResponse for Progressive {
    type Output = ProgressiveText;

    async fn map(res: Response) -> Result<ResponseResult<ProgressiveText>, JenkinsError> {
        let res = match or_error(res).await? {
            Ok(res) => res,
            Err(failed) => return Ok(failed),
        };
        let status = res.status();
        let result = match read_progressive(res).await {
            Ok(text) => ResponseResult::ok(status, text),
            Err(e) => ResponseResult::err(status, format!("Failed to parse ProgressiveText: {}", e)),
        };
        Ok(result)
    }
}

#[derive(thiserror::Error, Debug)]
enum ProgressiveError {
    #[error("invalid X-Text-Size header: {0}")]
    Size(String),
    #[error(transparent)]
    Body(#[from] reqwest::Error),
}

async fn read_progressive(res: Response) -> Result<ProgressiveText, ProgressiveError> {
    let size = match header_str(res.headers(), X_TEXT_SIZE) {
        None => -1,
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ProgressiveError::Size(value))?,
    };
    let has_more_data = header_str(res.headers(), X_MORE_DATA)
        .map(|value| value.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let text = res.text().await?;
    Ok(ProgressiveText {
        text,
        size,
        has_more_data,
    })
}

/// [SystemInfo] from the headers which Jenkins sends with every response.
pub struct HeadersOnly;

#[async_trait]
impl MapResponse for HeadersOnly {
    type Output = SystemInfo;

    async fn map(res: Response) -> Result<ResponseResult<SystemInfo>, JenkinsError> {
        let res = match or_error(res).await? {
            Ok(res) => res,
            Err(failed) => return Ok(failed),
        };
        let headers = res.headers();
        let info = SystemInfo {
            hudson_version: header_str(headers, "X-Hudson"),
            jenkins_version: header_str(headers, "X-Jenkins"),
            jenkins_session: header_str(headers, "X-Jenkins-Session"),
            instance_identity: header_str(headers, "X-Instance-Identity"),
            ssh_endpoint: header_str(headers, "X-SSH-Endpoint"),
            server: header_str(headers, SERVER.as_str()),
        };
        Ok(ResponseResult::ok(res.status(), info))
    }
}

/// The queue item created by triggering a build, read from the `Location` header.
pub struct QueueLocation;

#[async_trait]
impl MapResponse for QueueLocation {
    type Output = QueueId;

    async fn map(res: Response) -> Result<ResponseResult<QueueId>, JenkinsError> {
        let res = match or_error(res).await? {
            Ok(res) => res,
            Err(failed) => return Ok(failed),
        };
        let status = res.status();
        let result = match header_str(res.headers(), LOCATION.as_str()) {
            None => ResponseResult::err(
                status,
                "No queue item Location header could be found despite getting a valid HTTP response."
                    .to_string(),
            ),
            Some(location) => match queue_id_of(&location) {
                Some(id) => ResponseResult::ok(status, id),
                None => ResponseResult::err(
                    status,
                    format!("Location header does not point to a queue item: {}", location),
                ),
            },
        };
        Ok(result)
    }
}

fn queue_id_of(location: &str) -> Option<QueueId> {
    BUILD_QUEUE_PATTERN
        .captures(location)
        .and_then(|captures| captures.get(1))
        .and_then(|id| id.as_str().parse().ok())
        .map(QueueId)
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct X {
        x: u32,
    }

    fn response(status: u16, headers: &[(&str, &str)], body: &'static str) -> Response {
        let mut builder = http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        Response::from(builder.body(body).unwrap())
    }

    #[tokio::test]
    async fn test_json_success() {
        let res = response(201, &[], r#"{"x":1}"#);
        let result = Json::<X>::map(res).await.unwrap();
        assert!(result.is_success());
        assert_eq!(result.entity, Some(X { x: 1 }));
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn test_json_not_found() {
        let res = response(404, &[], "Not Found");
        let result = Json::<X>::map(res).await.unwrap();
        assert!(!result.is_success());
        assert_eq!(result.status, StatusCode::NOT_FOUND);
        assert_eq!(result.entity, None);
        assert_eq!(result.error(), Some("Not Found"));
    }

    #[tokio::test]
    async fn test_json_bad_body_is_mapped() {
        let res = response(200, &[], "<html>login</html>");
        let result = Json::<X>::map(res).await.unwrap();
        assert_eq!(result.entity, None);
        assert!(result
            .error()
            .unwrap()
            .starts_with("Failed to parse response body"));
    }

    #[rstest]
    #[case(200, true)]
    #[case(302, true)]
    #[case(399, true)]
    #[case(400, false)]
    #[case(500, false)]
    #[tokio::test]
    async fn test_void(#[case] status: u16, #[case] success: bool) {
        let res = response(status, &[], "body");
        let result = Void::map(res).await.unwrap();
        assert_eq!(result.is_success(), success);
        assert_eq!(result.entity, None);
        assert_eq!(result.error.is_some(), !success);
    }

    #[tokio::test]
    async fn test_int_from_text() {
        let res = response(200, &[], "17\n");
        let result = IntFromText::<u32>::map(res).await.unwrap();
        assert_eq!(result.entity, Some(17));
    }

    #[tokio::test]
    async fn test_int_from_text_propagates_garbage() {
        let res = response(200, &[], "seventeen");
        let error = IntFromText::<u32>::map(res).await.unwrap_err();
        assert!(matches!(error, JenkinsError::IntParse { body, .. } if body == "seventeen"));
    }

    #[tokio::test]
    async fn test_int_from_text_error_status() {
        let res = response(404, &[], "no builds");
        let result = IntFromText::<u32>::map(res).await.unwrap();
        assert_eq!(result.error(), Some("no builds"));
    }

    #[rstest]
    #[case(&[("X-Text-Size", "5"), ("X-More-Data", "false")], 5, false)]
    #[case(&[], -1, false)]
    #[case(&[("X-Text-Size", "5"), ("X-More-Data", "TRUE")], 5, true)]
    #[tokio::test]
    async fn test_progressive(
        #[case] headers: &[(&str, &str)],
        #[case] size: i64,
        #[case] has_more_data: bool,
    ) {
        let res = response(200, headers, "hello");
        let result = Progressive::map(res).await.unwrap();
        assert_eq!(
            result.entity,
            Some(ProgressiveText {
                text: "hello".to_string(),
                size,
                has_more_data
            })
        );
    }

    #[tokio::test]
    async fn test_progressive_bad_size() {
        let res = response(200, &[("X-Text-Size", "lots")], "hello");
        let result = Progressive::map(res).await.unwrap();
        assert_eq!(result.entity, None);
        assert!(result
            .error()
            .unwrap()
            .starts_with("Failed to parse ProgressiveText"));
    }

    #[tokio::test]
    async fn test_headers_only() {
        let res = response(200, &[("X-Jenkins", "2.400")], "");
        let info = HeadersOnly::map(res).await.unwrap().into_entity().unwrap();
        assert_eq!(info.jenkins_version.as_deref(), Some("2.400"));
        assert_eq!(
            info,
            SystemInfo {
                jenkins_version: Some("2.400".to_string()),
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn test_headers_only_error() {
        let res = response(503, &[("X-Jenkins", "2.400")], "Jenkins is restarting");
        let result = HeadersOnly::map(res).await.unwrap();
        assert_eq!(result.entity, None);
        assert_eq!(result.error(), Some("Jenkins is restarting"));
    }

    #[tokio::test]
    async fn test_queue_location() {
        let res = response(201, &[("Location", "http://host/queue/item/42/")], "");
        let result = QueueLocation::map(res).await.unwrap();
        assert_eq!(result.entity, Some(QueueId(42)));
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn test_queue_location_missing() {
        let res = response(201, &[], "");
        let result = QueueLocation::map(res).await.unwrap();
        assert_eq!(result.entity, None);
        assert!(!result.error().unwrap().is_empty());
    }

    #[rstest]
    #[case("http://host/queue/item/42/", Some(42))]
    #[case("http://host/jenkins/queue/item/7/", Some(7))]
    #[case("http://host/queue/item/42", None)]
    #[case("http://host/job/x/", None)]
    fn test_queue_id_of(#[case] location: &str, #[case] expected: Option<u64>) {
        assert_eq!(queue_id_of(location), expected.map(QueueId));
    }

    #[rstest]
    fn test_map_keeps_status() {
        let result = ResponseResult::ok(StatusCode::OK, 2).map(|n| n * 2);
        assert_eq!(result.entity, Some(4));
        assert_eq!(result.status, StatusCode::OK);
    }
}
