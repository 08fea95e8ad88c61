#![allow(dead_code)]

use jenkins_rest::{Credentials, JenkinsClient};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub type AnyResult = Result<(), Box<dyn std::error::Error>>;

pub const CRUMB: &str = "0123456789abcdef";
pub const SESSION: &str = "JSESSIONID.1a2b3c4d=node01abc";
pub const CRUMB_PATH: &str = "/crumbIssuer/api/json";

pub fn client(server: &MockServer, credentials: Credentials) -> JenkinsClient {
    JenkinsClient::builder()
        .endpoint(server.uri())
        .credentials(credentials)
        .build()
        .unwrap()
}

pub fn password() -> Credentials {
    Credentials::username_password("admin", "hunter2")
}

pub fn api_token() -> Credentials {
    Credentials::api_token("admin", "11aa22bb33cc")
}

/// A crumb issuer which hands out [CRUMB] along with the session cookie [SESSION].
pub fn crumb_issuer() -> Mock {
    Mock::given(method("GET")).and(path(CRUMB_PATH)).respond_with(
        ResponseTemplate::new(200)
            .insert_header("Set-Cookie", format!("{}; Path=/; HttpOnly", SESSION).as_str())
            .set_body_json(json!({
                "_class": "hudson.security.csrf.DefaultCrumbIssuer",
                "crumb": CRUMB,
                "crumbRequestField": "Jenkins-Crumb"
            })),
    )
}

/// All requests received by the server with the given method and path.
pub async fn received(server: &MockServer, verb: &str, url_path: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == url_path)
        .collect()
}

pub fn header<'a>(request: &'a wiremock::Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}
