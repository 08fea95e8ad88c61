use serde::Deserialize;

/// Name of the crumb header when the crumb issuer does not say otherwise.
pub const DEFAULT_CRUMB_FIELD: &str = "Jenkins-Crumb";

/// CSRF protection token from `crumbIssuer/api/json`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Crumb {
    /// Name of the header the crumb is sent in.
    #[serde(default = "default_crumb_field")]
    pub crumb_request_field: String,
    pub crumb: Option<String>,
    /// `name=value` of the session cookie which the crumb is bound to.
    #[serde(skip)]
    pub session_cookie: Option<String>,
}

fn default_crumb_field() -> String {
    DEFAULT_CRUMB_FIELD.to_string()
}
