//! Jenkins credentials.
//!
//! Both password and API token authentication are sent as HTTP Basic auth;
//! Jenkins has no bearer tokens. The difference matters for CSRF protection:
//! API token requests are exempt from crumbs, password and anonymous ones are not.

use crate::errors::ConfigError;
use crate::types::Username;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Environment variable holding `user:apitoken`, checked first by [Credentials::from_env].
pub const API_TOKEN_ENV: &str = "JENKINS_USER_API_TOKEN";

/// Environment variable holding `user:password`, checked second by [Credentials::from_env].
pub const PASSWORD_ENV: &str = "JENKINS_USER_PASSWORD";

const BASIC: &str = "Basic";
const ANONYMOUS: &str = "anonymous";

/// How a [crate::JenkinsClient] authenticates.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Anonymous,
    UsernamePassword { username: Username, encoded: String },
    UsernameApiToken { username: Username, encoded: String },
}

impl Credentials {
    pub fn username_password(username: &str, password: &str) -> Self {
        Self::UsernamePassword {
            username: Username::from(username),
            encoded: STANDARD.encode(format!("{}:{}", username, password)),
        }
    }

    pub fn api_token(username: &str, token: &str) -> Self {
        Self::UsernameApiToken {
            username: Username::from(username),
            encoded: STANDARD.encode(format!("{}:{}", username, token)),
        }
    }

    /// Password credentials from either `user:password` or its base64 encoding.
    pub fn password_pair(value: &str) -> Result<Self, ConfigError> {
        let (username, encoded) = split_pair(value)?;
        Ok(Self::UsernamePassword { username, encoded })
    }

    /// API token credentials from either `user:apitoken` or its base64 encoding.
    pub fn api_token_pair(value: &str) -> Result<Self, ConfigError> {
        let (username, encoded) = split_pair(value)?;
        Ok(Self::UsernameApiToken { username, encoded })
    }

    /// Look for [API_TOKEN_ENV] then [PASSWORD_ENV], falling back to anonymous access.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(value) = std::env::var(API_TOKEN_ENV) {
            return Self::api_token_pair(&value);
        }
        if let Ok(value) = std::env::var(PASSWORD_ENV) {
            return Self::password_pair(&value);
        }
        Ok(Self::Anonymous)
    }

    /// HTTP authentication scheme, `None` for anonymous access.
    pub fn scheme(&self) -> Option<&'static str> {
        match self {
            Self::Anonymous => None,
            _ => Some(BASIC),
        }
    }

    /// base64 encoded `user:secret`.
    pub fn auth_value(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::UsernamePassword { encoded, .. } | Self::UsernameApiToken { encoded, .. } => {
                Some(encoded)
            }
        }
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> Option<String> {
        self.scheme()
            .zip(self.auth_value())
            .map(|(scheme, value)| format!("{} {}", scheme, value))
    }

    /// The user these credentials act as.
    pub fn identity(&self) -> &str {
        match self {
            Self::Anonymous => ANONYMOUS,
            Self::UsernamePassword { username, .. } | Self::UsernameApiToken { username, .. } => {
                username.as_str()
            }
        }
    }

    /// Whether POST requests made with these credentials must carry a crumb.
    pub fn needs_crumb(&self) -> bool {
        !matches!(self, Self::UsernameApiToken { .. })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "Anonymous"),
            Self::UsernamePassword { username, .. } => {
                write!(f, "UsernamePassword({})", username)
            }
            Self::UsernameApiToken { username, .. } => {
                write!(f, "UsernameApiToken({})", username)
            }
        }
    }
}

fn split_pair(value: &str) -> Result<(Username, String), ConfigError> {
    if let Some((username, _)) = value.split_once(':') {
        return Ok((Username::from(username), STANDARD.encode(value)));
    }
    let decoded = STANDARD
        .decode(value.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or(ConfigError::MalformedCredentials)?;
    let (username, _) = decoded
        .split_once(':')
        .ok_or(ConfigError::MalformedCredentials)?;
    Ok((Username::from(username), value.trim().to_string()))
}
