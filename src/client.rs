use crate::api::*;
use crate::auth::Credentials;
use crate::errors::{ConfigError, JenkinsError};
use crate::middleware::{CrumbMiddleware, SessionCookieMiddleware};
use crate::types::JenkinsUrl;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the HTTP API of a Jenkins controller.
///
/// Cloning is cheap, and clones share the cached crumb.
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    client: ClientWithMiddleware,
    issuer: ClientWithMiddleware,
    url: JenkinsUrl,
    base: Url,
    credentials: Credentials,
}

/// Transport settings which callers may want to load from their own configuration.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Total time allowed for each request, in seconds.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub timeout: Duration,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub connect_timeout: Duration,
    /// Trust any TLS certificate. Only meant for test instances.
    pub danger_accept_invalid_certs: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_TIMEOUT,
            danger_accept_invalid_certs: false,
        }
    }
}

#[derive(Default)]
pub struct JenkinsClientBuilder {
    endpoint: Option<String>,
    credentials: Option<Credentials>,
    middleware: Vec<Arc<dyn Middleware>>,
    options: ClientOptions,
    headers: HeaderMap,
}

impl JenkinsClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base URL of Jenkins, e.g. `https://ci.example.org/jenkins/`
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Add middleware to the HTTP client.
    ///
    /// Middleware applies to every request, including the crumb issuer call.
    pub fn with<M: Middleware>(mut self, middleware: M) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.options.connect_timeout = timeout;
        self
    }

    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.options.danger_accept_invalid_certs = accept;
        self
    }

    /// Send a header with every request.
    pub fn default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Create the client. No request is made.
    pub fn build(self) -> Result<JenkinsClient, JenkinsError> {
        let endpoint = self.endpoint.ok_or(ConfigError::MissingEndpoint)?;
        let credentials = self.credentials.ok_or(ConfigError::MissingCredentials)?;
        let url = JenkinsUrl::try_from(endpoint).map_err(ConfigError::from)?;
        let base = url.to_url().map_err(ConfigError::from)?;

        let mut headers = self.headers;
        headers.extend(credentials2header(&credentials)?);
        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .timeout(self.options.timeout)
            .connect_timeout(self.options.connect_timeout)
            .danger_accept_invalid_certs(self.options.danger_accept_invalid_certs)
            .build()?;

        let issuer = self
            .middleware
            .iter()
            .fold(ClientBuilder::new(client.clone()), |b, m| b.with_arc(Arc::clone(m)))
            .with(SessionCookieMiddleware)
            .build();
        let builder = self
            .middleware
            .into_iter()
            .fold(ClientBuilder::new(client), |b, m| b.with_arc(m));
        let client = if credentials.needs_crumb() {
            let crumb_url = join(&base, CRUMB_ISSUER_PATH);
            builder
                .with(CrumbMiddleware::new(issuer.clone(), crumb_url))
                .build()
        } else {
            builder.build()
        };
        Ok(JenkinsClient {
            client,
            issuer,
            url,
            base,
            credentials,
        })
    }
}

fn credentials2header(credentials: &Credentials) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();
    if let Some(auth_data) = credentials.authorization() {
        let mut value: HeaderValue = auth_data
            .parse()
            .map_err(|_| ConfigError::InvalidHeader("Authorization"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// Append path segments to a base URL. Each segment is percent-encoded.
fn join<I, S>(base: &Url, segments: I) -> Url
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        for segment in segments {
            path.push(segment.as_ref());
        }
    }
    url
}

impl JenkinsClient {
    /// Create a client builder.
    pub fn builder() -> JenkinsClientBuilder {
        JenkinsClientBuilder::new()
    }

    pub fn url(&self) -> &JenkinsUrl {
        &self.url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn jobs(&self) -> JobsApi<'_> {
        JobsApi::new(self)
    }

    pub fn queue(&self) -> QueueApi<'_> {
        QueueApi::new(self)
    }

    pub fn plugins(&self) -> PluginManagerApi<'_> {
        PluginManagerApi::new(self)
    }

    pub fn system(&self) -> SystemApi<'_> {
        SystemApi::new(self)
    }

    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    pub fn configuration_as_code(&self) -> ConfigurationAsCodeApi<'_> {
        ConfigurationAsCodeApi::new(self)
    }

    pub fn statistics(&self) -> StatisticsApi<'_> {
        StatisticsApi::new(self)
    }

    pub fn crumb_issuer(&self) -> CrumbIssuerApi<'_> {
        CrumbIssuerApi::new(self)
    }

    /// URL of an endpoint given as path segments relative to the base URL.
    pub(crate) fn endpoint<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        join(&self.base, segments)
    }

    pub(crate) fn get(&self, url: Url) -> RequestBuilder {
        self.client.get(url)
    }

    pub(crate) fn post(&self, url: Url) -> RequestBuilder {
        self.client.post(url)
    }

    pub(crate) fn head(&self, url: Url) -> RequestBuilder {
        self.client.head(url)
    }

    /// GET through the pipeline which never attaches a crumb.
    pub(crate) fn get_without_crumb(&self, url: Url) -> RequestBuilder {
        self.issuer.get(url)
    }
}
