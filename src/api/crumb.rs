use crate::errors::JenkinsError;
use crate::middleware::CrumbMapping;
use crate::models::Crumb;
use crate::response::*;
use crate::JenkinsClient;
use reqwest::Response;

pub(crate) const CRUMB_ISSUER_PATH: [&str; 3] = ["crumbIssuer", "api", "json"];

/// Direct access to the crumb issuer.
///
/// Not needed for normal use: the client obtains a crumb by itself before the
/// first POST request.
pub struct CrumbIssuerApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> CrumbIssuerApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    pub async fn crumb_raw(&self) -> Result<Response, JenkinsError> {
        let url = self.client.endpoint(CRUMB_ISSUER_PATH);
        Ok(self.client.get_without_crumb(url).send().await?)
    }

    /// Request a new crumb. This does not replace the one cached by the client.
    pub async fn crumb(&self) -> Result<ResponseResult<Crumb>, JenkinsError> {
        CrumbMapping::map(self.crumb_raw().await?).await
    }
}
