use crate::errors::JenkinsError;
use crate::response::*;
use crate::JenkinsClient;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;

const PLAIN_TEXT: &str = "text/plain";

/// The Configuration as Code plugin.
pub struct ConfigurationAsCodeApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> ConfigurationAsCodeApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    async fn post_yaml(&self, action: &str, yaml: String) -> Result<Response, JenkinsError> {
        let url = self.client.endpoint(["configuration-as-code", action]);
        let res = self
            .client
            .post(url)
            .header(CONTENT_TYPE, PLAIN_TEXT)
            .body(yaml)
            .send()
            .await?;
        Ok(res)
    }

    pub async fn check_raw(&self, yaml: impl Into<String>) -> Result<Response, JenkinsError> {
        self.post_yaml("check", yaml.into()).await
    }

    /// Validate a YAML configuration without applying it.
    pub async fn check(&self, yaml: impl Into<String>) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.check_raw(yaml).await?).await
    }

    pub async fn apply_raw(&self, yaml: impl Into<String>) -> Result<Response, JenkinsError> {
        self.post_yaml("apply", yaml.into()).await
    }

    pub async fn apply(&self, yaml: impl Into<String>) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.apply_raw(yaml).await?).await
    }
}
