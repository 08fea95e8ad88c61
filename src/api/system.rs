use crate::errors::JenkinsError;
use crate::models::SystemInfo;
use crate::response::*;
use crate::JenkinsClient;
use reqwest::Response;

/// The Jenkins controller itself.
pub struct SystemApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> SystemApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    pub async fn system_info_raw(&self) -> Result<Response, JenkinsError> {
        let url = self.client.endpoint([""]);
        Ok(self.client.head(url).send().await?)
    }

    /// Version information, from the headers of `HEAD /`.
    pub async fn system_info(&self) -> Result<ResponseResult<SystemInfo>, JenkinsError> {
        HeadersOnly::map(self.system_info_raw().await?).await
    }

    pub async fn quiet_down_raw(&self) -> Result<Response, JenkinsError> {
        let url = self.client.endpoint(["quietDown"]);
        Ok(self.client.post(url).send().await?)
    }

    /// Stop starting new builds, in preparation for a restart.
    pub async fn quiet_down(&self) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.quiet_down_raw().await?).await
    }

    pub async fn cancel_quiet_down_raw(&self) -> Result<Response, JenkinsError> {
        let url = self.client.endpoint(["cancelQuietDown"]);
        Ok(self.client.post(url).send().await?)
    }

    pub async fn cancel_quiet_down(&self) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.cancel_quiet_down_raw().await?).await
    }
}
