use crate::errors::JenkinsError;
use crate::models::OverallLoad;
use crate::response::*;
use crate::JenkinsClient;
use reqwest::Response;

/// Load statistics.
pub struct StatisticsApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> StatisticsApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    pub async fn overall_load_raw(&self) -> Result<Response, JenkinsError> {
        let url = self.client.endpoint(["overallLoad", "api", "json"]);
        Ok(self.client.get(url).send().await?)
    }

    pub async fn overall_load(&self) -> Result<ResponseResult<OverallLoad>, JenkinsError> {
        Json::<OverallLoad>::map(self.overall_load_raw().await?).await
    }
}
