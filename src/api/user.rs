use crate::errors::JenkinsError;
use crate::models::{ApiToken, User};
use crate::response::*;
use crate::JenkinsClient;
use reqwest::{Response, Url};

const API_TOKEN_PROPERTY: &str = "jenkins.security.ApiTokenProperty";

/// The user which the client is authenticated as, see [crate::Credentials::identity].
pub struct UserApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    fn user_url(&self, user: &str, tail: &[&str]) -> Url {
        let segments = ["user", user].into_iter().chain(tail.iter().copied());
        self.client.endpoint(segments)
    }

    fn identity(&self) -> &str {
        self.client.credentials().identity()
    }

    pub async fn get_raw(&self, user: &str) -> Result<Response, JenkinsError> {
        let url = self.user_url(user, &["api", "json"]);
        Ok(self.client.get(url).send().await?)
    }

    /// Details of the current user.
    pub async fn get(&self) -> Result<ResponseResult<User>, JenkinsError> {
        Json::<User>::map(self.get_raw(self.identity()).await?).await
    }

    pub async fn generate_new_token_raw(
        &self,
        user: &str,
        token_name: &str,
    ) -> Result<Response, JenkinsError> {
        let url = self.user_url(
            user,
            &["descriptorByName", API_TOKEN_PROPERTY, "generateNewToken"],
        );
        let res = self
            .client
            .post(url)
            .form(&[("newTokenName", token_name)])
            .send()
            .await?;
        Ok(res)
    }

    /// Create an API token for the current user. Its value is only ever shown in this response.
    pub async fn generate_new_token(
        &self,
        token_name: &str,
    ) -> Result<ResponseResult<ApiToken>, JenkinsError> {
        Json::<ApiToken>::map(
            self.generate_new_token_raw(self.identity(), token_name)
                .await?,
        )
        .await
    }

    pub async fn revoke_raw(&self, user: &str, token_uuid: &str) -> Result<Response, JenkinsError> {
        let url = self.user_url(user, &["descriptorByName", API_TOKEN_PROPERTY, "revoke"]);
        let res = self
            .client
            .post(url)
            .form(&[("tokenUuid", token_uuid)])
            .send()
            .await?;
        Ok(res)
    }

    /// Revoke an API token of the current user, given its [crate::models::ApiTokenData::token_uuid].
    pub async fn revoke(&self, token_uuid: &str) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.revoke_raw(self.identity(), token_uuid).await?).await
    }
}
