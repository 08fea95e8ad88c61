use crate::errors::JenkinsError;
use crate::models::{QueueItem, QueueItems};
use crate::response::*;
use crate::types::QueueId;
use crate::JenkinsClient;
use reqwest::Response;

/// The build queue.
pub struct QueueApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> QueueApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    pub async fn queue_raw(&self) -> Result<Response, JenkinsError> {
        let url = self.client.endpoint(["queue", "api", "json"]);
        Ok(self.client.get(url).send().await?)
    }

    /// Items currently waiting in the queue.
    pub async fn queue(&self) -> Result<ResponseResult<Vec<QueueItem>>, JenkinsError> {
        let result = Json::<QueueItems>::map(self.queue_raw().await?).await?;
        Ok(result.map(|envelope| envelope.items))
    }

    pub async fn queue_item_raw(&self, id: QueueId) -> Result<Response, JenkinsError> {
        let id = id.to_string();
        let url = self
            .client
            .endpoint(["queue", "item", id.as_str(), "api", "json"]);
        Ok(self.client.get(url).send().await?)
    }

    /// A queue item, including ones which already left the queue for a few minutes.
    pub async fn queue_item(&self, id: QueueId) -> Result<ResponseResult<QueueItem>, JenkinsError> {
        Json::<QueueItem>::map(self.queue_item_raw(id).await?).await
    }

    pub async fn cancel_raw(&self, id: QueueId) -> Result<Response, JenkinsError> {
        let url = self.client.endpoint(["queue", "cancelItem"]);
        let res = self
            .client
            .post(url)
            .form(&[("id", id.0)])
            .send()
            .await?;
        Ok(res)
    }

    /// Remove an item from the queue.
    ///
    /// Jenkins answers with a redirect or a 404 even when the item was
    /// cancelled, so check [QueueItem::cancelled] afterwards.
    pub async fn cancel(&self, id: QueueId) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.cancel_raw(id).await?).await
    }
}
