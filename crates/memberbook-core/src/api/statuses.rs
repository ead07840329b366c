use serde::Serialize;

use crate::models::{ListOrPage, Status};

use super::{ApiClient, ApiResult};

/// Write payload for status create/update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

pub struct StatusesApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn statuses(&self) -> StatusesApi<'_> {
        StatusesApi { client: self }
    }
}

impl StatusesApi<'_> {
    /// The lookup collection is small and served either bare or paginated.
    pub async fn list(&self) -> ApiResult<Vec<Status>> {
        let page: ListOrPage<Status> = self.client.get("/statuses/").await?;
        Ok(page.into_results())
    }

    pub async fn get(&self, id: i64) -> ApiResult<Status> {
        self.client.get(&format!("/statuses/{}/", id)).await
    }

    pub async fn create(&self, draft: &StatusDraft) -> ApiResult<Status> {
        self.client.post("/statuses/", draft).await
    }

    pub async fn update(&self, id: i64, draft: &StatusDraft) -> ApiResult<Status> {
        self.client.patch(&format!("/statuses/{}/", id), draft).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/statuses/{}/", id)).await
    }
}
