use serde::Serialize;

use crate::models::{EventType, ListOrPage};

use super::{ApiClient, ApiResult};

/// Write payload for event-type create/update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventTypeDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

pub struct EventTypesApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn event_types(&self) -> EventTypesApi<'_> {
        EventTypesApi { client: self }
    }
}

impl EventTypesApi<'_> {
    pub async fn list(&self) -> ApiResult<Vec<EventType>> {
        let page: ListOrPage<EventType> = self.client.get("/event-types/").await?;
        Ok(page.into_results())
    }

    pub async fn get(&self, id: i64) -> ApiResult<EventType> {
        self.client.get(&format!("/event-types/{}/", id)).await
    }

    pub async fn create(&self, draft: &EventTypeDraft) -> ApiResult<EventType> {
        self.client.post("/event-types/", draft).await
    }

    pub async fn update(&self, id: i64, draft: &EventTypeDraft) -> ApiResult<EventType> {
        self.client.patch(&format!("/event-types/{}/", id), draft).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/event-types/{}/", id)).await
    }
}
