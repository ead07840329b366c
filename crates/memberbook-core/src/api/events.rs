use serde::Serialize;

use crate::models::{Event, EventDraft, Paginated};

use super::{ApiClient, ApiResult};

/// Query parameters accepted by `GET events/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

pub struct EventsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn events(&self) -> EventsApi<'_> {
        EventsApi { client: self }
    }
}

impl EventsApi<'_> {
    pub async fn list(&self, params: &EventListParams) -> ApiResult<Paginated<Event>> {
        self.client.get_with("/events/", params).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Event> {
        self.client.get(&format!("/events/{}/", id)).await
    }

    pub async fn create(&self, draft: &EventDraft) -> ApiResult<Event> {
        self.client.post("/events/", draft).await
    }

    pub async fn update(&self, id: i64, draft: &EventDraft) -> ApiResult<Event> {
        self.client.patch(&format!("/events/{}/", id), draft).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/events/{}/", id)).await
    }
}
