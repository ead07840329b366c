use serde::Serialize;

use crate::models::{Group, ListOrPage};

use super::{ApiClient, ApiResult};

/// Write payload for group create/update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

pub struct GroupsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn groups(&self) -> GroupsApi<'_> {
        GroupsApi { client: self }
    }
}

impl GroupsApi<'_> {
    pub async fn list(&self) -> ApiResult<Vec<Group>> {
        let page: ListOrPage<Group> = self.client.get("/groups/").await?;
        Ok(page.into_results())
    }

    pub async fn get(&self, id: i64) -> ApiResult<Group> {
        self.client.get(&format!("/groups/{}/", id)).await
    }

    pub async fn create(&self, draft: &GroupDraft) -> ApiResult<Group> {
        self.client.post("/groups/", draft).await
    }

    pub async fn update(&self, id: i64, draft: &GroupDraft) -> ApiResult<Group> {
        self.client.patch(&format!("/groups/{}/", id), draft).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/groups/{}/", id)).await
    }
}
