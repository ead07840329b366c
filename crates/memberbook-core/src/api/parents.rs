use crate::models::{Paginated, Parent, ParentDraft};

use super::members::MemberListParams;
use super::{ApiClient, ApiResult};

pub struct ParentsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn parents(&self) -> ParentsApi<'_> {
        ParentsApi { client: self }
    }
}

impl ParentsApi<'_> {
    /// Parent lists accept the same filter parameters as member lists.
    pub async fn list(&self, params: &MemberListParams) -> ApiResult<Paginated<Parent>> {
        self.client.get_with("/parents/", params).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Parent> {
        self.client.get(&format!("/parents/{}/", id)).await
    }

    pub async fn create(&self, draft: &ParentDraft) -> ApiResult<Parent> {
        self.client.post("/parents/", draft).await
    }

    pub async fn update(&self, id: i64, draft: &ParentDraft) -> ApiResult<Parent> {
        self.client.patch(&format!("/parents/{}/", id), draft).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/parents/{}/", id)).await
    }
}
