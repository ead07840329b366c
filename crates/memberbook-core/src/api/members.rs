use serde::Serialize;

use crate::models::{Event, Member, MemberDraft, MemberStatistics, Paginated, Parent};

use super::{ApiClient, ApiResult};

/// Query parameters accepted by `GET members/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemberListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

pub struct MembersApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn members(&self) -> MembersApi<'_> {
        MembersApi { client: self }
    }
}

impl MembersApi<'_> {
    pub async fn list(&self, params: &MemberListParams) -> ApiResult<Paginated<Member>> {
        self.client.get_with("/members/", params).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Member> {
        self.client.get(&format!("/members/{}/", id)).await
    }

    pub async fn create(&self, draft: &MemberDraft) -> ApiResult<Member> {
        self.client.post("/members/", draft).await
    }

    pub async fn update(&self, id: i64, draft: &MemberDraft) -> ApiResult<Member> {
        self.client.patch(&format!("/members/{}/", id), draft).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/members/{}/", id)).await
    }

    pub async fn statistics(&self) -> ApiResult<MemberStatistics> {
        self.client.get("/members/statistics/").await
    }

    /// Parents linked to one member.
    pub async fn parents(&self, id: i64) -> ApiResult<Vec<Parent>> {
        self.client.get(&format!("/members/{}/parents/", id)).await
    }

    /// Service-log events of one member.
    pub async fn events(&self, id: i64) -> ApiResult<Vec<Event>> {
        self.client.get(&format!("/members/{}/events/", id)).await
    }
}
