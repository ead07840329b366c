use crate::models::{UserInfo, UserPatch};

use super::{ApiClient, ApiResult};

pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }
}

impl UsersApi<'_> {
    /// The authenticated account's profile.
    pub async fn me(&self) -> ApiResult<UserInfo> {
        self.client.get("/users/me/").await
    }

    pub async fn update(&self, id: i64, patch: &UserPatch) -> ApiResult<UserInfo> {
        self.client.patch(&format!("/users/{}/", id), patch).await
    }
}
