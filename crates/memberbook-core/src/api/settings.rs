use crate::models::AppSettings;

use super::{ApiClient, ApiResult};

pub struct SettingsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn settings(&self) -> SettingsApi<'_> {
        SettingsApi { client: self }
    }
}

impl SettingsApi<'_> {
    /// Server-declared application settings, an open key/value map.
    pub async fn get(&self) -> ApiResult<AppSettings> {
        self.client.get("/settings/").await
    }
}
