use serde::Serialize;

use crate::models::{TokenPair, TokenRefresh};

use super::{ApiClient, ApiResult};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct TokenBody<'a> {
    token: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshBody<'a> {
    refresh: &'a str,
}

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }
}

impl AuthApi<'_> {
    /// Exchange credentials for an access/refresh token pair.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenPair> {
        self.client
            .post("/auth/login/", &LoginRequest { username, password })
            .await
    }

    /// Explicitly exchange a refresh token for a new access token.
    /// The interceptor path in `client` performs its own refresh; this is
    /// for callers that want to refresh ahead of expiry.
    pub async fn refresh(&self, refresh_token: &str) -> ApiResult<TokenRefresh> {
        self.client
            .post("/auth/refresh/", &RefreshBody { refresh: refresh_token })
            .await
    }

    /// Ask the server whether a token is still valid.
    pub async fn verify(&self, token: &str) -> ApiResult<()> {
        let _: serde_json::Value = self.client.post("/auth/verify/", &TokenBody { token }).await?;
        Ok(())
    }
}
