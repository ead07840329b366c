use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::models::{UserInfo, UserPatch};
use crate::router::Navigator;

use super::CredentialStore;

/// Authentication lifecycle: anonymous until a login stores a token pair,
/// authenticated while an access token is present, back to anonymous on
/// logout or refresh failure.
///
/// Holds the cached account profile plus the loading/error flags views
/// read, mirroring each request's outcome and nothing more.
pub struct AuthStore {
    api: ApiClient,
    navigator: Navigator,
    user: Option<UserInfo>,
    loading: bool,
    error: Option<String>,
}

impl AuthStore {
    pub fn new(api: ApiClient, navigator: Navigator) -> Self {
        Self {
            api,
            navigator,
            user: None,
            loading: false,
            error: None,
        }
    }

    // ===== Computed helpers =====

    pub fn is_authenticated(&self) -> bool {
        self.api.session().is_authenticated()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn user_full_name(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.full_name.clone())
            .unwrap_or_default()
    }

    pub fn permissions(&self) -> &[String] {
        self.user
            .as_ref()
            .map(|u| u.permissions.as_slice())
            .unwrap_or_default()
    }

    /// Superusers hold every permission implicitly.
    pub fn has_permission(&self, permission: &str) -> bool {
        match &self.user {
            Some(user) => user.is_superuser || user.permissions.iter().any(|p| p == permission),
            None => false,
        }
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ===== Actions =====

    /// Exchange credentials for a token pair, persist it, then load the
    /// account profile.
    pub async fn login(&mut self, username: &str, password: &str) -> ApiResult<()> {
        self.loading = true;
        self.error = None;

        let login_result = self.api.auth().login(username, password).await;
        let result = match login_result {
            Ok(pair) => {
                self.api.session().set_pair(pair.access, pair.refresh);
                self.fetch_user().await
            }
            Err(e) => {
                self.error = Some(e.display_message("Login failed"));
                Err(e)
            }
        };

        self.loading = false;
        result
    }

    /// Login and remember the password in the OS keychain for
    /// `login_stored` next time.
    pub async fn login_remembering(&mut self, username: &str, password: &str) -> ApiResult<()> {
        self.login(username, password).await?;
        if let Err(e) = CredentialStore::store(username, password) {
            warn!(error = %e, "Failed to remember credentials");
        }
        Ok(())
    }

    /// Login with the password remembered for `username`.
    pub async fn login_stored(&mut self, username: &str) -> anyhow::Result<()> {
        let password = CredentialStore::get_password(username)?;
        self.login(username, &password).await?;
        Ok(())
    }

    pub async fn fetch_user(&mut self) -> ApiResult<()> {
        match self.api.users().me().await {
            Ok(user) => {
                self.user = Some(user);
                Ok(())
            }
            Err(e) => {
                self.error = Some("Failed to fetch user data".to_string());
                Err(e)
            }
        }
    }

    /// Explicitly rotate the access token ahead of expiry. Failure logs
    /// the session out.
    pub async fn refresh_access_token(&mut self) -> ApiResult<()> {
        let Some(refresh) = self.api.session().refresh_token() else {
            return Err(ApiError::Unauthorized("No refresh token available".to_string()));
        };

        let refresh_result = self.api.auth().refresh(&refresh).await;
        match refresh_result {
            Ok(tokens) => {
                self.api.session().set_access(tokens.access, tokens.refresh);
                Ok(())
            }
            Err(e) => {
                self.logout();
                Err(e)
            }
        }
    }

    pub async fn update_profile(&mut self, patch: &UserPatch) -> ApiResult<UserInfo> {
        let id = match &self.user {
            Some(user) => user.id,
            None => self.api.users().me().await?.id,
        };

        match self.api.users().update(id, patch).await {
            Ok(updated) => {
                self.user = Some(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                self.error = Some("Failed to update profile".to_string());
                Err(e)
            }
        }
    }

    /// Drop the profile and both tokens and land on the login route.
    /// Unconditional and synchronous.
    pub fn logout(&mut self) {
        self.user = None;
        self.api.session().clear();
        self.navigator.force_login();
    }

    /// Startup transition: with a persisted token, try to load the
    /// profile; an unusable token forces logout.
    pub async fn initialize(&mut self) {
        if !self.is_authenticated() {
            return;
        }
        let fetched = self.fetch_user().await;
        if let Err(e) = fetched {
            debug!(error = %e, "Stored token rejected, logging out");
            self.logout();
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    use crate::auth::Session;
    use crate::router::Route;

    use super::*;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{}", addr)
    }

    fn store_for(base: String, session: Session) -> (AuthStore, Navigator) {
        let navigator = Navigator::new(session.clone());
        let api = ApiClient::new(base, session)
            .expect("client")
            .with_navigator(navigator.clone());
        (AuthStore::new(api, navigator.clone()), navigator)
    }

    #[tokio::test]
    async fn login_stores_tokens_and_profile() {
        let router = Router::new()
            .route(
                "/auth/login/",
                post(|Json(body): Json<serde_json::Value>| async move {
                    assert_eq!(body["username"], "anna");
                    Json(json!({"access": "acc-1", "refresh": "ref-1"}))
                }),
            )
            .route(
                "/users/me/",
                get(|| async {
                    Json(json!({
                        "id": 5,
                        "username": "anna",
                        "full_name": "Anna Berg",
                        "permissions": ["members.view_member"],
                        "is_superuser": false
                    }))
                }),
            );
        let base = spawn(router).await;

        let session = Session::in_memory();
        let (mut store, _) = store_for(base, session.clone());

        store.login("anna", "pw").await.expect("login");
        assert_eq!(session.access_token().as_deref(), Some("acc-1"));
        assert_eq!(session.refresh_token().as_deref(), Some("ref-1"));
        assert_eq!(store.user_full_name(), "Anna Berg");
        assert!(store.has_permission("members.view_member"));
        assert!(!store.has_permission("members.delete_member"));
        assert!(store.error().is_none());
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn failed_login_surfaces_the_server_detail() {
        let router = Router::new().route(
            "/auth/login/",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "No active account found"})),
                )
            }),
        );
        let base = spawn(router).await;

        let session = Session::in_memory();
        let (mut store, _) = store_for(base, session.clone());

        store.login("anna", "wrong").await.expect_err("login should fail");
        assert_eq!(store.error(), Some("No active account found"));
        assert!(!store.is_authenticated());
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn initialize_logs_out_when_the_stored_token_is_rejected() {
        let router = Router::new().route(
            "/users/me/",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "Given token not valid"})),
                )
            }),
        );
        let base = spawn(router).await;

        let session = Session::in_memory();
        session.set_access("stale-token".into(), None);
        let (mut store, navigator) = store_for(base, session.clone());

        store.initialize().await;
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
        assert_eq!(navigator.current(), Route::Login);
    }

    #[tokio::test]
    async fn superusers_hold_every_permission() {
        let router = Router::new().route(
            "/users/me/",
            get(|| async {
                Json(json!({
                    "id": 1,
                    "username": "root",
                    "full_name": "Root",
                    "permissions": [],
                    "is_superuser": true
                }))
            }),
        );
        let base = spawn(router).await;

        let session = Session::in_memory();
        session.set_access("acc".into(), None);
        let (mut store, _) = store_for(base, session);

        store.initialize().await;
        assert!(store.has_permission("anything.at_all"));
    }

    #[tokio::test]
    async fn refresh_failure_logs_the_session_out() {
        let router = Router::new().route(
            "/auth/refresh/",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "Token is blacklisted"})),
                )
            }),
        );
        let base = spawn(router).await;

        let session = Session::in_memory();
        session.set_pair("acc".into(), "ref".into());
        let (mut store, navigator) = store_for(base, session.clone());

        store
            .refresh_access_token()
            .await
            .expect_err("refresh should fail");
        assert!(!session.is_authenticated());
        assert_eq!(navigator.current(), Route::Login);
    }
}
