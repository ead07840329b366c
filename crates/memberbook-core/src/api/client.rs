//! HTTP client for the membership REST API.
//!
//! This module provides the `ApiClient` shared by every resource wrapper.
//! It attaches the session's bearer token to each request and implements
//! the 401 handling contract: one single-flight token refresh, one replay
//! of the original request, then give up.

use std::sync::Arc;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::Session;
use crate::models::TokenRefresh;
use crate::router::Navigator;

use super::{ApiError, ApiResult};

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the membership backend.
///
/// Clone is cheap - reqwest::Client uses Arc internally for connection
/// pooling, and clones share the same session and refresh gate, so
/// concurrent 401s across clones still collapse into one refresh call.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    navigator: Option<Navigator>,
    refresh_gate: Arc<tokio::sync::Mutex<()>>,
}

impl ApiClient {
    /// Create a new API client bound to the given session.
    pub fn new(base_url: impl Into<String>, session: Session) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            navigator: None,
            refresh_gate: Arc::new(tokio::sync::Mutex::new(())),
        })
    }

    /// Attach the navigator the refresh-failure path forces to login.
    pub fn with_navigator(mut self, navigator: Navigator) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ===== Typed verb helpers used by the resource modules =====

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self
            .send_raw(Method::GET, path, None::<&()>, None::<&()>)
            .await?;
        Self::parse(response).await
    }

    pub async fn get_with<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ApiResult<T> {
        let response = self
            .send_raw(Method::GET, path, Some(query), None::<&()>)
            .await?;
        Self::parse(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .send_raw(Method::POST, path, None::<&()>, Some(body))
            .await?;
        Self::parse(response).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .send_raw(Method::PATCH, path, None::<&()>, Some(body))
            .await?;
        Self::parse(response).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send_raw(Method::DELETE, path, None::<&()>, None::<&()>)
            .await
            .map(|_| ())
    }

    // ===== Transport =====

    /// Issue one request with the current bearer token. On a 401 that has
    /// not been replayed: refresh the access token (single-flight across
    /// all clones) and replay exactly once. A 401 on the replay is
    /// returned as-is. On refresh failure the session is cleared, the
    /// navigator lands on login, and the original error is returned.
    async fn send_raw<Q: Serialize + Sync, B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> ApiResult<reqwest::Response> {
        let token = self.session.access_token();
        let response = self
            .dispatch(&method, path, query, body, token.as_deref())
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check(response).await;
        }

        let original_body = response.text().await.unwrap_or_default();
        let original = ApiError::from_status(StatusCode::UNAUTHORIZED, &original_body);

        // No refresh token: nothing to try, propagate the original error.
        if self.session.refresh_token().is_none() {
            return Err(original);
        }

        match self.refresh_access_token(token.as_deref()).await {
            Ok(fresh) => {
                debug!(path, "Replaying request with refreshed token");
                let replay = self
                    .dispatch(&method, path, query, body, Some(&fresh))
                    .await?;
                Self::check(replay).await
            }
            Err(refresh_err) => {
                warn!(error = %refresh_err, "Token refresh failed, clearing session");
                self.session.clear();
                if let Some(ref navigator) = self.navigator {
                    navigator.force_login();
                }
                Err(original)
            }
        }
    }

    async fn dispatch<Q: Serialize + Sync, B: Serialize + Sync>(
        &self,
        method: &Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
        token: Option<&str>,
    ) -> ApiResult<reqwest::Response> {
        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    /// Exchange the refresh token for a new access token. Single-flight:
    /// callers queue on the gate, and whoever enters after the token
    /// already rotated skips the network call and reuses the fresh one.
    async fn refresh_access_token(&self, stale: Option<&str>) -> ApiResult<String> {
        let _gate = self.refresh_gate.lock().await;

        if let Some(current) = self.session.access_token() {
            if stale != Some(current.as_str()) {
                debug!("Access token already refreshed by a concurrent request");
                return Ok(current);
            }
        }

        let refresh = self
            .session
            .refresh_token()
            .ok_or_else(|| ApiError::Unauthorized(String::new()))?;

        // Direct call with the bare client: the refresh endpoint must never
        // recurse into the 401 handling above.
        let response = self
            .http
            .post(self.url("/auth/refresh/"))
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await?;
        let response = Self::check(response).await?;
        let tokens: TokenRefresh = Self::parse(response).await?;

        self.session
            .set_access(tokens.access.clone(), tokens.refresh);
        Ok(tokens.access)
    }

    /// Map non-success statuses into the error taxonomy.
    async fn check(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::router::Route;

    use super::*;

    fn bearer(headers: &HeaderMap) -> Option<&str> {
        headers
            .get("authorization")?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
    }

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

    /// A route that accepts exactly one bearer token and answers 401 with a
    /// DRF-style detail body otherwise.
    fn protected(accepted: &'static str) -> axum::routing::MethodRouter {
        get(move |headers: HeaderMap| async move {
            if bearer(&headers) == Some(accepted) {
                (StatusCode::OK, Json(json!({"ok": true}))).into_response()
            } else {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "Given token not valid"})),
                )
                    .into_response()
            }
        })
    }

    fn counting_refresh(
        calls: Arc<AtomicUsize>,
        grant: &'static str,
    ) -> axum::routing::MethodRouter {
        post(move |Json(body): Json<Value>| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            assert!(body["refresh"].is_string(), "refresh call must carry the refresh token");
            Json(json!({"access": grant}))
        })
    }

    #[tokio::test]
    async fn requests_carry_the_stored_bearer_token() {
        let router = Router::new().route(
            "/echo/",
            get(|headers: HeaderMap| async move {
                Json(json!({"token": bearer(&headers).unwrap_or("")}))
            }),
        );
        let base = spawn(router).await;

        let session = Session::in_memory();
        session.set_pair("acc-1".into(), "ref-1".into());
        let client = ApiClient::new(base, session).expect("client");

        let echoed: Value = client.get("/echo/").await.expect("echo");
        assert_eq!(echoed["token"], "acc-1");
    }

    #[tokio::test]
    async fn a_401_refreshes_once_and_replays_with_the_new_token() {
        let refresh_calls = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route("/members/", protected("acc-new"))
            .route("/auth/refresh/", counting_refresh(refresh_calls.clone(), "acc-new"));
        let base = spawn(router).await;

        let session = Session::in_memory();
        session.set_pair("acc-old".into(), "ref-1".into());
        let client = ApiClient::new(base, session.clone()).expect("client");

        let value: Value = client.get("/members/").await.expect("replay should succeed");
        assert_eq!(value["ok"], true);
        assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.access_token().as_deref(), Some("acc-new"));
    }

    #[tokio::test]
    async fn a_401_on_the_replay_does_not_refresh_again() {
        let refresh_calls = Arc::new(AtomicUsize::new(0));
        // The protected route never accepts the refreshed token either.
        let router = Router::new()
            .route("/members/", protected("never-granted"))
            .route("/auth/refresh/", counting_refresh(refresh_calls.clone(), "acc-new"));
        let base = spawn(router).await;

        let session = Session::in_memory();
        session.set_pair("acc-old".into(), "ref-1".into());
        let client = ApiClient::new(base, session).expect("client");

        let err = client
            .get::<Value>("/members/")
            .await
            .expect_err("replay should fail");
        assert!(err.is_unauthorized());
        assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refresh_failure_clears_storage_and_lands_on_login() {
        let router = Router::new()
            .route("/members/", protected("acc-new"))
            .route(
                "/auth/refresh/",
                post(|| async {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"detail": "Token is blacklisted"})),
                    )
                }),
            );
        let base = spawn(router).await;

        let dir = tempfile::tempdir().expect("tempdir");
        let session = Session::open(dir.path().to_path_buf()).expect("session");
        session.set_pair("acc-old".into(), "ref-1".into());
        let navigator = Navigator::new(session.clone());
        assert_eq!(navigator.navigate(Route::Members), Route::Members);

        let client = ApiClient::new(base, session.clone())
            .expect("client")
            .with_navigator(navigator.clone());

        let err = client
            .get::<Value>("/members/")
            .await
            .expect_err("original error should propagate");
        assert!(err.is_unauthorized());
        assert!(session.access_token().is_none());
        assert!(session.refresh_token().is_none());
        assert!(!dir.path().join("session.json").exists());
        assert_eq!(navigator.current(), Route::Login);
    }

    #[tokio::test]
    async fn a_401_without_a_refresh_token_propagates_unchanged() {
        let refresh_calls = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route("/members/", protected("acc-new"))
            .route("/auth/refresh/", counting_refresh(refresh_calls.clone(), "acc-new"));
        let base = spawn(router).await;

        let session = Session::in_memory();
        session.set_access("acc-old".into(), None);
        let client = ApiClient::new(base, session).expect("client");

        let err = client
            .get::<Value>("/members/")
            .await
            .expect_err("401 should propagate");
        assert!(err.is_unauthorized());
        assert_eq!(refresh_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrent_401s_collapse_into_one_refresh() {
        let refresh_calls = Arc::new(AtomicUsize::new(0));
        let calls = refresh_calls.clone();
        let router = Router::new()
            .route("/members/", protected("acc-new"))
            .route(
                "/auth/refresh/",
                post(move |Json(_): Json<Value>| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    // Hold the refresh open long enough for every other
                    // request to queue up on the gate.
                    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                    Json(json!({"access": "acc-new"}))
                }),
            );
        let base = spawn(router).await;

        let session = Session::in_memory();
        session.set_pair("acc-old".into(), "ref-1".into());
        let client = ApiClient::new(base, session).expect("client");

        let requests = (0..5).map(|_| {
            let client = client.clone();
            async move { client.get::<Value>("/members/").await }
        });
        let outcomes = futures::future::join_all(requests).await;

        for outcome in outcomes {
            assert_eq!(outcome.expect("request should succeed")["ok"], true);
        }
        assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn error_bodies_surface_server_detail() {
        let router = Router::new().route(
            "/members/",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"detail": "Nicht gefunden."})),
                )
            }),
        );
        let base = spawn(router).await;

        let session = Session::in_memory();
        session.set_pair("acc".into(), "ref".into());
        let client = ApiClient::new(base, session).expect("client");

        let err = client
            .get::<Value>("/members/")
            .await
            .expect_err("404 should map to NotFound");
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.display_message("fallback"), "Nicht gefunden.");
    }
}
