use crate::api::members::MemberListParams;
use crate::api::{ApiClient, ApiResult};
use crate::models::{PageInfo, Parent, ParentDraft};

/// Client-side state for the parents area. Same shape and reconciliation
/// policy as `MembersStore`: each action mirrors one request's outcome.
pub struct ParentsStore {
    api: ApiClient,
    parents: Vec<Parent>,
    current_parent: Option<Parent>,
    loading: bool,
    error: Option<String>,
    pagination: PageInfo,
}

impl ParentsStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            parents: Vec::new(),
            current_parent: None,
            loading: false,
            error: None,
            pagination: PageInfo::default(),
        }
    }

    pub fn parents(&self) -> &[Parent] {
        &self.parents
    }

    pub fn current_parent(&self) -> Option<&Parent> {
        self.current_parent.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pagination(&self) -> &PageInfo {
        &self.pagination
    }

    pub async fn fetch_parents(&mut self, params: &MemberListParams) -> ApiResult<()> {
        self.loading = true;
        self.error = None;

        let result = match self.api.parents().list(params).await {
            Ok(page) => {
                self.pagination = page.page_info();
                self.parents = page.results;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message("Failed to fetch parents"));
                Err(e)
            }
        };

        self.loading = false;
        result
    }

    pub async fn fetch_parent(&mut self, id: i64) -> ApiResult<Parent> {
        self.loading = true;
        self.error = None;

        let result = match self.api.parents().get(id).await {
            Ok(parent) => {
                self.current_parent = Some(parent.clone());
                Ok(parent)
            }
            Err(e) => {
                self.error = Some(e.display_message("Failed to fetch parent"));
                Err(e)
            }
        };

        self.loading = false;
        result
    }

    pub async fn create_parent(&mut self, draft: &ParentDraft) -> ApiResult<Parent> {
        self.loading = true;
        self.error = None;

        let result = match self.api.parents().create(draft).await {
            Ok(parent) => {
                self.parents.insert(0, parent.clone());
                Ok(parent)
            }
            Err(e) => {
                self.error = Some(e.display_message("Failed to create parent"));
                Err(e)
            }
        };

        self.loading = false;
        result
    }

    pub async fn update_parent(&mut self, id: i64, draft: &ParentDraft) -> ApiResult<Parent> {
        self.loading = true;
        self.error = None;

        let result = match self.api.parents().update(id, draft).await {
            Ok(parent) => {
                if let Some(index) = self.parents.iter().position(|p| p.id == id) {
                    self.parents[index] = parent.clone();
                }
                if self.current_parent.as_ref().map(|p| p.id) == Some(id) {
                    self.current_parent = Some(parent.clone());
                }
                Ok(parent)
            }
            Err(e) => {
                self.error = Some(e.display_message("Failed to update parent"));
                Err(e)
            }
        };

        self.loading = false;
        result
    }

    pub async fn delete_parent(&mut self, id: i64) -> ApiResult<()> {
        self.loading = true;
        self.error = None;

        let result = match self.api.parents().delete(id).await {
            Ok(()) => {
                self.parents.retain(|p| p.id != id);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message("Failed to delete parent"));
                Err(e)
            }
        };

        self.loading = false;
        result
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::{delete, patch, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::auth::Session;

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

    fn store_for(base: String) -> ParentsStore {
        let session = Session::in_memory();
        session.set_pair("acc".into(), "ref".into());
        ParentsStore::new(ApiClient::new(base, session).expect("client"))
    }

    fn parent_json(id: i64, name: &str) -> Value {
        json!({"id": id, "name": name, "lastname": "Test", "children": []})
    }

    fn seeded(mut store: ParentsStore, ids: &[i64]) -> ParentsStore {
        store.parents = ids
            .iter()
            .map(|id| {
                serde_json::from_value(parent_json(*id, &format!("P{}", id))).expect("parent")
            })
            .collect();
        store
    }

    #[tokio::test]
    async fn create_prepends_and_delete_filters() {
        let router = Router::new()
            .route("/parents/", post(|| async { Json(parent_json(50, "Neu")) }))
            .route(
                "/parents/:id/",
                delete(|| async { StatusCode::NO_CONTENT }),
            );
        let base = spawn(router).await;
        let mut store = seeded(store_for(base), &[7, 8]);

        store
            .create_parent(&ParentDraft::default())
            .await
            .expect("create");
        assert_eq!(store.parents()[0].id, 50);

        store.delete_parent(8).await.expect("delete");
        let remaining: Vec<i64> = store.parents().iter().map(|p| p.id).collect();
        assert_eq!(remaining, vec![50, 7]);
    }

    #[tokio::test]
    async fn update_follows_the_current_entity() {
        let router = Router::new().route(
            "/parents/:id/",
            patch(|| async { Json(parent_json(7, "Geaendert")) }),
        );
        let base = spawn(router).await;
        let mut store = seeded(store_for(base), &[7]);
        store.current_parent =
            Some(serde_json::from_value(parent_json(7, "P7")).expect("parent"));

        store
            .update_parent(7, &ParentDraft::default())
            .await
            .expect("update");
        assert_eq!(store.parents()[0].name, "Geaendert");
        assert_eq!(
            store.current_parent().map(|p| p.name.as_str()),
            Some("Geaendert")
        );
    }

    #[tokio::test]
    async fn failure_records_the_fallback_message() {
        let router = Router::new().route(
            "/parents/",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn(router).await;
        let mut store = store_for(base);

        store
            .create_parent(&ParentDraft::default())
            .await
            .expect_err("create should fail");
        assert_eq!(store.error(), Some("Failed to create parent"));
        assert!(store.parents().is_empty());
    }
}
