use tracing::warn;

use crate::api::members::MemberListParams;
use crate::api::{ApiClient, ApiResult};
use crate::models::{Group, Member, MemberDraft, PageInfo, Status};

/// Client-side state for the members area: the fetched page, the entity
/// currently opened in a detail view, the status/group lookup lists, and
/// the loading/error flags views read.
///
/// Every action mirrors exactly one request's outcome into local state -
/// no optimistic updates, no conflict resolution, no retries.
pub struct MembersStore {
    api: ApiClient,
    members: Vec<Member>,
    current_member: Option<Member>,
    statuses: Vec<Status>,
    groups: Vec<Group>,
    loading: bool,
    error: Option<String>,
    pagination: PageInfo,
}

impl MembersStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            members: Vec::new(),
            current_member: None,
            statuses: Vec::new(),
            groups: Vec::new(),
            loading: false,
            error: None,
            pagination: PageInfo::default(),
        }
    }

    // ===== State accessors =====

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn current_member(&self) -> Option<&Member> {
        self.current_member.as_ref()
    }

    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
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

    // ===== Actions =====

    pub async fn fetch_members(&mut self, params: &MemberListParams) -> ApiResult<()> {
        self.loading = true;
        self.error = None;

        let result = match self.api.members().list(params).await {
            Ok(page) => {
                self.pagination = page.page_info();
                self.members = page.results;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message("Failed to fetch members"));
                Err(e)
            }
        };

        self.loading = false;
        result
    }

    pub async fn fetch_member(&mut self, id: i64) -> ApiResult<Member> {
        self.loading = true;
        self.error = None;

        let result = match self.api.members().get(id).await {
            Ok(member) => {
                self.current_member = Some(member.clone());
                Ok(member)
            }
            Err(e) => {
                self.error = Some(e.display_message("Failed to fetch member"));
                Err(e)
            }
        };

        self.loading = false;
        result
    }

    /// Create a member and prepend the server's record to the list.
    pub async fn create_member(&mut self, draft: &MemberDraft) -> ApiResult<Member> {
        self.loading = true;
        self.error = None;

        let result = match self.api.members().create(draft).await {
            Ok(member) => {
                self.members.insert(0, member.clone());
                Ok(member)
            }
            Err(e) => {
                self.error = Some(e.display_message("Failed to create member"));
                Err(e)
            }
        };

        self.loading = false;
        result
    }

    /// Patch a member and splice the server's record in at its current
    /// list position; the open detail entity follows when it matches.
    pub async fn update_member(&mut self, id: i64, draft: &MemberDraft) -> ApiResult<Member> {
        self.loading = true;
        self.error = None;

        let result = match self.api.members().update(id, draft).await {
            Ok(member) => {
                if let Some(index) = self.members.iter().position(|m| m.id == id) {
                    self.members[index] = member.clone();
                }
                if self.current_member.as_ref().map(|m| m.id) == Some(id) {
                    self.current_member = Some(member.clone());
                }
                Ok(member)
            }
            Err(e) => {
                self.error = Some(e.display_message("Failed to update member"));
                Err(e)
            }
        };

        self.loading = false;
        result
    }

    pub async fn delete_member(&mut self, id: i64) -> ApiResult<()> {
        self.loading = true;
        self.error = None;

        let result = match self.api.members().delete(id).await {
            Ok(()) => {
                self.members.retain(|m| m.id != id);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message("Failed to delete member"));
                Err(e)
            }
        };

        self.loading = false;
        result
    }

    /// Load the status lookup list. Failures leave an empty list rather
    /// than surfacing an error - the members area stays usable without it.
    pub async fn fetch_statuses(&mut self) {
        self.statuses = match self.api.statuses().list().await {
            Ok(statuses) => statuses,
            Err(e) => {
                warn!(error = %e, "Failed to fetch statuses");
                Vec::new()
            }
        };
    }

    /// Load the group lookup list, same defensive policy as statuses.
    pub async fn fetch_groups(&mut self) {
        self.groups = match self.api.groups().list().await {
            Ok(groups) => groups,
            Err(e) => {
                warn!(error = %e, "Failed to fetch groups");
                Vec::new()
            }
        };
    }

    /// Load both lookup lists concurrently.
    pub async fn load_lookups(&mut self) {
        let api = self.api.clone();
        let statuses_api = api.statuses();
        let groups_api = api.groups();
        let (statuses, groups) = futures::join!(statuses_api.list(), groups_api.list());

        self.statuses = statuses.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to fetch statuses");
            Vec::new()
        });
        self.groups = groups.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to fetch groups");
            Vec::new()
        });
    }

    pub fn reset(&mut self) {
        self.members.clear();
        self.current_member = None;
        self.statuses.clear();
        self.groups.clear();
        self.error = None;
        self.pagination = PageInfo::default();
    }
}
