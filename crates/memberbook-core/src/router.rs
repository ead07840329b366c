//! Route table and navigation guard.
//!
//! Every route requires authentication unless explicitly marked otherwise;
//! the guard redirects unauthenticated visitors to the login route and
//! authenticated visitors away from it. Permission-based restriction is
//! not enforced here - views consult the auth store directly.

use std::sync::{Arc, RwLock};

use crate::auth::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Members,
    MemberCreate,
    MemberDetail(i64),
    MemberEdit(i64),
    Parents,
    ParentCreate,
    ParentEdit(i64),
    Servicebook,
    Inventory,
    Orders,
    Qualifications,
    Settings,
    Profile,
}

impl Route {
    /// Only the login route is reachable without a session.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/".to_string(),
            Route::Members => "/members".to_string(),
            Route::MemberCreate => "/members/create".to_string(),
            Route::MemberDetail(id) => format!("/members/{}", id),
            Route::MemberEdit(id) => format!("/members/{}/edit", id),
            Route::Parents => "/parents".to_string(),
            Route::ParentCreate => "/parents/create".to_string(),
            Route::ParentEdit(id) => format!("/parents/{}/edit", id),
            Route::Servicebook => "/servicebook".to_string(),
            Route::Inventory => "/inventory".to_string(),
            Route::Orders => "/orders".to_string(),
            Route::Qualifications => "/qualifications".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }
}

/// Guard decision for one navigation attempt.
pub fn resolve(target: Route, authenticated: bool) -> Route {
    if target.requires_auth() && !authenticated {
        Route::Login
    } else if target == Route::Login && authenticated {
        Route::Dashboard
    } else {
        target
    }
}

/// Shared navigation handle. Components navigate through it and the
/// token-refresh failure path uses it to force the login route.
#[derive(Clone)]
pub struct Navigator {
    session: Session,
    current: Arc<RwLock<Route>>,
}

impl Navigator {
    /// Start at the dashboard, subject to the guard.
    pub fn new(session: Session) -> Self {
        let initial = resolve(Route::Dashboard, session.is_authenticated());
        Self {
            session,
            current: Arc::new(RwLock::new(initial)),
        }
    }

    /// Run the guard for `target` and move to whatever route it lands on.
    pub fn navigate(&self, target: Route) -> Route {
        let landed = resolve(target, self.session.is_authenticated());
        *self.current.write().expect("navigator lock poisoned") = landed;
        landed
    }

    /// Unconditional jump to the login route (logout, refresh failure).
    pub fn force_login(&self) {
        *self.current.write().expect("navigator lock poisoned") = Route::Login;
    }

    pub fn current(&self) -> Route {
        *self.current.read().expect("navigator lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_route_redirects_anonymous_to_login() {
        assert_eq!(resolve(Route::Members, false), Route::Login);
        assert_eq!(resolve(Route::MemberDetail(3), false), Route::Login);
        assert_eq!(resolve(Route::Settings, false), Route::Login);
    }

    #[test]
    fn login_redirects_authenticated_to_dashboard() {
        assert_eq!(resolve(Route::Login, true), Route::Dashboard);
    }

    #[test]
    fn allowed_navigation_passes_through() {
        assert_eq!(resolve(Route::Login, false), Route::Login);
        assert_eq!(resolve(Route::Parents, true), Route::Parents);
    }

    #[test]
    fn navigator_tracks_guarded_route() {
        let session = Session::in_memory();
        let nav = Navigator::new(session.clone());
        assert_eq!(nav.current(), Route::Login);

        session.set_pair("acc".into(), "ref".into());
        assert_eq!(nav.navigate(Route::Members), Route::Members);

        session.clear();
        assert_eq!(nav.navigate(Route::Members), Route::Login);
    }

    #[test]
    fn route_paths_match_the_route_table() {
        assert_eq!(Route::MemberEdit(9).path(), "/members/9/edit");
        assert_eq!(Route::Dashboard.path(), "/");
        assert_eq!(Route::Login.path(), "/login");
    }
}
