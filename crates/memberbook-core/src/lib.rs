//! memberbook-core - client-side core of the memberbook application.
//!
//! Everything underneath the UI of a membership-management client:
//!
//! - `api`: typed REST client with bearer auth and single-flight 401
//!   token refresh-and-replay
//! - `auth`: the persisted token session, keychain credentials, and the
//!   login/logout/refresh/initialize lifecycle
//! - `stores`: CRUD domain state for the members and parents areas
//! - `router`: route table and navigation guard
//! - `forms`: schema-driven dynamic fields, the stock-transaction form,
//!   and debounced generation-guarded search
//! - `models`: the wire types
//!
//! Wiring it together:
//!
//! ```no_run
//! use memberbook_core::{ApiClient, AuthStore, Config, Navigator, Session};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let session = Session::open(config.data_dir()?)?;
//! let navigator = Navigator::new(session.clone());
//! let api = ApiClient::new(config.api_url(), session)?.with_navigator(navigator.clone());
//!
//! let mut auth = AuthStore::new(api.clone(), navigator);
//! auth.initialize().await;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod forms;
pub mod models;
pub mod router;
pub mod stores;

pub use api::{ApiClient, ApiError, ApiResult};
pub use auth::{AuthStore, CredentialStore, Session};
pub use config::Config;
pub use router::{Navigator, Route};
pub use stores::{MembersStore, ParentsStore};
