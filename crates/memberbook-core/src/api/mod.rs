//! REST API client for the membership backend.
//!
//! `client` carries the shared transport (bearer injection plus the
//! single-flight 401 refresh-and-replay), and each resource gets one thin
//! typed wrapper module. All endpoints live under the configured base URL,
//! e.g. `https://host/api/v1`.

pub mod auth;
pub mod client;
pub mod error;
pub mod event_types;
pub mod events;
pub mod groups;
pub mod inventory;
pub mod members;
pub mod parents;
pub mod settings;
pub mod statuses;
pub mod users;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
