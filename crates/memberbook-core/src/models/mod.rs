//! Data models for membership entities.
//!
//! This module contains all the data structures exchanged with the
//! membership REST API:
//!
//! - `Member`, `Parent`: person records with contact info
//! - `Status`, `Group`: membership lookup tables
//! - `Event`, `EventType`: the per-member service log
//! - `UserInfo`, `AppSettings`: the authenticated account and app config
//! - Inventory lookups: item/variant search hits, locations, stock
//! - `Paginated`: the uniform `{count, next, previous, results}` wrapper

pub mod event;
pub mod inventory;
pub mod member;
pub mod organization;
pub mod page;
pub mod parent;
pub mod user;

pub use event::{Event, EventDraft, EventType};
pub use inventory::{
    CategorySchemaResponse, ItemHit, ItemSearchResponse, LocationHit, SearchEntry, SearchTarget,
    StockReport, StockRow, VariantHit,
};
pub use member::{Member, MemberDraft, MemberStatistics};
pub use organization::{Group, Status};
pub use page::{ListOrPage, PageInfo, Paginated};
pub use parent::{Parent, ParentDraft};
pub use user::{AppSettings, TokenPair, TokenRefresh, UserInfo, UserPatch};
