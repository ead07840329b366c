//! Client-side domain state.
//!
//! Each store holds one area's list, an optional "current" entity,
//! loading/error flags, and pagination metadata. Actions wrap exactly one
//! API call and reconcile local state with its outcome: assign on fetch,
//! prepend on create, splice-replace by id on update, filter-out on
//! delete. Failures record a display message and re-propagate so callers
//! can react.

pub mod members;
pub mod parents;

pub use members::MembersStore;
pub use parents::ParentsStore;
