//! Form logic behind the server-rendered inventory pages.
//!
//! Three independent pieces, matching the widgets they back:
//! - `schema`: category-schema-driven dynamic fields with a typed value
//!   per field and an attribute-map serializer
//! - `transaction`: the stock-transaction form's section rules, selection
//!   state, and stock lookups
//! - `search`: debounced remote search where only the latest keystroke
//!   generation may apply its response

pub mod schema;
pub mod search;
pub mod transaction;

pub use schema::{DynamicField, DynamicForm, FieldKind, FieldValue};
pub use search::DebouncedSearch;
pub use transaction::{Section, SectionLayout, TransactionForm, TransactionKind};
