//! Todo List
//!
//! Working-set controller, form drafts and urgency classification.

mod controller;
mod draft;
mod urgency;

pub use controller::{settle_ties, Committed, ConfirmedDelete, PendingDelete, TodoListController};
pub use draft::{format_date_input, parse_date_input, EditDraft, NewTodo};
pub use urgency::{classify, Urgency, DUE_SOON_DAYS};
