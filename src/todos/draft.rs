//! Todo Form Drafts
//!
//! Values typed into the add/edit forms before they become requests.

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use crate::models::{TodoId, TodoItem, TodoPatch};

pub const TITLE_REQUIRED: &str = "Title is required";

/// The add-todo form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
}

impl NewTodo {
    pub fn new(title: &str, description: &str, due_date: Option<NaiveDate>) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            due_date,
        }
    }
}

/// The edit modal, pre-filled from an existing item.
/// Dropping it is the cancel path.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
}

impl EditDraft {
    pub fn from_item(item: &TodoItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            description: item.description.clone().unwrap_or_default(),
            due_date: item.due_date,
        }
    }

    pub fn into_patch(self) -> AppResult<TodoPatch> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::validation(TITLE_REQUIRED));
        }
        Ok(TodoPatch {
            title: Some(title.to_string()),
            description: Some(self.description),
            // Always sent, so clearing the date in the form clears it on the server
            due_date: Some(self.due_date),
            is_completed: None,
        })
    }
}

/// Value of an `<input type="date">`; blank or malformed means no date
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn format_date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::date;

    fn item() -> TodoItem {
        TodoItem {
            id: 7,
            title: "Write report".into(),
            description: None,
            due_date: Some(date(2024, 1, 15)),
            is_completed: false,
            created_at: None,
        }
    }

    #[test]
    fn test_draft_prefills_from_item() {
        let draft = EditDraft::from_item(&item());
        assert_eq!(draft.id, 7);
        assert_eq!(draft.title, "Write report");
        assert_eq!(draft.description, "");
        assert_eq!(format_date_input(draft.due_date), "2024-01-15");
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut draft = EditDraft::from_item(&item());
        draft.title = "  ".into();
        assert_eq!(draft.into_patch(), Err(AppError::validation(TITLE_REQUIRED)));
    }

    #[test]
    fn test_patch_trims_title() {
        let mut draft = EditDraft::from_item(&item());
        draft.title = " Final report ".into();
        let patch = draft.into_patch().unwrap();
        assert_eq!(patch.title.as_deref(), Some("Final report"));
        assert_eq!(patch.is_completed, None);
    }

    #[test]
    fn test_cleared_date_is_sent() {
        let mut draft = EditDraft::from_item(&item());
        draft.due_date = None;
        let patch = draft.into_patch().unwrap();
        assert_eq!(patch.due_date, Some(None));
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"title": "Write report", "description": "", "dueDate": ""})
        );
    }

    #[test]
    fn test_date_input_parsing() {
        assert_eq!(parse_date_input("2024-01-10"), Some(date(2024, 1, 10)));
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("10/01/2024"), None);
    }
}
