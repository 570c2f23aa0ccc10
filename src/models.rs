//! Frontend Models
//!
//! Data structures matching the backend's JSON entities (camelCase on the wire).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type TodoId = u64;
pub type UserId = u64;

/// Todo item (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar date only; a full timestamp on the wire is cut to its date part
    #[serde(default, alias = "due_date", with = "calendar_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Cached user profile (matches backend)
///
/// Login responses may carry only part of the profile, so everything but
/// the id is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_timestamp")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl UserSnapshot {
    /// "First Last", or "No Name" when both are blank
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            "No Name".to_string()
        } else {
            full.to_string()
        }
    }

    /// Avatar letter
    pub fn initial(&self) -> char {
        self.first_name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }

    pub fn greeting_name(&self) -> &str {
        if self.first_name.is_empty() {
            "user"
        } else {
            &self.first_name
        }
    }
}

/// Server-side ordering of the todo list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    CreationTime,
    DueDate,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::CreationTime, SortKey::DueDate];

    /// Value of the `sortBy` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            SortKey::CreationTime => "createdAt",
            SortKey::DueDate => "dueDate",
        }
    }

    pub fn from_query(s: &str) -> Self {
        match s {
            "dueDate" => SortKey::DueDate,
            _ => SortKey::CreationTime,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::CreationTime => "Newest",
            SortKey::DueDate => "Due date",
        }
    }
}

/// Partial todo update, only `Some` fields are sent.
/// `due_date: Some(None)` clears the date (sent as `""`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "patch_date")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

/// Editable profile fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: String,
}

impl ProfileUpdate {
    pub fn from_user(user: &UserSnapshot) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            bio: user.bio.clone().unwrap_or_default(),
        }
    }
}

fn patch_date<S: serde::Serializer>(date: &Option<Option<NaiveDate>>, s: S) -> Result<S::Ok, S::Error> {
    match date.flatten() {
        Some(d) => s.serialize_str(&d.format("%Y-%m-%d").to_string()),
        None => s.serialize_str(""),
    }
}

/// Accepts `YYYY-MM-DD`, a full ISO timestamp, an empty string or null
mod calendar_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        let Some(raw) = raw else { return Ok(None) };
        let date_part = raw.split('T').next().unwrap_or_default().trim();
        if date_part.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map(Some)
            .map_err(de::Error::custom)
    }
}

/// RFC 3339 timestamps; anything unparseable reads as absent
mod lenient_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match ts {
            Some(t) => s.serialize_str(&t.to_rfc3339()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(raw.and_then(|r| {
            DateTime::parse_from_rfc3339(&r)
                .ok()
                .map(|t| t.with_timezone(&Utc))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_todo_due_date_from_timestamp() {
        let item: TodoItem = serde_json::from_value(json!({
            "id": 4,
            "title": "Pay rent",
            "dueDate": "2024-02-01T00:00:00.000Z",
            "createdAt": "2024-01-05T09:30:00.000Z"
        }))
        .unwrap();
        assert_eq!(item.due_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert!(!item.is_completed);
        assert!(item.created_at.is_some());
    }

    #[test]
    fn test_todo_legacy_due_date_key() {
        let item: TodoItem = serde_json::from_value(json!({
            "id": 5,
            "title": "Old row",
            "due_date": "2024-03-09",
            "isCompleted": true
        }))
        .unwrap();
        assert_eq!(item.due_date, NaiveDate::from_ymd_opt(2024, 3, 9));
        assert!(item.is_completed);
    }

    #[test]
    fn test_todo_blank_and_null_due_date() {
        let blank: TodoItem =
            serde_json::from_value(json!({"id": 1, "title": "a", "dueDate": ""})).unwrap();
        let null: TodoItem =
            serde_json::from_value(json!({"id": 2, "title": "b", "dueDate": null})).unwrap();
        assert_eq!(blank.due_date, None);
        assert_eq!(null.due_date, None);
    }

    #[test]
    fn test_partial_user_snapshot() {
        let user: UserSnapshot =
            serde_json::from_value(json!({"id": 1, "firstName": "A"})).unwrap();
        assert_eq!(user.first_name, "A");
        assert_eq!(user.last_name, "");
        assert_eq!(user.created_at, None);
        assert_eq!(user.display_name(), "A");
        assert_eq!(user.initial(), 'A');
    }

    #[test]
    fn test_display_name_fallbacks() {
        let user = UserSnapshot::default();
        assert_eq!(user.display_name(), "No Name");
        assert_eq!(user.initial(), 'U');
        assert_eq!(user.greeting_name(), "user");
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = TodoPatch {
            is_completed: Some(true),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"isCompleted": true}));

        let patch = TodoPatch {
            title: Some("New".into()),
            due_date: Some(NaiveDate::from_ymd_opt(2024, 1, 12)),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"title": "New", "dueDate": "2024-01-12"})
        );
    }

    #[test]
    fn test_patch_cleared_due_date_is_sent_blank() {
        let patch = TodoPatch {
            due_date: Some(None),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"dueDate": ""}));
    }

    #[test]
    fn test_sort_key_query_values() {
        assert_eq!(SortKey::CreationTime.as_query(), "createdAt");
        assert_eq!(SortKey::from_query("dueDate"), SortKey::DueDate);
        assert_eq!(SortKey::from_query("garbage"), SortKey::CreationTime);
    }
}
