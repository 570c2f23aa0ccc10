//! Todo Endpoints

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use super::{ApiClient, HttpMethod};
use crate::error::AppResult;
use crate::models::{SortKey, TodoId, TodoItem, TodoPatch, UserId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoArgs<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub user_id: UserId,
    pub due_date: NaiveDate,
}

pub async fn list_todos(api: &ApiClient, user_id: UserId, sort: SortKey) -> AppResult<Vec<TodoItem>> {
    // Both values are URL-safe: a number and a fixed key
    let endpoint = format!("/api/todos/user?userId={}&sortBy={}", user_id, sort.as_query());
    // A null body means the user has no todos yet
    let todos: Option<Vec<TodoItem>> = api
        .call_as::<Value, _>(&endpoint, HttpMethod::Get, None, true)
        .await?;
    Ok(todos.unwrap_or_default())
}

pub async fn create_todo(api: &ApiClient, args: &CreateTodoArgs<'_>) -> AppResult<TodoItem> {
    api.call_as("/api/todos", HttpMethod::Post, Some(args), true).await
}

pub async fn update_todo(api: &ApiClient, id: TodoId, patch: &TodoPatch) -> AppResult<TodoItem> {
    api.call_as(&format!("/api/todos/{}", id), HttpMethod::Put, Some(patch), true)
        .await
}

pub async fn delete_todo(api: &ApiClient, id: TodoId) -> AppResult<()> {
    api.call(&format!("/api/todos/{}", id), HttpMethod::Delete, None, true)
        .await
        .map(|_| ())
}
