//! # Todo ハンドラ
//!
//! Todo の JSON ビューと、Todo 固有の説明文更新。
//!
//! ## エンドポイント
//!
//! - `GET /todo`, `POST /todo` - 一覧・作成（[`super::resource`]）
//! - `PUT /todo/{id}` - 説明文の更新
//! - `PUT /todo/{id}/complete` - 完了
//! - `DELETE /todo/{id}` - 論理削除

use std::sync::Arc;

use axum::{
   extract::{Path, State},
   http::StatusCode,
};
use chrono::{DateTime, Utc};
use examdesk_domain::{
   Resource,
   todo::{NewTodo, Todo, TodoId},
};
use examdesk_infra::repository::TodoRepository;
use serde::{Deserialize, Serialize};

use super::resource::{ResourceApi, ResourceState, not_found, parse_id};
use crate::{error::ApiError, json::JsonBody};

/// Todo 作成リクエスト
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoRequest {
   pub description: String,
}

/// Todo 更新リクエスト
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoRequest {
   pub description: String,
}

/// Todo の JSON ビュー
///
/// `archivedAt` は含めない（一覧にはアクティブな Todo しか現れない）。
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
   pub id:           TodoId,
   pub description:  String,
   pub created_at:   DateTime<Utc>,
   #[serde(skip_serializing_if = "Option::is_none", default)]
   pub completed_at: Option<DateTime<Utc>>,
}

impl ResourceApi for Todo {
   type CreateRequest = CreateTodoRequest;
   type Response = TodoResponse;

   fn from_create_request(request: CreateTodoRequest, now: DateTime<Utc>) -> Self {
      Todo::new(NewTodo {
         id: TodoId::new(),
         description: request.description,
         now,
      })
   }

   fn to_response(&self) -> TodoResponse {
      TodoResponse {
         id:           *self.id(),
         description:  self.description().to_string(),
         created_at:   self.created_at(),
         completed_at: self.completed_at(),
      }
   }
}

/// PUT /todo/{id}
///
/// ## レスポンス
///
/// - `204 No Content`: 更新成功
/// - `400 Bad Request`: ボディを解釈できない
/// - `404 Not Found`: アクティブな Todo が存在しない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_todo<Repo>(
   State(state): State<Arc<ResourceState<Repo>>>,
   Path(id): Path<String>,
   JsonBody(request): JsonBody<UpdateTodoRequest>,
) -> Result<StatusCode, ApiError>
where
   Repo: TodoRepository,
{
   let todo_id = parse_id::<Todo>(&id)?;

   if !state
      .repository
      .update_description(&todo_id, &request.description)
      .await?
   {
      return Err(not_found::<Todo>(todo_id));
   }

   Ok(StatusCode::NO_CONTENT)
}
