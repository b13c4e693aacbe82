//! # リソース共通ハンドラ
//!
//! Todo と User に共通する HTTP 操作を、リソース型についてジェネリックに実装する。
//!
//! ## エンドポイント（`{name}` は [`Resource::NAME`]）
//!
//! - `GET /{name}` - アクティブなレコードの一覧
//! - `POST /{name}` - レコード作成
//! - `PUT /{name}/{id}/{transition}` - 状態遷移（complete / approve）
//! - `DELETE /{name}/{id}` - 論理削除
//!
//! 状態遷移と論理削除はアーカイブ済みの行にも適用する。
//! 該当する行が存在しない場合は 404 を返す。

use std::sync::Arc;

use axum::{
   extract::{Path, State},
   http::{StatusCode, header},
   response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use examdesk_domain::{Resource, clock::Clock};
use examdesk_infra::repository::ResourceRepository;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
   error::ApiError,
   json::{JsonBody, json_response},
};

/// HTTP で公開するリソース
///
/// 作成リクエストと JSON ビューの型を対応付ける。
pub trait ResourceApi: Resource {
   /// `POST /{name}` のリクエストボディ
   type CreateRequest: DeserializeOwned + Send + 'static;

   /// 一覧で返す JSON ビュー
   type Response: Serialize + Send;

   /// 作成リクエストから新しいレコードを組み立てる（ID はここで採番する）
   fn from_create_request(request: Self::CreateRequest, now: DateTime<Utc>) -> Self;

   fn to_response(&self) -> Self::Response;
}

/// リソース API の共有状態
pub struct ResourceState<Repo> {
   pub repository: Repo,
   pub clock:      Arc<dyn Clock>,
}

impl<Repo> ResourceState<Repo> {
   pub fn new(repository: Repo, clock: Arc<dyn Clock>) -> Self {
      Self { repository, clock }
   }
}

/// パスの ID を解釈する
///
/// UUID として解釈できない ID に一致する行は存在しないため、404 として扱う。
pub(crate) fn parse_id<R: Resource>(raw: &str) -> Result<R::Id, ApiError> {
   Uuid::parse_str(raw)
      .map(Into::into)
      .map_err(|_| not_found::<R>(raw))
}

pub(crate) fn not_found<R: Resource>(id: impl std::fmt::Display) -> ApiError {
   ApiError::NotFound(format!("{} {} は存在しません", R::NAME, id))
}

/// GET /{name}
///
/// アクティブなレコードを作成日時順で返す。0 件の場合は `[]`。
#[tracing::instrument(skip_all, fields(resource = <Repo::Resource as Resource>::NAME))]
pub async fn list<Repo>(State(state): State<Arc<ResourceState<Repo>>>) -> Result<Response, ApiError>
where
   Repo: ResourceRepository,
   Repo::Resource: ResourceApi,
{
   let records = state.repository.find_active().await?;

   let items: Vec<<Repo::Resource as ResourceApi>::Response> =
      records.iter().map(|record| record.to_response()).collect();

   json_response(&items)
}

/// POST /{name}
///
/// ## レスポンス
///
/// - `201 Created`: ボディなし、`Location: /{name}/{id}`
/// - `400 Bad Request`: ボディを解釈できない（行は作成されない）
#[tracing::instrument(skip_all, fields(resource = <Repo::Resource as Resource>::NAME))]
pub async fn create<Repo>(
   State(state): State<Arc<ResourceState<Repo>>>,
   JsonBody(request): JsonBody<<Repo::Resource as ResourceApi>::CreateRequest>,
) -> Result<Response, ApiError>
where
   Repo: ResourceRepository,
   Repo::Resource: ResourceApi,
{
   let record =
      <Repo::Resource as ResourceApi>::from_create_request(request, state.clock.now());

   state.repository.insert(&record).await?;

   let location = format!("/{}/{}", <Repo::Resource as Resource>::NAME, record.id());
   tracing::info!(%location, "作成しました");

   Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// PUT /{name}/{id}/{transition}
///
/// 状態遷移のタイムスタンプを現在時刻で上書きする。
///
/// ## レスポンス
///
/// - `204 No Content`: 成功（アーカイブ済みのレコードも更新する）
/// - `404 Not Found`: レコードが存在しない
#[tracing::instrument(skip_all, fields(resource = <Repo::Resource as Resource>::NAME, %id))]
pub async fn transition<Repo>(
   State(state): State<Arc<ResourceState<Repo>>>,
   Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
   Repo: ResourceRepository,
{
   let record_id = parse_id::<Repo::Resource>(&id)?;

   if !state
      .repository
      .transition(&record_id, state.clock.now())
      .await?
   {
      return Err(not_found::<Repo::Resource>(record_id));
   }

   Ok(StatusCode::NO_CONTENT)
}

/// DELETE /{name}/{id}
///
/// `archived_at` を現在時刻で上書きする（論理削除）。削除済みでも 204 を返す。
#[tracing::instrument(skip_all, fields(resource = <Repo::Resource as Resource>::NAME, %id))]
pub async fn archive<Repo>(
   State(state): State<Arc<ResourceState<Repo>>>,
   Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
   Repo: ResourceRepository,
{
   let record_id = parse_id::<Repo::Resource>(&id)?;

   if !state
      .repository
      .archive(&record_id, state.clock.now())
      .await?
   {
      return Err(not_found::<Repo::Resource>(record_id));
   }

   Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
   use examdesk_domain::{todo::Todo, user::User};
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_uuidとして解釈できるidはリソースのid型になる() {
      let uuid = Uuid::now_v7();

      let id = parse_id::<Todo>(&uuid.to_string()).unwrap();

      assert_eq!(id.as_uuid(), &uuid);
   }

   #[test]
   fn test_uuidでないidは404になる() {
      let error = parse_id::<User>("not-a-uuid").unwrap_err();

      assert!(
         matches!(error, ApiError::NotFound(ref detail) if detail == "user not-a-uuid は存在しません")
      );
   }
}
