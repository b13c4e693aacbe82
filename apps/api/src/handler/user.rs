//! # User ハンドラ
//!
//! User の JSON ビュー。操作はすべて共通ハンドラ（[`super::resource`]）で提供する。
//!
//! - `GET /user`, `POST /user` - 一覧・作成
//! - `PUT /user/{id}/approve` - 試験承認
//! - `DELETE /user/{id}` - 論理削除

use chrono::{DateTime, Utc};
use examdesk_domain::{
   Resource,
   user::{NewUser, User, UserId},
};
use serde::{Deserialize, Serialize};

use super::resource::ResourceApi;

/// User 作成リクエスト
///
/// 空文字列も受け付ける（形式の検証は行わない）。
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
   pub name:  String,
   pub email: String,
}

/// User の JSON ビュー
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
   pub id:                   UserId,
   pub name:                 String,
   pub email:                String,
   pub created_at:           DateTime<Utc>,
   #[serde(skip_serializing_if = "Option::is_none", default)]
   pub approved_for_exam_at: Option<DateTime<Utc>>,
}

impl ResourceApi for User {
   type CreateRequest = CreateUserRequest;
   type Response = UserResponse;

   fn from_create_request(request: CreateUserRequest, now: DateTime<Utc>) -> Self {
      User::new(NewUser {
         id: UserId::new(),
         name: request.name,
         email: request.email,
         now,
      })
   }

   fn to_response(&self) -> UserResponse {
      UserResponse {
         id:                   *self.id(),
         name:                 self.name().to_string(),
         email:                self.email().to_string(),
         created_at:           self.created_at(),
         approved_for_exam_at: self.approved_for_exam_at(),
      }
   }
}
