//! # User
//!
//! 試験の受験者として登録されるユーザー。
//!
//! 名前とメールアドレスは作成時に必須だが、形式の検証は行わない。
//! 作成後に変更できるのは試験承認（`approved_for_exam_at`）と
//! 論理削除（`archived_at`）のみ。

use chrono::{DateTime, Utc};

use crate::resource::Resource;

define_uuid_id! {
   /// ユーザーの一意識別子
   pub struct UserId;
}

/// User エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
   id:                   UserId,
   name:                 String,
   email:                String,
   created_at:           DateTime<Utc>,
   approved_for_exam_at: Option<DateTime<Utc>>,
   archived_at:          Option<DateTime<Utc>>,
}

/// User 作成時の入力
pub struct NewUser {
   pub id:    UserId,
   pub name:  String,
   pub email: String,
   pub now:   DateTime<Utc>,
}

impl User {
   pub fn new(input: NewUser) -> Self {
      Self {
         id:                   input.id,
         name:                 input.name,
         email:                input.email,
         created_at:           input.now,
         approved_for_exam_at: None,
         archived_at:          None,
      }
   }

   /// データベースの行から復元する
   pub fn from_db(
      id: UserId,
      name: String,
      email: String,
      created_at: DateTime<Utc>,
      approved_for_exam_at: Option<DateTime<Utc>>,
      archived_at: Option<DateTime<Utc>>,
   ) -> Self {
      Self {
         id,
         name,
         email,
         created_at,
         approved_for_exam_at,
         archived_at,
      }
   }

   pub fn name(&self) -> &str {
      &self.name
   }

   pub fn email(&self) -> &str {
      &self.email
   }

   pub fn approved_for_exam_at(&self) -> Option<DateTime<Utc>> {
      self.approved_for_exam_at
   }
}

impl Resource for User {
   type Id = UserId;

   const NAME: &'static str = "user";
   const TRANSITION: &'static str = "approve";

   fn id(&self) -> &UserId {
      &self.id
   }

   fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }

   fn archived_at(&self) -> Option<DateTime<Utc>> {
      self.archived_at
   }

   fn transitioned(self, now: DateTime<Utc>) -> Self {
      Self {
         approved_for_exam_at: Some(now),
         ..self
      }
   }

   fn archived(self, now: DateTime<Utc>) -> Self {
      Self {
         archived_at: Some(now),
         ..self
      }
   }
}
