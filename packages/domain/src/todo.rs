//! # Todo
//!
//! やることリストの 1 件を表すエンティティ。
//!
//! ## ライフサイクル
//!
//! ```text
//! 作成 ──▶ アクティブ ──(complete)──▶ 完了済み（completed_at 設定）
//!              │                         │
//!              └──────(delete)───────────┴──▶ アーカイブ（archived_at 設定）
//! ```
//!
//! 完了は何度でも実行でき、そのたびに `completed_at` が上書きされる。

use chrono::{DateTime, Utc};

use crate::resource::Resource;

define_uuid_id! {
   /// Todo の一意識別子
   pub struct TodoId;
}

/// Todo エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
   id:           TodoId,
   description:  String,
   created_at:   DateTime<Utc>,
   completed_at: Option<DateTime<Utc>>,
   archived_at:  Option<DateTime<Utc>>,
}

/// Todo 作成時の入力
pub struct NewTodo {
   pub id:          TodoId,
   pub description: String,
   pub now:         DateTime<Utc>,
}

impl Todo {
   /// 新しい Todo を作成する
   ///
   /// 説明文の内容は検証しない（空文字列も受け付ける）。
   pub fn new(input: NewTodo) -> Self {
      Self {
         id:           input.id,
         description:  input.description,
         created_at:   input.now,
         completed_at: None,
         archived_at:  None,
      }
   }

   /// データベースの行から復元する
   pub fn from_db(
      id: TodoId,
      description: String,
      created_at: DateTime<Utc>,
      completed_at: Option<DateTime<Utc>>,
      archived_at: Option<DateTime<Utc>>,
   ) -> Self {
      Self {
         id,
         description,
         created_at,
         completed_at,
         archived_at,
      }
   }

   pub fn description(&self) -> &str {
      &self.description
   }

   pub fn completed_at(&self) -> Option<DateTime<Utc>> {
      self.completed_at
   }

   /// 説明文を差し替えた Todo を返す
   pub fn with_description(self, description: impl Into<String>) -> Self {
      Self {
         description: description.into(),
         ..self
      }
   }
}

impl Resource for Todo {
   type Id = TodoId;

   const NAME: &'static str = "todo";
   const TRANSITION: &'static str = "complete";

   fn id(&self) -> &TodoId {
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
         completed_at: Some(now),
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
