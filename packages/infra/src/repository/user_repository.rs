//! # UserRepository
//!
//! `"user"` テーブルの定義。User は共通操作（一覧・作成・承認・論理削除）のみを持つ。

use chrono::{DateTime, Utc};
use examdesk_domain::{
   Resource,
   user::{User, UserId},
};
use uuid::Uuid;

use super::resource_repository::{PgResource, PostgresResourceRepository};
use crate::gateway::SqlParam;

/// `"user"` テーブルの行
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
   pub id:                   Uuid,
   pub name:                 String,
   pub email:                String,
   pub created_at:           DateTime<Utc>,
   pub approved_for_exam_at: Option<DateTime<Utc>>,
   pub archived_at:          Option<DateTime<Utc>>,
}

impl PgResource for User {
   type Row = UserRow;

   // user は PostgreSQL の予約語
   const TABLE: &'static str = r#""user""#;
   const COLUMNS: &'static str = "id, name, email, created_at, approved_for_exam_at, archived_at";
   const INSERT_COLUMNS: &'static [&'static str] = &["id", "name", "email", "created_at"];
   const TRANSITION_COLUMN: &'static str = "approved_for_exam_at";

   fn from_row(row: UserRow) -> Self {
      User::from_db(
         UserId::from_uuid(row.id),
         row.name,
         row.email,
         row.created_at,
         row.approved_for_exam_at,
         row.archived_at,
      )
   }

   fn insert_params(&self) -> Vec<SqlParam> {
      vec![
         (*self.id().as_uuid()).into(),
         self.name().into(),
         self.email().into(),
         self.created_at().into(),
      ]
   }

   fn id_uuid(id: &UserId) -> Uuid {
      *id.as_uuid()
   }
}

/// PostgreSQL 実装の User リポジトリ
pub type PostgresUserRepository = PostgresResourceRepository<User>;

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_行からuserを復元できる() {
      let id = Uuid::now_v7();
      let created_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
      let archived_at = DateTime::from_timestamp(1_700_100_000, 0).unwrap();
      let row = UserRow {
         id,
         name: "Alice".to_string(),
         email: "alice@example.com".to_string(),
         created_at,
         approved_for_exam_at: None,
         archived_at: Some(archived_at),
      };

      let user = User::from_row(row);

      assert_eq!(user.id(), &UserId::from_uuid(id));
      assert_eq!(user.name(), "Alice");
      assert_eq!(user.archived_at(), Some(archived_at));
      assert!(!user.is_active());
   }
}
