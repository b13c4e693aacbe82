//! # TodoRepository
//!
//! `todo` テーブルの定義と、Todo 固有の説明文更新。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use examdesk_domain::{
   Resource,
   todo::{Todo, TodoId},
};
use uuid::Uuid;

use super::resource_repository::{PgResource, PostgresResourceRepository, ResourceRepository};
use crate::{error::InfraError, gateway::SqlParam};

/// `todo` テーブルの行
#[derive(Debug, sqlx::FromRow)]
pub struct TodoRow {
   pub id:           Uuid,
   pub description:  String,
   pub created_at:   DateTime<Utc>,
   pub completed_at: Option<DateTime<Utc>>,
   pub archived_at:  Option<DateTime<Utc>>,
}

impl PgResource for Todo {
   type Row = TodoRow;

   const TABLE: &'static str = "todo";
   const COLUMNS: &'static str = "id, description, created_at, completed_at, archived_at";
   const INSERT_COLUMNS: &'static [&'static str] = &["id", "description", "created_at"];
   const TRANSITION_COLUMN: &'static str = "completed_at";

   fn from_row(row: TodoRow) -> Self {
      Todo::from_db(
         TodoId::from_uuid(row.id),
         row.description,
         row.created_at,
         row.completed_at,
         row.archived_at,
      )
   }

   fn insert_params(&self) -> Vec<SqlParam> {
      vec![
         (*self.id().as_uuid()).into(),
         self.description().into(),
         self.created_at().into(),
      ]
   }

   fn id_uuid(id: &TodoId) -> Uuid {
      *id.as_uuid()
   }
}

/// Todo リポジトリトレイト
///
/// 共通操作に加えて、説明文の更新を提供する。
#[async_trait]
pub trait TodoRepository: ResourceRepository<Resource = Todo> {
   /// アクティブな Todo の説明文を更新する
   ///
   /// 該当する行がない、またはアーカイブ済みの場合は `Ok(false)` を返す。
   async fn update_description(&self, id: &TodoId, description: &str)
   -> Result<bool, InfraError>;
}

/// PostgreSQL 実装の TodoRepository
pub type PostgresTodoRepository = PostgresResourceRepository<Todo>;

/// アクティブな Todo の説明文を更新する文
fn update_description_statement() -> String {
   format!(
      "UPDATE {} SET description = $1 WHERE id = $2 AND archived_at IS NULL",
      <Todo as PgResource>::TABLE
   )
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
   #[tracing::instrument(skip_all, fields(%id))]
   async fn update_description(
      &self,
      id: &TodoId,
      description: &str,
   ) -> Result<bool, InfraError> {
      let rows_affected = self
         .gateway
         .execute(
            &update_description_statement(),
            vec![description.into(), (*id.as_uuid()).into()],
         )
         .await?;

      Ok(rows_affected > 0)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_行からtodoを復元できる() {
      let id = Uuid::now_v7();
      let created_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
      let row = TodoRow {
         id,
         description: "Buy milk".to_string(),
         created_at,
         completed_at: None,
         archived_at: None,
      };

      let todo = Todo::from_row(row);

      assert_eq!(todo.id(), &TodoId::from_uuid(id));
      assert_eq!(todo.description(), "Buy milk");
      assert_eq!(todo.created_at(), created_at);
      assert!(todo.is_active());
   }

   #[test]
   fn test_説明文の更新はアクティブな行だけに一致する() {
      assert_eq!(
         update_description_statement(),
         "UPDATE todo SET description = $1 WHERE id = $2 AND archived_at IS NULL"
      );
   }

   #[test]
   fn test_insertパラメータは列と同じ順序で並ぶ() {
      let created_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
      let id = TodoId::new();
      let todo = Todo::from_db(id, "Buy milk".to_string(), created_at, None, None);

      let params = todo.insert_params();

      assert_eq!(params.len(), Todo::INSERT_COLUMNS.len());
      assert_eq!(
         params,
         vec![
            SqlParam::Uuid(*id.as_uuid()),
            SqlParam::Text("Buy milk".to_string()),
            SqlParam::Timestamp(created_at),
         ]
      );
   }
}
