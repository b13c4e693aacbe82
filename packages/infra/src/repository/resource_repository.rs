//! # ResourceRepository
//!
//! 論理削除規約に従うリソースの永続化操作。
//!
//! ## 設計方針
//!
//! - **1 リクエスト 1 文**: どの操作も SQL 文を 1 つだけ発行する
//! - **タイムスタンプは無条件に上書き**: 状態遷移と論理削除はアーカイブ済みの行にも一致する。
//!   `archived_at IS NULL` で絞るのは一覧と Todo の説明文更新だけ
//! - **影響行数の報告**: 更新系の操作は「行に一致したか」を `bool` で返す。
//!   一致しなかった場合の扱い（404 など）は呼び出し元が決める
//! - **SQL はテーブル定義から組み立てる**: 文字列はリポジトリ生成時に一度だけ作る

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use examdesk_domain::Resource;
use sqlx::{FromRow, PgPool, postgres::PgRow};
use uuid::Uuid;

use crate::{
   error::InfraError,
   gateway::{PgGateway, SqlParam},
};

/// リソース共通のリポジトリトレイト
#[async_trait]
pub trait ResourceRepository: Send + Sync + 'static {
   type Resource: Resource;

   /// アクティブなレコードを作成日時順に取得する
   async fn find_active(&self) -> Result<Vec<Self::Resource>, InfraError>;

   /// ID でレコードを取得する
   ///
   /// アーカイブ済みのレコードも返す（論理削除後も行が残っていることの確認用）。
   async fn find_by_id(
      &self,
      id: &<Self::Resource as Resource>::Id,
   ) -> Result<Option<Self::Resource>, InfraError>;

   /// レコードを挿入する
   async fn insert(&self, record: &Self::Resource) -> Result<(), InfraError>;

   /// 状態遷移のタイムスタンプを `now` で上書きする
   ///
   /// # 戻り値
   ///
   /// - `Ok(true)`: 行を更新した（アーカイブ済みの行を含む）
   /// - `Ok(false)`: 該当する行がない
   async fn transition(
      &self,
      id: &<Self::Resource as Resource>::Id,
      now: DateTime<Utc>,
   ) -> Result<bool, InfraError>;

   /// `archived_at` を `now` に設定する
   ///
   /// アーカイブ済みの行でも上書きする。`Ok(false)` は該当する行がないことを表す。
   async fn archive(
      &self,
      id: &<Self::Resource as Resource>::Id,
      now: DateTime<Utc>,
   ) -> Result<bool, InfraError>;
}

/// Postgres のテーブルに対応付けられたリソース
///
/// テーブルは `id`, `created_at`, `archived_at` 列を持つことを前提とする。
pub trait PgResource: Resource {
   /// 行の型
   type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin;

   /// テーブル名（予約語の場合はクォート済みで指定する）
   const TABLE: &'static str;

   /// SELECT で取得する列（`Row` のフィールドと一致させる）
   const COLUMNS: &'static str;

   /// INSERT で設定する列（[`insert_params`](PgResource::insert_params) と同順）
   const INSERT_COLUMNS: &'static [&'static str];

   /// 状態遷移で設定するタイムスタンプ列
   const TRANSITION_COLUMN: &'static str;

   fn from_row(row: Self::Row) -> Self;

   fn insert_params(&self) -> Vec<SqlParam>;

   fn id_uuid(id: &Self::Id) -> Uuid;
}

/// テーブル定義から組み立てた SQL 文
#[derive(Debug, Clone)]
struct Statements {
   find_active: String,
   find_by_id:  String,
   insert:      String,
   transition:  String,
   archive:     String,
}

impl Statements {
   fn build<R: PgResource>() -> Self {
      let placeholders = (1..=R::INSERT_COLUMNS.len())
         .map(|n| format!("${n}"))
         .collect::<Vec<_>>()
         .join(", ");

      Self {
         find_active: format!(
            "SELECT {} FROM {} WHERE archived_at IS NULL ORDER BY created_at, id",
            R::COLUMNS,
            R::TABLE
         ),
         find_by_id:  format!("SELECT {} FROM {} WHERE id = $1", R::COLUMNS, R::TABLE),
         insert:      format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            R::INSERT_COLUMNS.join(", "),
            placeholders
         ),
         transition:  format!(
            "UPDATE {} SET {} = $1 WHERE id = $2",
            R::TABLE,
            R::TRANSITION_COLUMN
         ),
         archive:     format!("UPDATE {} SET archived_at = $1 WHERE id = $2", R::TABLE),
      }
   }
}

/// PostgreSQL 実装の ResourceRepository
///
/// リソース型ごとに 1 回インスタンス化して使う
/// （[`PostgresTodoRepository`](super::PostgresTodoRepository),
/// [`PostgresUserRepository`](super::PostgresUserRepository)）。
#[derive(Debug, Clone)]
pub struct PostgresResourceRepository<R> {
   pub(crate) gateway: PgGateway,
   statements:         Statements,
   _resource:          PhantomData<fn() -> R>,
}

impl<R: PgResource> PostgresResourceRepository<R> {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self {
         gateway:    PgGateway::new(pool),
         statements: Statements::build::<R>(),
         _resource:  PhantomData,
      }
   }
}

#[async_trait]
impl<R: PgResource> ResourceRepository for PostgresResourceRepository<R> {
   type Resource = R;

   #[tracing::instrument(skip_all, fields(resource = R::NAME))]
   async fn find_active(&self) -> Result<Vec<R>, InfraError> {
      let rows: Vec<R::Row> = self
         .gateway
         .query_rows(&self.statements.find_active, Vec::new())
         .await?;

      Ok(rows.into_iter().map(R::from_row).collect())
   }

   #[tracing::instrument(skip_all, fields(resource = R::NAME, %id))]
   async fn find_by_id(&self, id: &R::Id) -> Result<Option<R>, InfraError> {
      let rows: Vec<R::Row> = self
         .gateway
         .query_rows(&self.statements.find_by_id, vec![R::id_uuid(id).into()])
         .await?;

      Ok(rows.into_iter().next().map(R::from_row))
   }

   #[tracing::instrument(skip_all, fields(resource = R::NAME, id = %record.id()))]
   async fn insert(&self, record: &R) -> Result<(), InfraError> {
      self.gateway
         .execute(&self.statements.insert, record.insert_params())
         .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, fields(resource = R::NAME, %id))]
   async fn transition(&self, id: &R::Id, now: DateTime<Utc>) -> Result<bool, InfraError> {
      let rows_affected = self
         .gateway
         .execute(
            &self.statements.transition,
            vec![now.into(), R::id_uuid(id).into()],
         )
         .await?;

      Ok(rows_affected > 0)
   }

   #[tracing::instrument(skip_all, fields(resource = R::NAME, %id))]
   async fn archive(&self, id: &R::Id, now: DateTime<Utc>) -> Result<bool, InfraError> {
      let rows_affected = self
         .gateway
         .execute(
            &self.statements.archive,
            vec![now.into(), R::id_uuid(id).into()],
         )
         .await?;

      Ok(rows_affected > 0)
   }
}

#[cfg(test)]
mod tests {
   use examdesk_domain::{todo::Todo, user::User};
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_todoのsql文がテーブル定義から組み立てられる() {
      let statements = Statements::build::<Todo>();

      assert_eq!(
         statements.find_active,
         "SELECT id, description, created_at, completed_at, archived_at FROM todo \
          WHERE archived_at IS NULL ORDER BY created_at, id"
      );
      assert_eq!(
         statements.find_by_id,
         "SELECT id, description, created_at, completed_at, archived_at FROM todo WHERE id = $1"
      );
      assert_eq!(
         statements.insert,
         "INSERT INTO todo (id, description, created_at) VALUES ($1, $2, $3)"
      );
      assert_eq!(
         statements.transition,
         "UPDATE todo SET completed_at = $1 WHERE id = $2"
      );
      assert_eq!(
         statements.archive,
         "UPDATE todo SET archived_at = $1 WHERE id = $2"
      );
   }

   #[test]
   fn test_userのテーブル名はクォートされる() {
      let statements = Statements::build::<User>();

      assert_eq!(
         statements.insert,
         r#"INSERT INTO "user" (id, name, email, created_at) VALUES ($1, $2, $3, $4)"#
      );
      assert_eq!(
         statements.transition,
         r#"UPDATE "user" SET approved_for_exam_at = $1 WHERE id = $2"#
      );
   }

   #[test]
   fn test_リポジトリはsendとsyncを実装している() {
      fn assert_send_sync<T: Send + Sync>() {}
      assert_send_sync::<PostgresResourceRepository<Todo>>();
      assert_send_sync::<PostgresResourceRepository<User>>();
   }
}
