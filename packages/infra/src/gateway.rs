//! # 永続化ゲートウェイ
//!
//! 接続プールの薄いラッパー。リポジトリが組み立てた SQL 文とパラメータを
//! 受け取り、次の 2 種類の操作だけを提供する:
//!
//! - [`PgGateway::query_rows`]: 行を型付きの構造体として取得する
//! - [`PgGateway::execute`]: 更新系の文を実行し、影響行数を返す
//!
//! 影響行数を返すのは、呼び出し元が「実在する行を更新した」のか
//! 「どの行にも一致しなかった」のかを区別できるようにするため。
//!
//! パラメータは常にプレースホルダ（`$1`, `$2`, ...）にバインドする。
//! 値を SQL 文字列に埋め込むことはしない。

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, postgres::PgRow};
use uuid::Uuid;

use crate::error::InfraError;

/// SQL 文にバインドするパラメータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
   Uuid(Uuid),
   Text(String),
   Timestamp(DateTime<Utc>),
}

impl From<Uuid> for SqlParam {
   fn from(value: Uuid) -> Self {
      Self::Uuid(value)
   }
}

impl From<String> for SqlParam {
   fn from(value: String) -> Self {
      Self::Text(value)
   }
}

impl From<&str> for SqlParam {
   fn from(value: &str) -> Self {
      Self::Text(value.to_string())
   }
}

impl From<DateTime<Utc>> for SqlParam {
   fn from(value: DateTime<Utc>) -> Self {
      Self::Timestamp(value)
   }
}

/// PostgreSQL 永続化ゲートウェイ
#[derive(Debug, Clone)]
pub struct PgGateway {
   pool: PgPool,
}

impl PgGateway {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }

   /// SELECT 文を実行し、すべての行を `T` にデコードして返す
   ///
   /// 一致する行がない場合は空の Vec を返す。
   #[tracing::instrument(skip_all, level = "debug", fields(statement = sql))]
   pub async fn query_rows<T>(&self, sql: &str, params: Vec<SqlParam>) -> Result<Vec<T>, InfraError>
   where
      T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
   {
      let mut query = sqlx::query_as::<_, T>(sql);
      for param in params {
         query = match param {
            SqlParam::Uuid(value) => query.bind(value),
            SqlParam::Text(value) => query.bind(value),
            SqlParam::Timestamp(value) => query.bind(value),
         };
      }

      Ok(query.fetch_all(&self.pool).await?)
   }

   /// INSERT / UPDATE 文を実行し、影響行数を返す
   #[tracing::instrument(skip_all, level = "debug", fields(statement = sql))]
   pub async fn execute(&self, sql: &str, params: Vec<SqlParam>) -> Result<u64, InfraError> {
      let mut query = sqlx::query(sql);
      for param in params {
         query = match param {
            SqlParam::Uuid(value) => query.bind(value),
            SqlParam::Text(value) => query.bind(value),
            SqlParam::Timestamp(value) => query.bind(value),
         };
      }

      let result = query.execute(&self.pool).await?;
      tracing::debug!(rows_affected = result.rows_affected(), "文を実行しました");
      Ok(result.rows_affected())
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_fromで各型のパラメータに変換される() {
      let id = Uuid::now_v7();
      let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

      assert_eq!(SqlParam::from(id), SqlParam::Uuid(id));
      assert_eq!(SqlParam::from("Buy milk"), SqlParam::Text("Buy milk".to_string()));
      assert_eq!(SqlParam::from(String::new()), SqlParam::Text(String::new()));
      assert_eq!(SqlParam::from(now), SqlParam::Timestamp(now));
   }

   #[test]
   fn test_ゲートウェイはsendとsyncを実装している() {
      fn assert_send_sync<T: Send + Sync>() {}
      assert_send_sync::<PgGateway>();
   }
}
