//! # PostgreSQL データベース接続管理
//!
//! 接続プールの作成と、起動時の疎通確認を行う。
//!
//! ## 設計方針
//!
//! - **接続プール**: プロセス起動時に一度だけ作成し、リポジトリに clone して渡す
//!   （`PgPool` は内部で `Arc` を持つため clone は安価で、並行利用も安全）
//! - **グローバル変数を持たない**: プールは `main` で組み立てて明示的に渡す
//! - **フェイルファスト**: 起動時に [`ping`] が失敗した場合はプロセスを起動しない
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use examdesk_infra::db;
//! use sqlx::postgres::PgConnectOptions;
//!
//! let options = PgConnectOptions::new().host("localhost").database("todo");
//! let pool = db::create_pool(options).await?;
//! db::ping(&pool).await?;
//! ```

use std::time::Duration;

use sqlx::{
   PgPool,
   postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::error::InfraError;

/// 最大接続数
const MAX_CONNECTIONS: u32 = 10;

/// 接続取得のタイムアウト
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// PostgreSQL 接続プールを作成する
///
/// 作成時に少なくとも 1 本の接続を確立するため、
/// ホスト不達や認証エラーはここで `Err` になる。
pub async fn create_pool(options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
   PgPoolOptions::new()
      .max_connections(MAX_CONNECTIONS)
      .acquire_timeout(ACQUIRE_TIMEOUT)
      .connect_with(options)
      .await
}

/// データベースの疎通を確認する
#[tracing::instrument(skip_all)]
pub async fn ping(pool: &PgPool) -> Result<(), InfraError> {
   sqlx::query("SELECT 1").execute(pool).await?;
   Ok(())
}
