//! # User サービス
//!
//! User の一覧・作成・試験承認・論理削除を提供する HTTP サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `USER_SERVICE_HOST` | `0.0.0.0` | バインドアドレス |
//! | `USER_SERVICE_PORT` | `8080` | ポート番号 |
//! | `DB_*`, `LOG_FORMAT` | - | [`examdesk_api::config`] を参照 |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p examdesk-api --bin user-service
//! ```
//!
//! スキーマは `migrations/` を事前に適用しておく（サービスはマイグレーションを実行しない）。

use std::sync::Arc;

use anyhow::Context as _;
use examdesk_api::{app_builder::user_router, config::ServiceConfig, handler::ResourceState};
use examdesk_domain::clock::SystemClock;
use examdesk_infra::{db, repository::PostgresUserRepository};
use examdesk_shared::observability::init_tracing;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // 設定読み込み（ログ形式も含むため、トレーシングより先に読む）
   let config =
      ServiceConfig::from_env("USER_SERVICE").context("設定の読み込みに失敗しました")?;

   // トレーシング初期化
   init_tracing(config.log_format);
   let _tracing_guard = tracing::info_span!("app", service = "user-service").entered();
   tracing::info!(
      database = ?config.database,
      "User サービスを起動します: {}",
      config.server.addr()
   );

   // データベース接続プールを作成し、疎通を確認する（失敗したら起動しない）
   let pool = db::create_pool(config.database.connect_options())
      .await
      .context("データベース接続に失敗しました")?;
   db::ping(&pool)
      .await
      .context("データベースの疎通確認に失敗しました")?;
   tracing::info!("データベースに接続しました");

   // 依存コンポーネントを初期化
   let state = Arc::new(ResourceState::new(
      PostgresUserRepository::new(pool),
      Arc::new(SystemClock),
   ));
   let app = user_router(state);

   let listener = TcpListener::bind(config.server.addr()).await?;
   tracing::info!("User サービスが起動しました: {}", listener.local_addr()?);

   axum::serve(listener, app).await?;

   Ok(())
}
