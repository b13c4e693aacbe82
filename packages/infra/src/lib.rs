//! # Examdesk インフラ層
//!
//! PostgreSQL との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: 接続プールの作成と起動時の疎通確認
//! - **永続化ゲートウェイ**: パラメータ付き SQL の実行と型付きの行取得
//! - **リポジトリ実装**: リソース共通の論理削除・状態遷移を Postgres で実装
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続プール管理
//! - [`error`] - インフラ層エラー定義
//! - [`gateway`] - 永続化ゲートウェイ
//! - [`repository`] - リポジトリ実装
//! - `mock` - テスト用インメモリリポジトリ（`test-utils` feature）

pub mod db;
pub mod error;
pub mod gateway;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
pub use gateway::{PgGateway, SqlParam};
