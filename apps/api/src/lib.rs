//! # Examdesk API サーバー
//!
//! Todo サービスと User サービスの共通ライブラリ。
//!
//! 2 つのサービスは同じ構造を持つ薄い HTTP 層で、JSON のリクエストを
//! パラメータ付き SQL 1 文に変換し、結果をステータスコードと JSON で返す。
//!
//! ```text
//! request → router → handler（JSON デコード）→ repository（SQL 1 文）→ response
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーター構築
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - API エラーと HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`json`] - JSON ボディの抽出器とエンコーダ
//!
//! ## バイナリ
//!
//! - `todo-service`（`src/bin/todo_service.rs`）
//! - `user-service`（`src/bin/user_service.rs`）

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod json;
