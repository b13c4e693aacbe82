//! # Examdesk ドメイン層
//!
//! Todo と User の 2 つのリソースと、両者に共通する
//! 論理削除（ソフトデリート）の規約を表現する。
//!
//! ## 設計方針
//!
//! - **インフラ非依存**: データベースや HTTP の詳細を持たない
//! - **不変エンティティ**: 状態変更は新しい値を返すメソッドで表現する
//! - **時刻の注入**: 現在時刻は [`clock::Clock`] 経由で受け取る
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダ
//! - [`resource`] - リソース共通トレイト（論理削除・状態遷移）
//! - [`todo`] - Todo エンティティ
//! - [`user`] - User エンティティ

#[macro_use]
mod macros;

pub mod clock;
pub mod resource;
pub mod todo;
pub mod user;

pub use resource::Resource;
