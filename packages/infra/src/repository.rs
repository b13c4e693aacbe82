//! # リポジトリ実装
//!
//! Todo / User に共通する「一覧・作成・状態遷移・論理削除」を
//! [`ResourceRepository`] として定義し、テーブル定義（[`PgResource`]）で
//! パラメータ化した [`PostgresResourceRepository`] をリソースごとに 1 回ずつ
//! インスタンス化する。
//!
//! Todo だけが持つ説明文の更新は [`TodoRepository`] で追加する。

pub mod resource_repository;
pub mod todo_repository;
pub mod user_repository;

pub use resource_repository::{PgResource, PostgresResourceRepository, ResourceRepository};
pub use todo_repository::{PostgresTodoRepository, TodoRepository, TodoRow};
pub use user_repository::{PostgresUserRepository, UserRow};
