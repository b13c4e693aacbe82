//! # リソース共通トレイト
//!
//! Todo と User はどちらも次の規約に従う「フラットなレコード」である:
//!
//! - ID と `created_at` は作成時にサーバーが決め、以後変わらない
//! - 状態遷移はタイムスタンプ列を 1 つ設定するだけ（Todo: 完了、User: 試験承認）
//! - 削除は物理削除ではなく `archived_at` の設定（論理削除）
//! - `archived_at` が未設定のレコードだけが「アクティブ」
//!
//! この規約を [`Resource`] トレイトとして切り出し、リポジトリと HTTP ハンドラを
//! リソース型でジェネリックにする。

use std::{fmt, hash::Hash};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 論理削除と単一の状態遷移を持つリソース
pub trait Resource: Clone + Send + Sync + 'static {
   /// リソースの ID 型
   type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display + From<Uuid> + Send + Sync + 'static;

   /// リソース名（URL のパスセグメント、ログ出力に使用）
   const NAME: &'static str;

   /// 状態遷移アクション名（`/{NAME}/{id}/{TRANSITION}` のパスセグメント）
   const TRANSITION: &'static str;

   fn id(&self) -> &Self::Id;

   fn created_at(&self) -> DateTime<Utc>;

   fn archived_at(&self) -> Option<DateTime<Utc>>;

   /// アクティブ（論理削除されていない）かどうか
   fn is_active(&self) -> bool {
      self.archived_at().is_none()
   }

   /// 状態遷移のタイムスタンプを `now` で上書きした値を返す
   ///
   /// 既に設定済みでも上書きする（冪等な操作として扱う）。
   fn transitioned(self, now: DateTime<Utc>) -> Self;

   /// `archived_at` を `now` に設定した値を返す
   fn archived(self, now: DateTime<Utc>) -> Self;
}
