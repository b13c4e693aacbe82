//! # インフラ層エラー
//!
//! PostgreSQL とのやり取りで発生するエラー。
//!
//! [`InfraError`] は分類済みの種別（[`InfraErrorKind`]）と、生成時点の
//! [`SpanTrace`] を持つ。リポジトリ操作には `#[tracing::instrument]` が付いているため、
//! ハンドラ境界でログに出したときに「どのリソースのどの操作で失敗したか」が分かる。
//! HTTP クライアントにはどちらも返さない。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
   kind:       InfraErrorKind,
   span_trace: SpanTrace,
}

/// sqlx のエラーを運用上の原因ごとに分類したもの
#[derive(Debug, Error)]
pub enum InfraErrorKind {
   /// データベースに到達できない（接続・TLS の失敗、プールの取得タイムアウト）
   #[error("データベースに接続できません: {0}")]
   Unavailable(#[source] sqlx::Error),

   /// 行を Rust の型に変換できない（スキーマと行型の不一致）
   #[error("行のデコードに失敗しました: {0}")]
   Decode(#[source] sqlx::Error),

   /// 文の実行に失敗した（制約違反、SQL の誤りなど）
   #[error("SQL の実行に失敗しました: {0}")]
   Query(#[source] sqlx::Error),
}

impl InfraErrorKind {
   fn classify(source: sqlx::Error) -> Self {
      use sqlx::Error as E;

      if matches!(
         source,
         E::Io(_) | E::Tls(_) | E::PoolTimedOut | E::PoolClosed | E::WorkerCrashed
      ) {
         Self::Unavailable(source)
      } else if matches!(
         source,
         E::ColumnDecode { .. }
            | E::ColumnNotFound(_)
            | E::ColumnIndexOutOfBounds { .. }
            | E::TypeNotFound { .. }
            | E::Decode(_)
      ) {
         Self::Decode(source)
      } else {
         Self::Query(source)
      }
   }

   /// ログの `error.kind` フィールドに出す値
   pub fn label(&self) -> &'static str {
      match self {
         Self::Unavailable(_) => "unavailable",
         Self::Decode(_) => "decode",
         Self::Query(_) => "query",
      }
   }
}

impl InfraError {
   pub fn kind(&self) -> &InfraErrorKind {
      &self.kind
   }

   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }
}

impl fmt::Debug for InfraError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("InfraError")
         .field("kind", &self.kind)
         .field("span_trace", &self.span_trace)
         .finish()
   }
}

impl std::error::Error for InfraError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      self.kind.source()
   }
}

impl From<sqlx::Error> for InfraError {
   fn from(source: sqlx::Error) -> Self {
      Self {
         kind:       InfraErrorKind::classify(source),
         span_trace: SpanTrace::capture(),
      }
   }
}
