//! # Examdesk 共有ユーティリティ
//!
//! Todo Service / User Service の両方で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, api）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（HTTP レスポンスへの変換は api の責務）

pub mod error_response;
pub mod observability;

pub use error_response::{ErrorResponse, Problem};
