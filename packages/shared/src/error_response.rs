//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! 両サービスが返すエラーは 400 / 404 / 500 の 3 種類だけで、それぞれ
//! [`Problem`] の 1 バリアントに対応する。`type` / `title` / `status` は
//! [`Problem`] から決まり、呼び出し元が指定するのは `detail` だけ。
//!
//! HTTP レスポンスへの変換は api クレートが行う（このクレートは axum に依存しない）。

use serde::{Deserialize, Serialize};

const ERROR_TYPE_BASE: &str = "https://examdesk.example.com/errors";

/// エラーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
   /// リクエストボディを解釈できない
   BadRequest,
   /// 対象の行が存在しない
   NotFound,
   /// データベースやシリアライズの失敗
   Internal,
}

impl Problem {
   pub const fn status(self) -> u16 {
      match self {
         Self::BadRequest => 400,
         Self::NotFound => 404,
         Self::Internal => 500,
      }
   }

   pub const fn title(self) -> &'static str {
      match self {
         Self::BadRequest => "Bad Request",
         Self::NotFound => "Not Found",
         Self::Internal => "Internal Server Error",
      }
   }

   const fn slug(self) -> &'static str {
      match self {
         Self::BadRequest => "bad-request",
         Self::NotFound => "not-found",
         Self::Internal => "internal-error",
      }
   }
}

/// エラーレスポンスのボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

impl ErrorResponse {
   pub fn new(problem: Problem, detail: impl Into<String>) -> Self {
      Self {
         error_type: format!("{ERROR_TYPE_BASE}/{}", problem.slug()),
         title:      problem.title().to_string(),
         status:     problem.status(),
         detail:     detail.into(),
      }
   }

   /// 500 のボディ
   ///
   /// detail は固定。原因はサーバー側のログにだけ出す。
   pub fn internal_error() -> Self {
      Self::new(Problem::Internal, "内部エラーが発生しました")
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[rstest]
   #[case(Problem::BadRequest, 400, "Bad Request", "bad-request")]
   #[case(Problem::NotFound, 404, "Not Found", "not-found")]
   #[case(Problem::Internal, 500, "Internal Server Error", "internal-error")]
   fn test_種類ごとにtypeとtitleとstatusが決まる(
      #[case] problem: Problem,
      #[case] status: u16,
      #[case] title: &str,
      #[case] slug: &str,
   ) {
      let error = ErrorResponse::new(problem, "詳細");

      assert_eq!(
         error,
         ErrorResponse {
            error_type: format!("https://examdesk.example.com/errors/{slug}"),
            title:      title.to_string(),
            status,
            detail:     "詳細".to_string(),
         }
      );
   }

   #[test]
   fn test_typeフィールドとしてシリアライズされる() {
      let error = ErrorResponse::new(Problem::NotFound, "todo 0190a4c2 は存在しません");

      let json = serde_json::to_value(&error).unwrap();

      assert_eq!(
         json,
         serde_json::json!({
            "type": "https://examdesk.example.com/errors/not-found",
            "title": "Not Found",
            "status": 404,
            "detail": "todo 0190a4c2 は存在しません",
         })
      );
   }
}
