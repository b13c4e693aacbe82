//! # API エラー定義
//!
//! ハンドラが返すエラーと、RFC 9457 形式の HTTP レスポンスへの変換を定義する。
//!
//! | ApiError | HTTP Status |
//! |----------|-------------|
//! | BadRequest | 400 |
//! | NotFound | 404 |
//! | Database | 500 |
//! | Serialization | 500 |
//!
//! 500 系の原因はサーバー側のログにのみ出力し、レスポンスには固定の detail を返す。

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use examdesk_infra::InfraError;
use examdesk_shared::{ErrorResponse, Problem};
use thiserror::Error;

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
   /// リクエストボディを解釈できない
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// 対象のレコードが存在しない
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// データベースエラー
   #[error("データベースエラー: {0}")]
   Database(#[from] InfraError),

   /// レスポンスのシリアライズに失敗
   #[error("シリアライズエラー: {0}")]
   Serialization(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let body = match self {
         ApiError::BadRequest(detail) => ErrorResponse::new(Problem::BadRequest, detail),
         ApiError::NotFound(detail) => ErrorResponse::new(Problem::NotFound, detail),
         ApiError::Database(e) => {
            tracing::error!(
               error.kind = e.kind().label(),
               "データベースエラー: {}\n{}",
               e,
               e.span_trace()
            );
            ErrorResponse::internal_error()
         }
         ApiError::Serialization(e) => {
            tracing::error!("レスポンスのシリアライズに失敗しました: {}", e);
            ErrorResponse::internal_error()
         }
      };
      let status =
         StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

      (status, Json(body)).into_response()
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   async fn body_of(response: Response) -> ErrorResponse {
      let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
         .await
         .unwrap();
      serde_json::from_slice(&bytes).unwrap()
   }

   #[tokio::test]
   async fn test_bad_requestは400と詳細を返す() {
      let response = ApiError::BadRequest("JSON が不正です".to_string()).into_response();

      assert_eq!(response.status(), StatusCode::BAD_REQUEST);
      assert_eq!(
         body_of(response).await,
         ErrorResponse::new(Problem::BadRequest, "JSON が不正です")
      );
   }

   #[tokio::test]
   async fn test_not_foundは404を返す() {
      let response = ApiError::NotFound("todo abc".to_string()).into_response();

      assert_eq!(response.status(), StatusCode::NOT_FOUND);
      assert_eq!(body_of(response).await.status, 404);
   }

   #[tokio::test]
   async fn test_データベースエラーは詳細を隠して500を返す() {
      let error = InfraError::from(sqlx::Error::PoolTimedOut);

      let response = ApiError::from(error).into_response();

      assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
      assert_eq!(body_of(response).await, ErrorResponse::internal_error());
   }
}
