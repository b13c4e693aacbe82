//! # JSON コーデック
//!
//! リクエストボディのデコードとレスポンスのエンコード。
//!
//! axum 標準の `Json` 抽出器は Content-Type の不一致で 415、構文エラーで 400、
//! 型の不一致で 422 を返す。ここではボディを JSON として解釈できない場合を
//! すべて 400（RFC 9457 形式）に揃える。Content-Type ヘッダーは見ない。

use axum::{
   Json,
   body::Bytes,
   extract::{FromRequest, Request},
   response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::ApiError;

/// JSON リクエストボディ抽出器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
   T: DeserializeOwned,
   S: Send + Sync,
{
   type Rejection = ApiError;

   async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
      let bytes = Bytes::from_request(req, state)
         .await
         .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

      serde_json::from_slice(&bytes)
         .map(JsonBody)
         .map_err(|e| ApiError::BadRequest(format!("JSON を解釈できません: {e}")))
   }
}

/// 値を JSON レスポンスに変換する
///
/// シリアライズに失敗した場合は [`ApiError::Serialization`]（500）になる。
pub fn json_response<T: Serialize>(value: &T) -> Result<Response, ApiError> {
   let body = serde_json::to_value(value)?;
   Ok(Json(body).into_response())
}

#[cfg(test)]
mod tests {
   use std::collections::BTreeMap;

   use axum::{body::Body, http::StatusCode};
   use pretty_assertions::assert_eq;
   use rstest::rstest;
   use serde::Deserialize;

   use super::*;

   #[derive(Debug, Deserialize, PartialEq)]
   #[serde(deny_unknown_fields)]
   struct Payload {
      description: String,
   }

   async fn extract(body: &'static str) -> Result<JsonBody<Payload>, ApiError> {
      let request = Request::builder()
         .method("POST")
         .uri("/todo")
         .body(Body::from(body))
         .unwrap();
      JsonBody::<Payload>::from_request(request, &()).await
   }

   #[tokio::test]
   async fn test_content_typeがなくてもjsonをデコードできる() {
      let JsonBody(payload) = extract(r#"{"description":"Buy milk"}"#).await.unwrap();

      assert_eq!(
         payload,
         Payload {
            description: "Buy milk".to_string(),
         }
      );
   }

   #[rstest]
   #[case::json_ではない("not json")]
   #[case::空のボディ("")]
   #[case::必須フィールドがない("{}")]
   #[case::型が違う(r#"{"description":1}"#)]
   #[case::未知のフィールド(r#"{"description":"a","done":true}"#)]
   #[tokio::test]
   async fn test_解釈できないボディは400になる(#[case] body: &'static str) {
      let error = extract(body).await.unwrap_err();

      assert!(matches!(error, ApiError::BadRequest(_)));
      assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
   }

   #[test]
   fn test_シリアライズできない値は500になる() {
      // キーが文字列でないマップは JSON オブジェクトにできない
      let mut value = BTreeMap::new();
      value.insert((1, 2), "x");

      let error = json_response(&value).unwrap_err();

      assert_eq!(
         error.into_response().status(),
         StatusCode::INTERNAL_SERVER_ERROR
      );
   }
}
