//! # ヘルスチェックハンドラ
//!
//! ```text
//! GET /health
//! ```
//!
//! データベースには問い合わせず、プロセスが応答できることだけを返す。

/// ヘルスチェックエンドポイント
///
/// 常に 200 OK と `health\n`（text/plain）を返す。
pub async fn health_check() -> &'static str {
   "health\n"
}
