//! # ルーター構築
//!
//! リソースごとのルーティング表を組み立てる。
//! バイナリ（`main`）はインフラ初期化とサーバー起動に集中し、ハンドラテストは
//! 同じルーターをモックリポジトリで組み立てて使う。
//!
//! ```text
//! GET    /health
//! GET    /{name}                  一覧
//! POST   /{name}                  作成
//! PUT    /{name}/{id}             更新（Todo のみ）
//! DELETE /{name}/{id}             論理削除
//! PUT    /{name}/{id}/{transition} 状態遷移
//! ```
//!
//! 一致しないパスは 404、パスに一致してメソッドが違う場合は 405（axum の既定動作）。

use std::sync::Arc;

use axum::{
   Router,
   routing::{MethodRouter, get, put},
};
use examdesk_domain::{Resource, user::User};
use examdesk_infra::repository::{ResourceRepository, TodoRepository};
use tower_http::trace::TraceLayer;

use crate::handler::{
   ResourceApi,
   ResourceState,
   archive,
   create,
   health_check,
   list,
   transition,
   update_todo,
};

/// Todo サービスのルーター
pub fn todo_router<Repo>(state: Arc<ResourceState<Repo>>) -> Router
where
   Repo: TodoRepository,
{
   resource_router(state, put(update_todo::<Repo>))
}

/// User サービスのルーター
pub fn user_router<Repo>(state: Arc<ResourceState<Repo>>) -> Router
where
   Repo: ResourceRepository<Resource = User>,
{
   resource_router(state, MethodRouter::new())
}

/// リソース共通のルートを組み立てる
///
/// `item` は `/{name}/{id}` に追加するメソッド（DELETE は常に登録する）。
fn resource_router<Repo>(
   state: Arc<ResourceState<Repo>>,
   item: MethodRouter<Arc<ResourceState<Repo>>>,
) -> Router
where
   Repo: ResourceRepository,
   Repo::Resource: ResourceApi,
{
   let name = <Repo::Resource as Resource>::NAME;
   let action = <Repo::Resource as Resource>::TRANSITION;

   Router::new()
      .route("/health", get(health_check))
      .route(
         &format!("/{name}"),
         get(list::<Repo>).post(create::<Repo>),
      )
      .route(&format!("/{name}/{{id}}"), item.delete(archive::<Repo>))
      .route(
         &format!("/{name}/{{id}}/{action}"),
         put(transition::<Repo>),
      )
      .with_state(state)
      .layer(TraceLayer::new_for_http())
}

