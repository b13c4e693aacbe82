//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! examdesk-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 一致条件は Postgres 実装と同じ。状態遷移と論理削除はアーカイブ済みの行にも一致し、
//! 説明文の更新はアクティブな行にだけ一致する。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use examdesk_domain::{
   Resource,
   todo::{Todo, TodoId},
};

use crate::{
   error::InfraError,
   repository::{ResourceRepository, TodoRepository},
};

// ===== MockResourceRepository =====

/// インメモリのリソースリポジトリ
///
/// `failing()` で作成すると、すべての操作がデータベースエラーを返す。
#[derive(Clone)]
pub struct MockResourceRepository<R> {
   records: Arc<Mutex<Vec<R>>>,
   failing: bool,
}

impl<R: Resource> Default for MockResourceRepository<R> {
   fn default() -> Self {
      Self::new()
   }
}

impl<R: Resource> MockResourceRepository<R> {
   pub fn new() -> Self {
      Self {
         records: Arc::new(Mutex::new(Vec::new())),
         failing: false,
      }
   }

   /// すべての操作が失敗するリポジトリ
   pub fn failing() -> Self {
      Self {
         records: Arc::new(Mutex::new(Vec::new())),
         failing: true,
      }
   }

   pub fn add(&self, record: R) {
      self.records.lock().unwrap().push(record);
   }

   /// 保存されているレコードをすべて返す（アーカイブ済みを含む）
   pub fn records(&self) -> Vec<R> {
      self.records.lock().unwrap().clone()
   }

   fn check(&self) -> Result<(), InfraError> {
      if self.failing {
         return Err(sqlx::Error::PoolTimedOut.into());
      }
      Ok(())
   }

   /// `matches` を満たす行に `f` を適用し、一致したかどうかを返す
   fn update_where(
      &self,
      id: &R::Id,
      matches: impl Fn(&R) -> bool,
      f: impl FnOnce(R) -> R,
   ) -> bool {
      let mut records = self.records.lock().unwrap();
      match records.iter().position(|r| r.id() == id && matches(r)) {
         Some(index) => {
            let current = records[index].clone();
            records[index] = f(current);
            true
         }
         None => false,
      }
   }
}

#[async_trait]
impl<R: Resource> ResourceRepository for MockResourceRepository<R> {
   type Resource = R;

   async fn find_active(&self) -> Result<Vec<R>, InfraError> {
      self.check()?;
      let mut active: Vec<R> = self
         .records
         .lock()
         .unwrap()
         .iter()
         .filter(|r| r.is_active())
         .cloned()
         .collect();
      active.sort_by_key(|r| r.created_at());
      Ok(active)
   }

   async fn find_by_id(&self, id: &R::Id) -> Result<Option<R>, InfraError> {
      self.check()?;
      Ok(self
         .records
         .lock()
         .unwrap()
         .iter()
         .find(|r| r.id() == id)
         .cloned())
   }

   async fn insert(&self, record: &R) -> Result<(), InfraError> {
      self.check()?;
      self.records.lock().unwrap().push(record.clone());
      Ok(())
   }

   async fn transition(&self, id: &R::Id, now: DateTime<Utc>) -> Result<bool, InfraError> {
      self.check()?;
      Ok(self.update_where(id, |_| true, |r| r.transitioned(now)))
   }

   async fn archive(&self, id: &R::Id, now: DateTime<Utc>) -> Result<bool, InfraError> {
      self.check()?;
      Ok(self.update_where(id, |_| true, |r| r.archived(now)))
   }
}

#[async_trait]
impl TodoRepository for MockResourceRepository<Todo> {
   async fn update_description(
      &self,
      id: &TodoId,
      description: &str,
   ) -> Result<bool, InfraError> {
      self.check()?;
      Ok(self.update_where(id, Todo::is_active, |todo| {
         todo.with_description(description)
      }))
   }
}

#[cfg(test)]
mod tests {
   use chrono::Duration;
   use examdesk_domain::{
      todo::NewTodo,
      user::{NewUser, User, UserId},
   };
   use pretty_assertions::assert_eq;

   use super::*;

   fn now() -> DateTime<Utc> {
      DateTime::from_timestamp(1_700_000_000, 0).unwrap()
   }

   fn todo(description: &str) -> Todo {
      Todo::new(NewTodo {
         id:          TodoId::new(),
         description: description.to_string(),
         now:         now(),
      })
   }

   #[tokio::test]
   async fn test_アーカイブ済みの行も状態遷移と再アーカイブで上書きされる() {
      let sut = MockResourceRepository::<Todo>::new();
      let record = todo("Buy milk");
      sut.insert(&record).await.unwrap();
      let later = now() + Duration::hours(1);

      assert!(sut.archive(record.id(), now()).await.unwrap());
      assert!(sut.archive(record.id(), later).await.unwrap());
      assert!(sut.transition(record.id(), later).await.unwrap());

      assert!(sut.find_active().await.unwrap().is_empty());
      let stored = sut.find_by_id(record.id()).await.unwrap().unwrap();
      assert_eq!(stored.archived_at(), Some(later));
      assert_eq!(stored.completed_at(), Some(later));
   }

   #[tokio::test]
   async fn test_アーカイブ済みの説明文は更新されない() {
      let sut = MockResourceRepository::<Todo>::new();
      let record = todo("Buy milk");
      sut.insert(&record).await.unwrap();
      sut.archive(record.id(), now()).await.unwrap();

      assert!(!sut.update_description(record.id(), "x").await.unwrap());

      let stored = sut.find_by_id(record.id()).await.unwrap().unwrap();
      assert_eq!(stored.description(), "Buy milk");
   }

   #[tokio::test]
   async fn test_存在しないidの更新系操作は一致しない() {
      let sut = MockResourceRepository::<Todo>::new();
      let id = TodoId::new();

      assert!(!sut.transition(&id, now()).await.unwrap());
      assert!(!sut.archive(&id, now()).await.unwrap());
      assert!(!sut.update_description(&id, "x").await.unwrap());
   }

   #[tokio::test]
   async fn test_failingはすべての操作でエラーを返す() {
      let sut = MockResourceRepository::<User>::failing();
      let user = User::new(NewUser {
         id:    UserId::new(),
         name:  "Alice".to_string(),
         email: "alice@example.com".to_string(),
         now:   now(),
      });

      assert!(sut.find_active().await.is_err());
      assert!(sut.insert(&user).await.is_err());
      assert!(sut.archive(user.id(), now()).await.is_err());
   }
}
