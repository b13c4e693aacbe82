//! # HTTP リクエストハンドラ
//!
//! ```text
//! handler.rs            # 親モジュール（re-export）
//! └── handler/
//!     ├── health.rs     # ヘルスチェック
//!     ├── resource.rs   # リソース共通（一覧・作成・状態遷移・論理削除）
//!     ├── todo.rs       # Todo のビューと説明文更新
//!     └── user.rs       # User のビュー
//! ```

pub mod health;
pub mod resource;
pub mod todo;
pub mod user;

pub use health::health_check;
pub use resource::{ResourceApi, ResourceState, archive, create, list, transition};
pub use todo::{CreateTodoRequest, TodoResponse, UpdateTodoRequest, update_todo};
pub use user::{CreateUserRequest, UserResponse};
