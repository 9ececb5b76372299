//! # アプリケーション構築
//!
//! State の注入とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
   Router,
   routing::get,
};
use todo_domain::clock::Clock;
use todo_infra::repository::TodoRepository;
use tower_http::trace::TraceLayer;

use crate::handler::{
   TodoState,
   create_todo,
   delete_todo,
   get_todo,
   health_check,
   list_todos,
   update_todo,
};

/// ルーターを構築する
///
/// すべてのルートは `/api/v1` 配下。リポジトリと時刻プロバイダは
/// State 経由で明示的に注入する（プロセスワイドな可変ストアは持たない）。
pub fn build_app<R, C>(state: Arc<TodoState<R, C>>) -> Router
where
   R: TodoRepository + 'static,
   C: Clock + 'static,
{
   Router::new()
      .route("/api/v1/health", get(health_check))
      .route(
         "/api/v1/todos",
         get(list_todos::<R, C>).post(create_todo::<R, C>),
      )
      .route(
         "/api/v1/todos/{id}",
         get(get_todo::<R, C>)
            .put(update_todo::<R, C>)
            .delete(delete_todo::<R, C>),
      )
      .with_state(state)
      .layer(TraceLayer::new_for_http())
}
