//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todo-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use todo_domain::{
   filter::TodoFilter,
   todo::{Todo, TodoDraft, TodoId},
};

use crate::{error::InfraError, repository::TodoRepository};

/// インメモリ実装の TodoRepository
///
/// `id` は挿入順に 1 から採番する。完全一致フィルタは
/// [`TodoFilter::matches`] に委譲し、挿入順のまま返す。
#[derive(Clone, Default)]
pub struct MockTodoRepository {
   todos:   Arc<Mutex<Vec<Todo>>>,
   next_id: Arc<Mutex<i64>>,
}

impl MockTodoRepository {
   pub fn new() -> Self {
      Self {
         todos:   Arc::new(Mutex::new(Vec::new())),
         next_id: Arc::new(Mutex::new(1)),
      }
   }

   /// 保持している全 Todo を返す（テストの検証用）
   pub fn all(&self) -> Vec<Todo> {
      self.todos.lock().unwrap().clone()
   }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
   async fn find_by_filter(&self, filter: &TodoFilter) -> Result<Vec<Todo>, InfraError> {
      Ok(self
         .todos
         .lock()
         .unwrap()
         .iter()
         .filter(|todo| filter.matches(todo))
         .cloned()
         .collect())
   }

   async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError> {
      Ok(self
         .todos
         .lock()
         .unwrap()
         .iter()
         .find(|todo| todo.id() == id)
         .cloned())
   }

   async fn insert(&self, draft: &TodoDraft, now: NaiveDateTime) -> Result<Todo, InfraError> {
      let mut next_id = self.next_id.lock().unwrap();
      let todo = Todo::from_db(
         TodoId::from_i64(*next_id),
         draft.title.clone(),
         draft.description.clone(),
         draft.completed,
         draft.deadline_at,
         now,
         now,
      );
      *next_id += 1;

      self.todos.lock().unwrap().push(todo.clone());
      Ok(todo)
   }

   async fn update(&self, todo: &Todo) -> Result<(), InfraError> {
      let mut todos = self.todos.lock().unwrap();
      if let Some(pos) = todos.iter().position(|t| t.id() == todo.id()) {
         todos[pos] = todo.clone();
      }
      Ok(())
   }

   async fn delete(&self, id: TodoId) -> Result<(), InfraError> {
      self.todos.lock().unwrap().retain(|t| t.id() != id);
      Ok(())
   }
}
