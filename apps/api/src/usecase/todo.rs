//! # Todo ユースケース
//!
//! Todo の一覧・取得・作成・更新・削除のビジネスロジックを実装する。

use std::collections::HashMap;

use serde_json::{Map, Value};
use todo_domain::{
   clock::Clock,
   filter::{ListQuery, within_window},
   todo::{Todo, TodoDraft, TodoId, TodoPatch},
};
use todo_infra::repository::TodoRepository;

use crate::error::ApiError;

/// Todo ユースケース実装
///
/// R: TodoRepository, C: Clock
pub struct TodoUseCaseImpl<R, C> {
   repository: R,
   clock:      C,
}

impl<R, C> TodoUseCaseImpl<R, C>
where
   R: TodoRepository,
   C: Clock,
{
   pub fn new(repository: R, clock: C) -> Self {
      Self { repository, clock }
   }

   /// 一覧クエリに一致する Todo を返す
   ///
   /// 1. パラメータ名を検証し、完全一致フィルタと window 条件を構築する
   /// 2. ストアには完全一致フィルタのみを渡す
   /// 3. window 指定時は `deadline_at - now <= window` で絞り込む
   ///    （下限なし: 期限超過も通過する）
   pub async fn list_todos(
      &self,
      params: &HashMap<String, String>,
   ) -> Result<Vec<Todo>, ApiError> {
      let query = ListQuery::from_params(params)?;
      let todos = self.repository.find_by_filter(&query.filter).await?;

      match query.window {
         Some(window) => {
            let now = self.clock.now();
            Ok(todos
               .into_iter()
               .filter(|todo| within_window(todo, now, window))
               .collect())
         }
         None => Ok(todos),
      }
   }

   /// ID で Todo を取得する
   pub async fn get_todo(&self, id: TodoId) -> Result<Todo, ApiError> {
      self
         .repository
         .find_by_id(id)
         .await?
         .ok_or(ApiError::NotFound(id.as_i64()))
   }

   /// Todo を作成する
   ///
   /// `id` はストアが採番し、`created_at` / `updated_at` は現在時刻になる。
   pub async fn create_todo(&self, body: &Map<String, Value>) -> Result<Todo, ApiError> {
      let draft = TodoDraft::from_body(body)?;
      let todo = self.repository.insert(&draft, self.clock.now()).await?;

      tracing::info!(id = %todo.id(), "Todo を作成しました");
      Ok(todo)
   }

   /// Todo を更新する
   ///
   /// ボディに存在するフィールドのみ上書きする。ボディの `id` が対象の
   /// id と異なる場合は拒否する（id は採番後に変更されない）。
   pub async fn update_todo(
      &self,
      id: TodoId,
      body: &Map<String, Value>,
   ) -> Result<Todo, ApiError> {
      let patch = TodoPatch::from_body(body)?;

      let todo = self
         .repository
         .find_by_id(id)
         .await?
         .ok_or(ApiError::NotFound(id.as_i64()))?;

      if let Some(patch_id) = patch.id
         && patch_id != todo.id()
      {
         return Err(ApiError::BadRequest(format!(
            "id は変更できません: {} -> {}",
            todo.id(),
            patch_id,
         )));
      }

      let updated = todo.apply(&patch, self.clock.now());
      self.repository.update(&updated).await?;

      Ok(updated)
   }

   /// Todo を削除する
   ///
   /// 存在しない id は成功として扱う（冪等削除）。削除した場合は
   /// 削除済みレコードを返す。
   pub async fn delete_todo(&self, id: TodoId) -> Result<Option<Todo>, ApiError> {
      let Some(todo) = self.repository.find_by_id(id).await? else {
         return Ok(None);
      };

      self.repository.delete(id).await?;

      tracing::info!(%id, "Todo を削除しました");
      Ok(Some(todo))
   }
}
