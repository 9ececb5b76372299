//! # Todo API ハンドラ
//!
//! Todo の CRUD エンドポイントを実装する。
//!
//! ボディは型付き構造体ではなく JSON オブジェクトとして受け取る。
//! 操作ごとの許可フィールド集合の検証（未知フィールドの拒否を含む）を
//! ドメイン層の集合チェックで行うため。

use std::{collections::HashMap, sync::Arc};

use axum::{
   Json,
   extract::{Path, Query, State},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};
use todo_domain::{
   clock::Clock,
   todo::{Todo, TodoId},
};
use todo_infra::repository::TodoRepository;

use crate::{error::ApiError, usecase::TodoUseCaseImpl};

/// Todo ハンドラーの State
pub struct TodoState<R, C> {
   pub usecase: TodoUseCaseImpl<R, C>,
}

/// Todo のレスポンス DTO
///
/// 常に全フィールドを含む。タイムスタンプは ISO-8601（TZ なし）文字列、
/// 未設定の省略可能フィールドは null になる。
#[derive(Debug, Serialize)]
pub struct TodoDto {
   pub id:          i64,
   pub title:       String,
   pub description: Option<String>,
   pub completed:   bool,
   pub deadline_at: Option<String>,
   pub created_at:  String,
   pub updated_at:  String,
}

impl TodoDto {
   pub fn from_todo(todo: &Todo) -> Self {
      Self {
         id:          todo.id().as_i64(),
         title:       todo.title().to_string(),
         description: todo.description().map(str::to_string),
         completed:   todo.completed(),
         deadline_at: todo.deadline_at().map(iso_string),
         created_at:  iso_string(todo.created_at()),
         updated_at:  iso_string(todo.updated_at()),
      }
   }
}

/// ISO-8601（TZ なし）文字列にフォーマットする
///
/// 秒以下はゼロのとき省略する（`2023-02-27T00:00:00`）。
fn iso_string(datetime: NaiveDateTime) -> String {
   datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Todo 一覧を取得する
///
/// ## エンドポイント
/// GET /api/v1/todos?completed=true&window=7
pub async fn list_todos<R, C>(
   State(state): State<Arc<TodoState<R, C>>>,
   Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError>
where
   R: TodoRepository,
   C: Clock,
{
   let todos = state.usecase.list_todos(&params).await?;
   let dtos: Vec<TodoDto> = todos.iter().map(TodoDto::from_todo).collect();

   Ok((StatusCode::OK, Json(dtos)).into_response())
}

/// Todo を 1 件取得する
///
/// ## エンドポイント
/// GET /api/v1/todos/{id}
pub async fn get_todo<R, C>(
   State(state): State<Arc<TodoState<R, C>>>,
   Path(id): Path<i64>,
) -> Result<Response, ApiError>
where
   R: TodoRepository,
   C: Clock,
{
   let todo = state.usecase.get_todo(TodoId::from_i64(id)).await?;

   Ok((StatusCode::OK, Json(TodoDto::from_todo(&todo))).into_response())
}

/// Todo を作成する
///
/// ## エンドポイント
/// POST /api/v1/todos
pub async fn create_todo<R, C>(
   State(state): State<Arc<TodoState<R, C>>>,
   Json(body): Json<Map<String, Value>>,
) -> Result<Response, ApiError>
where
   R: TodoRepository,
   C: Clock,
{
   let todo = state.usecase.create_todo(&body).await?;

   Ok((StatusCode::CREATED, Json(TodoDto::from_todo(&todo))).into_response())
}

/// Todo を更新する
///
/// ## エンドポイント
/// PUT /api/v1/todos/{id}
pub async fn update_todo<R, C>(
   State(state): State<Arc<TodoState<R, C>>>,
   Path(id): Path<i64>,
   Json(body): Json<Map<String, Value>>,
) -> Result<Response, ApiError>
where
   R: TodoRepository,
   C: Clock,
{
   let todo = state
      .usecase
      .update_todo(TodoId::from_i64(id), &body)
      .await?;

   Ok((StatusCode::OK, Json(TodoDto::from_todo(&todo))).into_response())
}

/// Todo を削除する
///
/// 存在しない id でも 200 を返す（冪等削除）。その場合のボディは空の
/// JSON オブジェクト。
///
/// ## エンドポイント
/// DELETE /api/v1/todos/{id}
pub async fn delete_todo<R, C>(
   State(state): State<Arc<TodoState<R, C>>>,
   Path(id): Path<i64>,
) -> Result<Response, ApiError>
where
   R: TodoRepository,
   C: Clock,
{
   match state.usecase.delete_todo(TodoId::from_i64(id)).await? {
      Some(todo) => Ok((StatusCode::OK, Json(TodoDto::from_todo(&todo))).into_response()),
      None => Ok((StatusCode::OK, Json(Map::<String, Value>::new())).into_response()),
   }
}
