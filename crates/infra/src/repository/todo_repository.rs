//! # TodoRepository
//!
//! Todo の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **完全一致クエリ**: [`TodoFilter`] の `Some` フィールドだけを
//!   WHERE 句の等値条件として動的に組み立てる（範囲・部分一致なし）
//! - **採番はストア側**: `id` は BIGSERIAL。INSERT の RETURNING で
//!   採番済みレコードを受け取る
//! - **明示的な順序なし**: 一覧はストアが返した順のまま返す

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, QueryBuilder};
use todo_domain::{
    filter::TodoFilter,
    todo::{Todo, TodoDraft, TodoId},
};

use crate::error::InfraError;

/// Todo リポジトリトレイト
///
/// 各操作は単一レコードに対して原子的であることをストアに期待する。
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// 完全一致フィルタで Todo を検索する（空フィルタなら全件）
    async fn find_by_filter(&self, filter: &TodoFilter) -> Result<Vec<Todo>, InfraError>;

    /// ID で Todo を検索する
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError>;

    /// Todo を挿入し、採番済みのレコードを返す
    ///
    /// `created_at` / `updated_at` はどちらも `now` になる。
    async fn insert(&self, draft: &TodoDraft, now: NaiveDateTime) -> Result<Todo, InfraError>;

    /// Todo を更新する（`updated_at` 含め、渡されたエンティティの状態を反映）
    async fn update(&self, todo: &Todo) -> Result<(), InfraError>;

    /// Todo を削除する
    async fn delete(&self, id: TodoId) -> Result<(), InfraError>;
}

/// todos テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id:          i64,
    title:       String,
    description: Option<String>,
    completed:   bool,
    deadline_at: Option<NaiveDateTime>,
    created_at:  NaiveDateTime,
    updated_at:  NaiveDateTime,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo::from_db(
            TodoId::from_i64(row.id),
            row.title,
            row.description,
            row.completed,
            row.deadline_at,
            row.created_at,
            row.updated_at,
        )
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, completed, deadline_at, created_at, updated_at FROM todos";

/// PostgreSQL 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_filter(&self, filter: &TodoFilter) -> Result<Vec<Todo>, InfraError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);

        if !filter.is_empty() {
            builder.push(" WHERE ");
            let mut conditions = builder.separated(" AND ");
            if let Some(id) = filter.id {
                conditions.push("id = ").push_bind_unseparated(id.as_i64());
            }
            if let Some(title) = &filter.title {
                conditions
                    .push("title = ")
                    .push_bind_unseparated(title.clone());
            }
            if let Some(description) = &filter.description {
                conditions
                    .push("description = ")
                    .push_bind_unseparated(description.clone());
            }
            if let Some(completed) = filter.completed {
                conditions
                    .push("completed = ")
                    .push_bind_unseparated(completed);
            }
            if let Some(deadline_at) = filter.deadline_at {
                conditions
                    .push("deadline_at = ")
                    .push_bind_unseparated(deadline_at);
            }
        }

        let rows: Vec<TodoRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError> {
        let row: Option<TodoRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = $1"))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Todo::from))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, draft: &TodoDraft, now: NaiveDateTime) -> Result<Todo, InfraError> {
        let row: TodoRow = sqlx::query_as(
            r#"
            INSERT INTO todos (title, description, completed, deadline_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, title, description, completed, deadline_at, created_at, updated_at
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.completed)
        .bind(draft.deadline_at)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(Todo::from(row))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %todo.id()))]
    async fn update(&self, todo: &Todo) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            UPDATE todos
            SET title = $2, description = $3, completed = $4, deadline_at = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(todo.id().as_i64())
        .bind(todo.title())
        .bind(todo.description())
        .bind(todo.completed())
        .bind(todo.deadline_at())
        .bind(todo.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: TodoId) -> Result<(), InfraError> {
        sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
