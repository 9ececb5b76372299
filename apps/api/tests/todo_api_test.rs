//! # Todo API 統合テスト
//!
//! モックリポジトリと固定時刻でルーター全体を駆動し、
//! エンドポイントごとのワイヤレベルの振る舞いを検証する。

use std::sync::Arc;

use axum::{
   Router,
   body::Body,
   http::{Method, Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use todo_api::{app::build_app, handler::TodoState, usecase::TodoUseCaseImpl};
use todo_domain::clock::FixedClock;
use todo_infra::mock::MockTodoRepository;
use tower::ServiceExt;

/// テストの「現在時刻」
const NOW: &str = "2023-02-20T00:00:00";

/// モックリポジトリと固定時刻でアプリを構築する
fn test_app() -> Router {
   let clock = FixedClock::new(NOW.parse().unwrap());
   let usecase = TodoUseCaseImpl::new(MockTodoRepository::new(), clock);
   build_app(Arc::new(TodoState { usecase }))
}

/// リクエストを送信し、ステータスと JSON ボディを返す
async fn send(
   app: &Router,
   method: Method,
   uri: &str,
   body: Option<Value>,
) -> (StatusCode, Value) {
   let request = match body {
      Some(json) => Request::builder()
         .method(method)
         .uri(uri)
         .header(header::CONTENT_TYPE, "application/json")
         .body(Body::from(json.to_string()))
         .unwrap(),
      None => Request::builder()
         .method(method)
         .uri(uri)
         .body(Body::empty())
         .unwrap(),
   };

   let response = app.clone().oneshot(request).await.unwrap();
   let status = response.status();
   let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
   let value = serde_json::from_slice(&bytes).unwrap();

   (status, value)
}

async fn create(app: &Router, body: Value) -> Value {
   let (status, created) = send(app, Method::POST, "/api/v1/todos", Some(body)).await;
   assert_eq!(status, StatusCode::CREATED);
   created
}

// =========================================================================
// ヘルスチェック
// =========================================================================

#[tokio::test]
async fn test_ヘルスチェックは固定のokを返す() {
   let app = test_app();

   let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body, json!({"status": "ok"}));
}

// =========================================================================
// 作成
// =========================================================================

#[tokio::test]
async fn test_titleのみの作成はデフォルト値で201を返す() {
   let app = test_app();

   let (status, body) =
      send(&app, Method::POST, "/api/v1/todos", Some(json!({"title": "Buy milk"}))).await;

   assert_eq!(status, StatusCode::CREATED);
   assert_eq!(
      body,
      json!({
         "id": 1,
         "title": "Buy milk",
         "description": null,
         "completed": false,
         "deadline_at": null,
         "created_at": NOW,
         "updated_at": NOW
      })
   );
}

#[tokio::test]
async fn test_title欠落の作成はmissing_fieldで400を返す() {
   let app = test_app();

   let (status, body) = send(
      &app,
      Method::POST,
      "/api/v1/todos",
      Some(json!({"completed": true})),
   )
   .await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(body, json!({"error": "Missing field"}));
}

#[tokio::test]
async fn test_未知フィールドの作成はillegal_fieldで400を返す() {
   let app = test_app();

   let (status, body) = send(
      &app,
      Method::POST,
      "/api/v1/todos",
      Some(json!({"title": "x", "color": "red"})),
   )
   .await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(body, json!({"error": "Illegal field"}));
}

#[tokio::test]
async fn test_作成と取得のラウンドトリップで表現が一致する() {
   let app = test_app();
   let created = create(
      &app,
      json!({
         "title": "Watch lecture",
         "description": "ECHO360 week 1",
         "deadline_at": "2023-02-27T00:00:00"
      }),
   )
   .await;

   let id = created["id"].as_i64().unwrap();
   let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/todos/{id}"), None).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(fetched, created);
}

// =========================================================================
// 取得
// =========================================================================

#[tokio::test]
async fn test_存在しないidの取得は404を返す() {
   let app = test_app();

   let (status, body) = send(&app, Method::GET, "/api/v1/todos/42", None).await;

   assert_eq!(status, StatusCode::NOT_FOUND);
   assert_eq!(body, json!({"error": "Todo not found"}));
}

// =========================================================================
// 一覧
// =========================================================================

#[tokio::test]
async fn test_パラメータなしの一覧は全件を返す() {
   let app = test_app();
   create(&app, json!({"title": "one"})).await;
   create(&app, json!({"title": "two"})).await;

   let (status, body) = send(&app, Method::GET, "/api/v1/todos", None).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_completedフィルタは一致する部分集合のみ返す() {
   let app = test_app();
   create(&app, json!({"title": "done", "completed": true})).await;
   create(&app, json!({"title": "open"})).await;

   let (status, body) = send(&app, Method::GET, "/api/v1/todos?completed=true", None).await;
   assert_eq!(status, StatusCode::OK);
   let titles: Vec<&str> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|t| t["title"].as_str().unwrap())
      .collect();
   assert_eq!(titles, vec!["done"]);

   let (_, body) = send(&app, Method::GET, "/api/v1/todos?completed=false", None).await;
   let titles: Vec<&str> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|t| t["title"].as_str().unwrap())
      .collect();
   assert_eq!(titles, vec!["open"]);
}

#[tokio::test]
async fn test_completedにtrue以外の文字列は偽として解釈される() {
   let app = test_app();
   create(&app, json!({"title": "done", "completed": true})).await;
   create(&app, json!({"title": "open"})).await;

   let (status, body) = send(&app, Method::GET, "/api/v1/todos?completed=yes", None).await;

   assert_eq!(status, StatusCode::OK);
   let titles: Vec<&str> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|t| t["title"].as_str().unwrap())
      .collect();
   assert_eq!(titles, vec!["open"]);
}

#[tokio::test]
async fn test_未知のクエリパラメータはillegal_fieldで400を返す() {
   let app = test_app();

   let (status, body) = send(&app, Method::GET, "/api/v1/todos?foo=1", None).await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(body, json!({"error": "Illegal field"}));
}

#[tokio::test]
async fn test_window0は期限がいまちょうどを含み未来を除く() {
   let app = test_app();
   create(&app, json!({"title": "due now", "deadline_at": NOW})).await;
   create(
      &app,
      json!({"title": "future", "deadline_at": "2023-02-21T00:00:00"}),
   )
   .await;

   let (status, body) = send(&app, Method::GET, "/api/v1/todos?window=0", None).await;

   assert_eq!(status, StatusCode::OK);
   let titles: Vec<&str> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|t| t["title"].as_str().unwrap())
      .collect();
   assert_eq!(titles, vec!["due now"]);
}

#[tokio::test]
async fn test_windowは期限超過を含み期限なしを除く() {
   let app = test_app();
   create(
      &app,
      json!({"title": "overdue", "deadline_at": "2023-01-01T00:00:00"}),
   )
   .await;
   create(&app, json!({"title": "no deadline"})).await;
   create(
      &app,
      json!({"title": "in window", "deadline_at": "2023-02-25T00:00:00"}),
   )
   .await;

   let (status, body) = send(&app, Method::GET, "/api/v1/todos?window=7", None).await;

   assert_eq!(status, StatusCode::OK);
   let titles: Vec<&str> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|t| t["title"].as_str().unwrap())
      .collect();
   assert_eq!(titles, vec!["overdue", "in window"]);
}

// =========================================================================
// 更新
// =========================================================================

#[tokio::test]
async fn test_更新は存在するフィールドのみ上書きしupdated_atを進める() {
   let app = test_app();
   let created = create(&app, json!({"title": "Buy milk"})).await;
   let id = created["id"].as_i64().unwrap();

   let (status, body) = send(
      &app,
      Method::PUT,
      &format!("/api/v1/todos/{id}"),
      Some(json!({"completed": true})),
   )
   .await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["completed"], json!(true));
   assert_eq!(body["title"], json!("Buy milk"));
}

#[tokio::test]
async fn test_異なるidを含む更新は400で変更が起きない() {
   let app = test_app();
   let created = create(&app, json!({"title": "Buy milk"})).await;
   let id = created["id"].as_i64().unwrap();

   let (status, _) = send(
      &app,
      Method::PUT,
      &format!("/api/v1/todos/{id}"),
      Some(json!({"id": id + 1, "title": "hacked"})),
   )
   .await;
   assert_eq!(status, StatusCode::BAD_REQUEST);

   // 変更が起きていないことを取得で確認する
   let (_, fetched) = send(&app, Method::GET, &format!("/api/v1/todos/{id}"), None).await;
   assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_存在しないidの更新は404を返す() {
   let app = test_app();

   let (status, body) = send(
      &app,
      Method::PUT,
      "/api/v1/todos/42",
      Some(json!({"title": "x"})),
   )
   .await;

   assert_eq!(status, StatusCode::NOT_FOUND);
   assert_eq!(body, json!({"error": "Todo not found"}));
}

// =========================================================================
// 削除
// =========================================================================

#[tokio::test]
async fn test_削除は削除済みレコードを返す() {
   let app = test_app();
   let created = create(&app, json!({"title": "Buy milk"})).await;
   let id = created["id"].as_i64().unwrap();

   let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/todos/{id}"), None).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body, created);

   // 本当に消えていること
   let (status, _) = send(&app, Method::GET, &format!("/api/v1/todos/{id}"), None).await;
   assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_存在しないidの削除は200と空オブジェクトを返す() {
   let app = test_app();

   let (status, body) = send(&app, Method::DELETE, "/api/v1/todos/42", None).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body, json!({}));
}
