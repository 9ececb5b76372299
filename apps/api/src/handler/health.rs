//! # ヘルスチェックハンドラ
//!
//! サーバーの稼働状態を確認するためのエンドポイント。
//!
//! ## エンドポイント
//!
//! ```text
//! GET /api/v1/health
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! {"status": "ok"}
//! ```

use axum::Json;
use todo_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// 固定の "ok" ペイロードを返す。ストアには一切触れない。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
