//! # API エラー定義
//!
//! API で発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## ステータスコードの対応
//!
//! | エラー種別 | ステータス | ボディ |
//! |-----------|-----------|--------|
//! | `IllegalField` | 400 | `{"error": "Illegal field"}` |
//! | `MissingField` | 400 | `{"error": "Missing field"}` |
//! | `BadRequest` | 400 | `{"error": "Bad request"}` |
//! | `NotFound` | 404 | `{"error": "Todo not found"}` |
//! | `Infra` | 500 | `{"error": "Internal server error"}` |
//!
//! ストア障害（`Infra`）の詳細はログにのみ出力し、クライアントには漏らさない。

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_domain::DomainError;
use todo_infra::InfraError;
use todo_shared::ErrorResponse;

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
   /// 許可されていないフィールド名
   #[error("許可されていないフィールドです: {0}")]
   IllegalField(String),

   /// 必須フィールドの欠落
   #[error("必須フィールドがありません: {0}")]
   MissingField(&'static str),

   /// 値の不正・id 不一致
   #[error("不正なリクエストです: {0}")]
   BadRequest(String),

   /// Todo が存在しない
   #[error("Todo が見つかりません: {0}")]
   NotFound(i64),

   /// ストア障害
   #[error("インフラエラー: {0}")]
   Infra(#[from] InfraError),
}

impl From<DomainError> for ApiError {
   fn from(error: DomainError) -> Self {
      match error {
         DomainError::IllegalField(name) => Self::IllegalField(name),
         DomainError::MissingField(name) => Self::MissingField(name),
         DomainError::BadRequest(msg) => Self::BadRequest(msg),
      }
   }
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let (status, body) = match &self {
         ApiError::IllegalField(name) => {
            tracing::debug!("許可されていないフィールド: {}", name);
            (StatusCode::BAD_REQUEST, ErrorResponse::illegal_field())
         }
         ApiError::MissingField(name) => {
            tracing::debug!("必須フィールドの欠落: {}", name);
            (StatusCode::BAD_REQUEST, ErrorResponse::missing_field())
         }
         ApiError::BadRequest(msg) => {
            tracing::debug!("不正なリクエスト: {}", msg);
            (StatusCode::BAD_REQUEST, ErrorResponse::bad_request())
         }
         ApiError::NotFound(id) => {
            tracing::debug!("Todo が見つかりません: id={}", id);
            (StatusCode::NOT_FOUND, ErrorResponse::todo_not_found())
         }
         ApiError::Infra(e) => {
            tracing::error!("インフラエラー: {}\n{}", e, e.span_trace());
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               ErrorResponse::internal_error(),
            )
         }
      };

      (status, Json(body)).into_response()
   }
}
