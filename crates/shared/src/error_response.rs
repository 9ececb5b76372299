//! # エラーレスポンス
//!
//! API 全体で共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - ワイヤ形式は `{"error": "<message>"}` の 1 フィールドのみ
//! - メッセージは固定文字列（`Illegal field` / `Missing field` /
//!   `Bad request` / `Todo not found` / `Internal server error`）
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）。
//!   axum の `IntoResponse` 変換は API 側の責務

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// クライアントには固定のメッセージのみを返し、内部詳細は漏らさない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub error: String,
}

impl ErrorResponse {
   /// 汎用コンストラクタ
   pub fn new(message: impl Into<String>) -> Self {
      Self {
         error: message.into(),
      }
   }

   /// 許可されていないフィールド名（400）
   pub fn illegal_field() -> Self {
      Self::new("Illegal field")
   }

   /// 必須フィールドの欠落（400）
   pub fn missing_field() -> Self {
      Self::new("Missing field")
   }

   /// 値の不正・id 不一致（400）
   pub fn bad_request() -> Self {
      Self::new("Bad request")
   }

   /// Todo が存在しない（404）
   pub fn todo_not_found() -> Self {
      Self::new("Todo not found")
   }

   /// ストア障害などの内部エラー（500）
   pub fn internal_error() -> Self {
      Self::new("Internal server error")
   }
}
