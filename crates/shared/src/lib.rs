//! # Todo 共有ユーティリティ
//!
//! API 本体とテストの双方から使用されるワイヤレベルの共通型を提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なデータ型のみを配置
//! - axum への依存を入れない（`IntoResponse` 変換は API 側の責務）
//! - 外部クレートへの依存は最小限に抑える

pub mod error_response;
pub mod health;

pub use error_response::ErrorResponse;
pub use health::HealthResponse;
