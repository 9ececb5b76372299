//! # ユースケース層
//!
//! ハンドラから呼び出されるビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - リポジトリと時刻プロバイダはジェネリクスで注入する（モック可能）
//! - 検証エラーはストアに触れる前に返す
//! - 各操作は独立したリクエスト・レスポンスサイクルで、この層は
//!   ロックもトランザクションも持たない

pub mod todo;

pub use todo::TodoUseCaseImpl;
