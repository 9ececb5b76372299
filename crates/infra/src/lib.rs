//! # Todo インフラ層
//!
//! 外部システム（PostgreSQL）との接続・永続化を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理（[`db`]）
//! - **リポジトリ実装**: [`repository::TodoRepository`] トレイトの Postgres 実装
//! - **テスト用モック**: インメモリ実装（`test-utils` feature、[`mock`]）
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。

pub mod db;
pub mod error;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::InfraError;
