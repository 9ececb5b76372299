//! # Todo ドメイン層
//!
//! Todo サービスのビジネスルールの中核を定義する。
//!
//! ## 設計方針
//!
//! このクレートは I/O を一切持たない純粋なロジックのみを配置する:
//!
//! - **エンティティ**: [`todo::Todo`] と、作成・更新ペイロードの型
//! - **リクエスト検証**: 操作ごとに許可されるフィールド名集合の判定（[`validation`]）
//! - **フィルタエンジン**: 一覧クエリから完全一致フィルタと window 条件を構築（[`filter`]）
//! - **時刻抽象**: テストで固定時刻を注入するための [`clock::Clock`]
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB）には一切依存しない。

pub mod clock;
pub mod error;
pub mod filter;
pub mod todo;
pub mod validation;

pub use error::DomainError;
