//! # リポジトリ実装
//!
//! ドメイン層のエンティティを永続化するリポジトリを提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: トレイトを介してユースケース層からモック可能にする
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **レコード単位の原子性**: 各操作は単一レコードに閉じる。複数レコードに
//!   またがるトランザクションは張らない

pub mod todo_repository;

pub use todo_repository::{PostgresTodoRepository, TodoRepository};
