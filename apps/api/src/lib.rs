//! # Todo API ライブラリ
//!
//! ルーター構築・ハンドラ・ユースケースを公開する。
//! 統合テストはここから [`app::build_app`] を使ってルーターを組み立てる。

pub mod app;
pub mod error;
pub mod handler;
pub mod usecase;
