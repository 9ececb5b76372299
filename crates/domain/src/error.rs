//! # ドメイン層エラー定義
//!
//! リクエスト検証・フィルタ構築で発生するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `IllegalField` | 400 Bad Request | 許可されていないフィールド名 |
//! | `MissingField` | 400 Bad Request | 必須フィールドの欠落 |
//! | `BadRequest` | 400 Bad Request | 値の型・形式の不正、id 不一致 |
//!
//! すべてストア操作の前に検出される。部分書き込み状態は発生しない。

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// 許可されていないフィールド名が含まれている
    ///
    /// 一覧クエリ・作成ボディ・更新ボディのフィールド名集合が
    /// 操作ごとの許可集合に収まらない場合に使用する。
    #[error("許可されていないフィールドです: {0}")]
    IllegalField(String),

    /// 必須フィールドが欠落している
    ///
    /// 作成ボディに `title` が含まれない場合に使用する。
    #[error("必須フィールドがありません: {0}")]
    MissingField(&'static str),

    /// 値の型や形式が不正、または id の不一致
    ///
    /// # 例
    ///
    /// - `deadline_at` が ISO-8601 としてパースできない
    /// - `completed` が真偽値以外
    /// - 更新ボディの `id` が対象レコードの id と異なる
    #[error("不正なリクエストです: {0}")]
    BadRequest(String),
}
