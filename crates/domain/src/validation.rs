//! # リクエスト検証
//!
//! 操作ごとに許可されるフィールド名集合の判定を行う。
//!
//! ## 設計方針
//!
//! - ストア操作の前に評価される純粋な述語。副作用を持たない
//! - 許可集合・必須集合は操作ごとの定数として定義し、テストから参照可能にする
//! - 値の型チェックはここでは行わない（ペイロード構築側の責務）
//!
//! ## 許可集合
//!
//! | 操作 | 必須 | 許可 |
//! |------|------|------|
//! | 一覧クエリ | — | title, description, completed, deadline_at, id, window |
//! | 作成ボディ | title | title, completed, id, created_at, description, deadline_at |
//! | 更新ボディ | — | title, completed, created_at, description, deadline_at |
//!
//! 更新の許可集合に `id` は含まれない。ボディに `id` を含む更新は
//! この検証で拒否される。ユースケース層には別途、対象レコードとの
//! id 整合性チェックが存在する。

use crate::DomainError;

/// 一覧クエリで許可されるパラメータ名
pub const LIST_QUERY_FIELDS: &[&str] = &[
    "title",
    "description",
    "completed",
    "deadline_at",
    "id",
    "window",
];

/// 作成ボディで許可されるフィールド名
///
/// `id` / `created_at` は受理するが値は無視される（ストアが採番・設定する）。
pub const CREATE_FIELDS: &[&str] = &[
    "title",
    "completed",
    "id",
    "created_at",
    "description",
    "deadline_at",
];

/// 作成ボディの必須フィールド名
pub const CREATE_REQUIRED_FIELDS: &[&str] = &["title"];

/// 更新ボディで許可されるフィールド名（`id` を含まない）
pub const UPDATE_FIELDS: &[&str] = &[
    "title",
    "completed",
    "created_at",
    "description",
    "deadline_at",
];

/// 一覧クエリのパラメータ名集合を検証する
///
/// 許可集合に含まれない名前が 1 つでもあれば [`DomainError::IllegalField`]。
pub fn validate_list_query<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), DomainError> {
    require_subset(names, LIST_QUERY_FIELDS)
}

/// 作成ボディのフィールド名集合を検証する
///
/// 必須集合の充足を先に確認し（[`DomainError::MissingField`]）、
/// その後に許可集合への包含を確認する（[`DomainError::IllegalField`]）。
pub fn validate_create_fields<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), DomainError> {
    let names: Vec<&str> = names.into_iter().collect();
    for required in CREATE_REQUIRED_FIELDS {
        if !names.contains(required) {
            return Err(DomainError::MissingField(required));
        }
    }
    require_subset(names, CREATE_FIELDS)
}

/// 更新ボディのフィールド名集合を検証する
pub fn validate_update_fields<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), DomainError> {
    require_subset(names, UPDATE_FIELDS)
}

/// 名前集合が許可集合の部分集合であることを確認する
fn require_subset<'a>(
    names: impl IntoIterator<Item = &'a str>,
    allowed: &[&str],
) -> Result<(), DomainError> {
    for name in names {
        if !allowed.contains(&name) {
            return Err(DomainError::IllegalField(name.to_string()));
        }
    }
    Ok(())
}
