//! # Todo エンティティ
//!
//! 単一のタスクレコードを表現するドメインモデル。
//!
//! ## ライフサイクル
//!
//! - **作成**: [`TodoDraft`] をリポジトリに渡し、ストアが `id` を採番する
//! - **更新**: [`TodoPatch`] をボディから構築し、[`Todo::apply`] で
//!   存在するフィールドのみ上書きする（`updated_at` は自動更新）
//! - **削除**: 完全削除。ソフトデリートやトゥームストーンは持たない
//!
//! ## 不変条件
//!
//! - `id` は採番後に変更されない
//! - `title` は作成後に null にならない（null を含む更新は拒否）
//! - タイムスタンプはタイムゾーンなし（ISO-8601、TZ 指定なし）で扱う

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::{DomainError, validation};

/// Todo の一意識別子
///
/// ストア（BIGSERIAL）が採番する整数 ID。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(i64);

impl TodoId {
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ISO-8601 文字列（TZ なし）をパースする
///
/// `2023-02-27T00:00:00` 形式に加え、日付のみ（`2023-02-27`）も
/// 深夜 0 時として受け入れる。
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, DomainError> {
    if let Ok(dt) = value.parse::<NaiveDateTime>() {
        return Ok(dt);
    }
    if let Ok(date) = value.parse::<NaiveDate>() {
        return Ok(date.and_hms_opt(0, 0, 0).expect("midnight is always valid"));
    }
    Err(DomainError::BadRequest(format!(
        "deadline_at が ISO-8601 形式ではありません: {value}"
    )))
}

// =========================================================================
// Todo（エンティティ）
// =========================================================================

/// Todo エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id:          TodoId,
    title:       String,
    description: Option<String>,
    completed:   bool,
    deadline_at: Option<NaiveDateTime>,
    created_at:  NaiveDateTime,
    updated_at:  NaiveDateTime,
}

impl Todo {
    /// データベースから Todo を復元する
    pub fn from_db(
        id: TodoId,
        title: String,
        description: Option<String>,
        completed: bool,
        deadline_at: Option<NaiveDateTime>,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            title,
            description,
            completed,
            deadline_at,
            created_at,
            updated_at,
        }
    }

    /// パッチに存在するフィールドのみ上書きした新インスタンスを返す
    ///
    /// 存在しないフィールドは元の値を維持する。`updated_at` は `now` になる。
    pub fn apply(&self, patch: &TodoPatch, now: NaiveDateTime) -> Self {
        Self {
            id:          self.id,
            title:       patch.title.clone().unwrap_or_else(|| self.title.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            completed:   patch.completed.unwrap_or(self.completed),
            deadline_at: patch.deadline_at.unwrap_or(self.deadline_at),
            created_at:  self.created_at,
            updated_at:  now,
        }
    }

    // --- ゲッター ---

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn deadline_at(&self) -> Option<NaiveDateTime> {
        self.deadline_at
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }
}

// =========================================================================
// TodoDraft（作成ペイロード）
// =========================================================================

/// 作成リクエストから構築するペイロード
///
/// `id` / `created_at` / `updated_at` はストアと時刻プロバイダが決める。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub title:       String,
    pub description: Option<String>,
    pub completed:   bool,
    pub deadline_at: Option<NaiveDateTime>,
}

impl TodoDraft {
    /// 作成ボディの JSON オブジェクトからペイロードを構築する
    ///
    /// フィールド名集合の検証（[`validation::validate_create_fields`]）を
    /// 通過した後、値を型付きで取り出す。`completed` 省略時は false。
    /// ボディ内の `id` / `created_at` は許可されるが無視される（ストア採番）。
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, DomainError> {
        validation::validate_create_fields(body.keys().map(String::as_str))?;

        let title = match body.get("title") {
            Some(Value::String(s)) => s.clone(),
            _ => {
                return Err(DomainError::BadRequest(
                    "title は文字列である必要があります".to_string(),
                ));
            }
        };

        Ok(Self {
            title,
            description: optional_string(body, "description")?,
            completed: match body.get("completed") {
                None => false,
                Some(Value::Bool(b)) => *b,
                Some(_) => {
                    return Err(DomainError::BadRequest(
                        "completed は真偽値である必要があります".to_string(),
                    ));
                }
            },
            deadline_at: optional_datetime(body, "deadline_at")?,
        })
    }
}

// =========================================================================
// TodoPatch（更新ペイロード）
// =========================================================================

/// 更新リクエストから構築するペイロード
///
/// 外側の `Option` が「ボディにフィールドが存在したか」、内側の `Option` が
/// 「null が指定されたか」を表す。存在しないフィールドは更新しない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub id:          Option<TodoId>,
    pub title:       Option<String>,
    pub description: Option<Option<String>>,
    pub completed:   Option<bool>,
    pub deadline_at: Option<Option<NaiveDateTime>>,
}

impl TodoPatch {
    /// 更新ボディの JSON オブジェクトからペイロードを構築する
    ///
    /// 許可集合は [`validation::validate_update_fields`] のとおり `id` を
    /// 含まない。一方で id 整合性チェック用に `id` の値は取り出しておく
    /// （ユースケース層が対象レコードの id と比較する）。
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, DomainError> {
        validation::validate_update_fields(body.keys().map(String::as_str))?;

        let title = match body.get("title") {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            // title は作成後に null にならない（不変条件）
            Some(_) => {
                return Err(DomainError::BadRequest(
                    "title は文字列である必要があります".to_string(),
                ));
            }
        };

        let description = match body.get("description") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(_) => {
                return Err(DomainError::BadRequest(
                    "description は文字列または null である必要があります".to_string(),
                ));
            }
        };

        let completed = match body.get("completed") {
            None => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                return Err(DomainError::BadRequest(
                    "completed は真偽値である必要があります".to_string(),
                ));
            }
        };

        let deadline_at = match body.get("deadline_at") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(parse_datetime(s)?)),
            Some(_) => {
                return Err(DomainError::BadRequest(
                    "deadline_at は文字列または null である必要があります".to_string(),
                ));
            }
        };

        let id = match body.get("id") {
            None => None,
            Some(Value::Number(n)) => n.as_i64().map(TodoId::from_i64),
            Some(_) => None,
        };

        Ok(Self {
            id,
            title,
            description,
            completed,
            deadline_at,
        })
    }
}

/// 省略可能な文字列フィールドを取り出す（null と省略はどちらも None）
fn optional_string(body: &Map<String, Value>, key: &str) -> Result<Option<String>, DomainError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DomainError::BadRequest(format!(
            "{key} は文字列である必要があります"
        ))),
    }
}

/// 省略可能な日時フィールドを取り出す（null と省略はどちらも None）
fn optional_datetime(
    body: &Map<String, Value>,
    key: &str,
) -> Result<Option<NaiveDateTime>, DomainError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(parse_datetime(s)?)),
        Some(_) => Err(DomainError::BadRequest(format!(
            "{key} は文字列である必要があります"
        ))),
    }
}
