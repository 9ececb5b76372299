//! # フィルタエンジン
//!
//! 検証済みの一覧クエリパラメータから、ストアに渡す完全一致フィルタと
//! 省略可能な window（相対期限）条件を構築する。
//!
//! ## アルゴリズム
//!
//! 1. パラメータ名集合を検証する（[`crate::validation::validate_list_query`]）
//! 2. `completed` は文字列 `"true"` のみ真、それ以外はすべて偽に強制変換する
//! 3. `window` は日数としてフィルタから取り除き、期間しきい値として保持する
//! 4. 残りのフィールドは完全一致条件（範囲・部分一致なし）
//! 5. window 指定時は、ストアの完全一致結果に対して
//!    `deadline_at - now <= window` を満たすものだけを残す
//!
//! window 比較は下限を持たない。期限超過（差が負）の Todo も通過する。
//! `window=0` は「いま期限ちょうど、または期限超過」の Todo のみを残す。

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use crate::{
    DomainError,
    todo::{Todo, TodoId, parse_datetime},
    validation,
};

/// ストアに渡す完全一致フィルタ
///
/// `None` のフィールドは条件に含めない。すべて `None` なら全件一致。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub id:          Option<TodoId>,
    pub title:       Option<String>,
    pub description: Option<String>,
    pub completed:   Option<bool>,
    pub deadline_at: Option<NaiveDateTime>,
}

impl TodoFilter {
    /// 条件を一切持たないフィルタかどうか
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.deadline_at.is_none()
    }

    /// Todo がこのフィルタの全条件に一致するか判定する
    ///
    /// インメモリ実装（モックリポジトリ）が使用する。Postgres 実装は
    /// 同じ条件を WHERE 句として構築する。
    pub fn matches(&self, todo: &Todo) -> bool {
        self.id.is_none_or(|id| todo.id() == id)
            && self.title.as_deref().is_none_or(|t| todo.title() == t)
            && self
                .description
                .as_deref()
                .is_none_or(|d| todo.description() == Some(d))
            && self.completed.is_none_or(|c| todo.completed() == c)
            && self
                .deadline_at
                .is_none_or(|d| todo.deadline_at() == Some(d))
    }
}

/// 検証・パース済みの一覧クエリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// ストアに渡す完全一致フィルタ（`window` を含まない）
    pub filter: TodoFilter,
    /// 相対期限のしきい値（`window` パラメータの日数）
    pub window: Option<Duration>,
}

impl ListQuery {
    /// クエリパラメータから一覧クエリを構築する
    ///
    /// パラメータ名の検証もここで行う。値がパースできない場合は
    /// ストアに触れる前に [`DomainError::BadRequest`] を返す。
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, DomainError> {
        validation::validate_list_query(params.keys().map(String::as_str))?;

        let window = match params.get("window") {
            None => None,
            Some(value) => {
                let days: i64 = value.parse().map_err(|_| {
                    DomainError::BadRequest(format!("window が整数ではありません: {value}"))
                })?;
                Some(Duration::try_days(days).ok_or_else(|| {
                    DomainError::BadRequest(format!("window が大きすぎます: {value}"))
                })?)
            }
        };

        let id = match params.get("id") {
            None => None,
            Some(value) => Some(TodoId::from_i64(value.parse().map_err(|_| {
                DomainError::BadRequest(format!("id が整数ではありません: {value}"))
            })?)),
        };

        let deadline_at = match params.get("deadline_at") {
            None => None,
            Some(value) => Some(parse_datetime(value)?),
        };

        Ok(Self {
            filter: TodoFilter {
                id,
                title: params.get("title").cloned(),
                description: params.get("description").cloned(),
                // 文字列 "true" のみ真。それ以外（"false", "1", "TRUE" など）は偽
                completed: params.get("completed").map(|v| v == "true"),
                deadline_at,
            },
            window,
        })
    }
}

/// Todo が window しきい値の内側にあるか判定する
///
/// `deadline_at` が null の Todo は window 指定時には残らない。
/// 比較は `deadline_at - now <= window` であり下限を持たない。
pub fn within_window(todo: &Todo, now: NaiveDateTime, window: Duration) -> bool {
    todo.deadline_at()
        .is_some_and(|deadline| deadline - now <= window)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::todo::Todo;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn fixed_now() -> NaiveDateTime {
        "2023-02-20T00:00:00".parse().unwrap()
    }

    fn todo_with_deadline(deadline: Option<&str>) -> Todo {
        Todo::from_db(
            TodoId::from_i64(1),
            "Watch lecture".to_string(),
            None,
            false,
            deadline.map(|d| d.parse().unwrap()),
            fixed_now(),
            fixed_now(),
        )
    }

    // =====================================================================
    // ListQuery::from_params のテスト
    // =====================================================================

    #[test]
    fn test_空のパラメータは空フィルタになる() {
        let query = ListQuery::from_params(&params(&[])).unwrap();

        assert!(query.filter.is_empty());
        assert_eq!(query.window, None);
    }

    #[test]
    fn test_未知のパラメータ名はillegal_fieldになる() {
        let result = ListQuery::from_params(&params(&[("foo", "1")]));
        assert_eq!(result, Err(DomainError::IllegalField("foo".to_string())));
    }

    #[rstest]
    #[case("true", true)]
    #[case("false", false)]
    #[case("1", false)]
    #[case("TRUE", false)]
    #[case("", false)]
    fn test_completedは文字列trueのみ真に強制変換される(
        #[case] value: &str,
        #[case] expected: bool,
    ) {
        let query = ListQuery::from_params(&params(&[("completed", value)])).unwrap();
        assert_eq!(query.filter.completed, Some(expected));
    }

    #[test]
    fn test_windowはフィルタから取り除かれ期間として保持される() {
        let query = ListQuery::from_params(&params(&[("window", "7")])).unwrap();

        assert!(query.filter.is_empty());
        assert_eq!(query.window, Some(Duration::days(7)));
    }

    #[test]
    fn test_window0はゼロ期間になる() {
        let query = ListQuery::from_params(&params(&[("window", "0")])).unwrap();
        assert_eq!(query.window, Some(Duration::zero()));
    }

    #[test]
    fn test_負のwindowも受け入れる() {
        let query = ListQuery::from_params(&params(&[("window", "-3")])).unwrap();
        assert_eq!(query.window, Some(Duration::days(-3)));
    }

    #[test]
    fn test_整数でないwindowはbad_requestになる() {
        let result = ListQuery::from_params(&params(&[("window", "soon")]));
        assert!(matches!(result, Err(DomainError::BadRequest(_))));
    }

    #[test]
    fn test_整数でないidはbad_requestになる() {
        let result = ListQuery::from_params(&params(&[("id", "abc")]));
        assert!(matches!(result, Err(DomainError::BadRequest(_))));
    }

    #[test]
    fn test_deadline_atは日時としてパースされる() {
        let query =
            ListQuery::from_params(&params(&[("deadline_at", "2023-02-27T00:00:00")])).unwrap();

        assert_eq!(
            query.filter.deadline_at,
            Some("2023-02-27T00:00:00".parse().unwrap())
        );
    }

    // =====================================================================
    // TodoFilter::matches のテスト
    // =====================================================================

    #[test]
    fn test_空フィルタはすべてに一致する() {
        let filter = TodoFilter::default();
        assert!(filter.matches(&todo_with_deadline(None)));
    }

    #[test]
    fn test_完全一致フィルタはtitleの部分一致を許さない() {
        let filter = TodoFilter {
            title: Some("Watch".to_string()),
            ..TodoFilter::default()
        };
        assert!(!filter.matches(&todo_with_deadline(None)));

        let filter = TodoFilter {
            title: Some("Watch lecture".to_string()),
            ..TodoFilter::default()
        };
        assert!(filter.matches(&todo_with_deadline(None)));
    }

    #[test]
    fn test_completedフィルタで不一致を除外する() {
        let filter = TodoFilter {
            completed: Some(true),
            ..TodoFilter::default()
        };
        assert!(!filter.matches(&todo_with_deadline(None)));
    }

    // =====================================================================
    // within_window のテスト
    // =====================================================================

    #[test]
    fn test_window0で期限がいまちょうどのtodoは残る() {
        let todo = todo_with_deadline(Some("2023-02-20T00:00:00"));
        assert!(within_window(&todo, fixed_now(), Duration::zero()));
    }

    #[test]
    fn test_window0で期限が未来のtodoは残らない() {
        let todo = todo_with_deadline(Some("2023-02-20T00:00:01"));
        assert!(!within_window(&todo, fixed_now(), Duration::zero()));
    }

    #[test]
    fn test_期限超過のtodoはどのwindowでも残る() {
        // 下限なし: 差が負でも通過する
        let todo = todo_with_deadline(Some("2023-01-01T00:00:00"));
        assert!(within_window(&todo, fixed_now(), Duration::zero()));
        assert!(within_window(&todo, fixed_now(), Duration::days(7)));
    }

    #[test]
    fn test_期限がwindow内のtodoは残る() {
        let todo = todo_with_deadline(Some("2023-02-26T00:00:00"));
        assert!(within_window(&todo, fixed_now(), Duration::days(7)));
    }

    #[test]
    fn test_期限がwindow外のtodoは残らない() {
        let todo = todo_with_deadline(Some("2023-03-01T00:00:00"));
        assert!(!within_window(&todo, fixed_now(), Duration::days(7)));
    }

    #[test]
    fn test_期限なしのtodoはwindow指定時に残らない() {
        let todo = todo_with_deadline(None);
        assert!(!within_window(&todo, fixed_now(), Duration::days(7)));
    }
}
