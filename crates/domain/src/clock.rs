//! # Clock（時刻プロバイダ）
//!
//! ユースケース層での現在時刻の直接取得を置き換え、
//! テストで固定時刻を注入可能にするための抽象化。
//!
//! タイムスタンプはタイムゾーンなし（naive）で統一する。
//! window フィルタの `deadline_at - now` 比較もこの時刻を基準にする。

use chrono::{NaiveDateTime, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> NaiveDateTime;
}

/// 実際のシステム時刻を返す実装
///
/// サーバーのタイムゾーンに依存しないよう UTC の naive 表現を返す。
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> NaiveDateTime {
      Utc::now().naive_utc()
   }
}

/// 固定時刻を返すテスト用実装
pub struct FixedClock {
   now: NaiveDateTime,
}

impl FixedClock {
   pub fn new(now: NaiveDateTime) -> Self {
      Self { now }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> NaiveDateTime {
      self.now
   }
}
