// src/diagnostics.rs

//! 表示ドライバの診断カウンタ
//!
//! 各ターミナルが一つずつ所有し、`&self` 経由でも更新できるよう
//! アトミックで保持する。カウンタは統計目的のみなので `Relaxed` で十分。

use core::sync::atomic::{AtomicU64, Ordering};

/// 表示診断情報
#[derive(Debug)]
pub struct DisplayDiagnostics {
    cell_writes: AtomicU64,
    cell_write_failures: AtomicU64,
    scrolls: AtomicU64,
    color_changes: AtomicU64,
    rejected_colors: AtomicU64,
}

impl DisplayDiagnostics {
    pub const fn new() -> Self {
        Self {
            cell_writes: AtomicU64::new(0),
            cell_write_failures: AtomicU64::new(0),
            scrolls: AtomicU64::new(0),
            color_changes: AtomicU64::new(0),
            rejected_colors: AtomicU64::new(0),
        }
    }

    /// セル書き込みを記録（成否を含む）
    #[inline]
    pub fn record_cell_write(&self, success: bool) {
        self.cell_writes.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.cell_write_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// スクロールを記録
    #[inline]
    pub fn record_scroll(&self) {
        self.scrolls.fetch_add(1, Ordering::Relaxed);
    }

    /// 色変更を記録
    #[inline]
    pub fn record_color_change(&self) {
        self.color_changes.fetch_add(1, Ordering::Relaxed);
    }

    /// 拒否された色指定を記録
    #[inline]
    pub fn record_rejected_color(&self) {
        self.rejected_colors.fetch_add(1, Ordering::Relaxed);
    }

    /// 全カウンタをゼロに戻す
    pub fn reset(&self) {
        self.cell_writes.store(0, Ordering::Relaxed);
        self.cell_write_failures.store(0, Ordering::Relaxed);
        self.scrolls.store(0, Ordering::Relaxed);
        self.color_changes.store(0, Ordering::Relaxed);
        self.rejected_colors.store(0, Ordering::Relaxed);
    }

    /// 診断情報のスナップショットを取得
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            cell_writes: self.cell_writes.load(Ordering::Relaxed),
            cell_write_failures: self.cell_write_failures.load(Ordering::Relaxed),
            scrolls: self.scrolls.load(Ordering::Relaxed),
            color_changes: self.color_changes.load(Ordering::Relaxed),
            rejected_colors: self.rejected_colors.load(Ordering::Relaxed),
        }
    }
}

impl Default for DisplayDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

/// 診断スナップショット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagnosticsSnapshot {
    pub cell_writes: u64,
    pub cell_write_failures: u64,
    pub scrolls: u64,
    pub color_changes: u64,
    pub rejected_colors: u64,
}

impl DiagnosticsSnapshot {
    /// 書き込み失敗が一度もないか
    pub const fn is_healthy(&self) -> bool {
        self.cell_write_failures == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let diag = DisplayDiagnostics::new();
        diag.record_cell_write(true);
        diag.record_cell_write(false);
        diag.record_scroll();
        diag.record_color_change();
        diag.record_rejected_color();

        let snap = diag.snapshot();
        assert_eq!(snap.cell_writes, 2);
        assert_eq!(snap.cell_write_failures, 1);
        assert_eq!(snap.scrolls, 1);
        assert_eq!(snap.color_changes, 1);
        assert_eq!(snap.rejected_colors, 1);
        assert!(!snap.is_healthy());
    }

    #[test]
    fn reset_clears_everything() {
        let diag = DisplayDiagnostics::new();
        diag.record_scroll();
        diag.record_cell_write(false);
        diag.reset();
        assert_eq!(diag.snapshot(), DiagnosticsSnapshot::default());
    }
}
