//! Per-session loading state: cursor position and what is already on the page.

use std::collections::HashSet;

use crate::archive::{ArchiveKey, MonthCursor};

/// Owned state of one scroll/init session.
#[derive(Debug, Clone)]
pub struct ArchiveSession {
    cursor: MonthCursor,
    loaded: HashSet<ArchiveKey>,
    last_appended: Option<ArchiveKey>,
    activated: bool,
    exhausted: bool,
}

impl ArchiveSession {
    pub fn new(cursor: MonthCursor) -> Self {
        let exhausted = cursor.is_below_floor();
        Self {
            cursor,
            loaded: HashSet::new(),
            last_appended: None,
            activated: false,
            exhausted,
        }
    }

    pub fn cursor(&self) -> &MonthCursor {
        &self.cursor
    }

    /// Step the cursor back one month; crossing the floor exhausts the session.
    pub fn advance(&mut self) -> Option<ArchiveKey> {
        if self.exhausted {
            return None;
        }
        let key = self.cursor.decrement();
        if self.cursor.is_below_floor() {
            self.exhausted = true;
            return None;
        }
        Some(key)
    }

    /// Whether the initial load (current month first) has been attempted.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn mark_activated(&mut self) {
        self.activated = true;
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn exhaust(&mut self) {
        self.exhausted = true;
    }

    /// A key may be appended only once, and only below everything appended so far.
    pub fn can_append(&self, key: ArchiveKey) -> bool {
        !self.loaded.contains(&key) && self.last_appended.map_or(true, |last| key < last)
    }

    pub fn record_appended(&mut self, key: ArchiveKey) {
        self.loaded.insert(key);
        self.last_appended = Some(key);
    }

    pub fn is_loaded(&self, key: ArchiveKey) -> bool {
        self.loaded.contains(&key)
    }

    /// Loaded keys, newest first.
    pub fn loaded_keys(&self) -> Vec<ArchiveKey> {
        let mut keys: Vec<ArchiveKey> = self.loaded.iter().copied().collect();
        keys.sort_unstable_by(|a, b| b.cmp(a));
        keys
    }
}
