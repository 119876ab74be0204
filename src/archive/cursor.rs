//! Backward-stepping month pointer with a floor year.

use super::ArchiveKey;

/// Tracks the current archive key and steps it one month earlier at a time.
#[derive(Debug, Clone)]
pub struct MonthCursor {
    current: ArchiveKey,
    floor_year: i32,
}

impl MonthCursor {
    pub fn new(start: ArchiveKey, floor_year: i32) -> Self {
        Self {
            current: start,
            floor_year,
        }
    }

    /// Cursor starting at the current local month.
    pub fn starting_now(floor_year: i32) -> Self {
        Self::new(ArchiveKey::current(), floor_year)
    }

    pub fn current(&self) -> ArchiveKey {
        self.current
    }

    pub fn floor_year(&self) -> i32 {
        self.floor_year
    }

    /// Move one calendar month earlier and return the new position.
    pub fn decrement(&mut self) -> ArchiveKey {
        self.current = self.current.previous();
        self.current
    }

    /// True once the cursor's year has dropped below the floor.
    pub fn is_below_floor(&self) -> bool {
        self.current.year < self.floor_year
    }
}
