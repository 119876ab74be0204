//! Month-indexed archive units and how to find them.

mod cursor;
mod fetcher;
mod http_client;
mod unit;

pub use cursor::MonthCursor;
pub use fetcher::{ArchiveFetcher, FetchError, FetcherSetupError, HttpArchiveFetcher, POST_SELECTOR};
pub use http_client::{resolve_user_agent, HttpClient, HttpResponse};
pub use unit::{ArchiveMetadata, ArchiveUnit, CategoryEntry, ImageEntry};

use std::fmt;

use chrono::{Datelike, Local};

/// One month of archive content, ordered by calendar time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArchiveKey {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl ArchiveKey {
    /// Create a key, clamping the month into 1-12.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    /// The key for the current local calendar month.
    pub fn current() -> Self {
        let now = Local::now();
        Self::new(now.year(), now.month())
    }

    /// The calendar month immediately before this one.
    pub fn previous(self) -> Self {
        if self.month <= 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Folder path of this unit relative to the archive root, e.g. `2025/07`.
    pub fn base_path(&self) -> String {
        format!("{}/{:02}", self.year, self.month)
    }
}

impl fmt::Display for ArchiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
