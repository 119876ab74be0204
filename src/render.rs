//! The page contract: where finalized fragments go and how the page reports
//! its geometry back.

use async_trait::async_trait;

use crate::archive::ArchiveKey;
use crate::assemble::FinalizedFragment;
use crate::layout::{ItemBox, RowHeight};

/// Scroll geometry of the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageMetrics {
    /// Total height of the document content.
    pub content_height: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
    /// Current vertical scroll offset.
    pub scroll_y: f64,
}

impl PageMetrics {
    /// Content exceeds the viewport by more than `margin`.
    pub fn is_scrollable(&self, margin: f64) -> bool {
        self.content_height - self.viewport_height > margin
    }

    /// Bottom of the viewport is within `threshold` of the end of the content.
    pub fn near_bottom(&self, threshold: f64) -> bool {
        self.viewport_height + self.scroll_y >= self.content_height - threshold
    }
}

/// An image currently present on the page, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub src: String,
    pub alt: String,
}

/// Rendering surface the loader writes into.
#[async_trait]
pub trait RenderSink: Send + Sync {
    /// Append a unit to the archive container, after every earlier one.
    async fn append(&self, fragment: &FinalizedFragment);

    /// Resolve after the next rendered frame, so measurements are current.
    async fn next_frame(&self);

    fn metrics(&self) -> PageMetrics;

    /// Rendered boxes of a grid's items, in placement order.
    fn measure_grid(&self, key: ArchiveKey, grid: usize) -> Vec<ItemBox>;

    /// Apply matched heights to mixed rows of a grid.
    ///
    /// Sinks holding the element tree can use [`crate::assemble::style_matched_rows`].
    fn apply_row_heights(&self, key: ArchiveKey, grid: usize, rows: &[RowHeight]);

    /// Every grid image on the page, across all appended units.
    fn images(&self) -> Vec<PageImage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_scrollable_margin() {
        let metrics = PageMetrics {
            content_height: 1050.0,
            viewport_height: 1000.0,
            scroll_y: 0.0,
        };
        assert!(!metrics.is_scrollable(50.0));
        assert!(metrics.is_scrollable(49.0));
    }

    #[test]
    fn test_near_bottom_threshold() {
        let mut metrics = PageMetrics {
            content_height: 3000.0,
            viewport_height: 800.0,
            scroll_y: 1900.0,
        };
        assert!(!metrics.near_bottom(200.0));
        metrics.scroll_y = 2000.0;
        assert!(metrics.near_bottom(200.0));
    }
}
