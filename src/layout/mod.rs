//! Image grid layout: aspect-ratio ordering and row height matching.
//!
//! Ordering happens before the grid is rendered. Row detection needs the
//! rendered top offset of each item (wrap-flow decides the rows, not this
//! module), so height matching runs as a second pass over measurements
//! reported by the render sink.

mod image;
mod order;
mod probe;
mod rows;

pub use self::image::{ImageDescriptor, Orientation};
pub use order::{order_images, order_indices};
pub use probe::{settle_all, HttpImageProbe, ImageLoad, ImageProbe};
pub use rows::{detect_rows, match_row_heights, ItemBox, RowHeight};

use serde::{Deserialize, Serialize};

/// Layout tuning values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, prefer::FromValue)]
pub struct LayoutConfig {
    /// Aspect ratio above which an image counts as landscape.
    #[serde(default = "default_landscape_threshold")]
    #[prefer(default = "1.3")]
    pub landscape_threshold: f64,
    /// Largest set still ordered purely by aspect ratio when orientations mix.
    #[serde(default = "default_small_set_max")]
    #[prefer(default = "4")]
    pub small_set_max: usize,
    /// Items whose tops differ by at most this much share a row.
    #[serde(default = "default_row_tolerance")]
    #[prefer(default = "10.0")]
    pub row_tolerance: f64,
    /// Matched row height is capped at this fraction of the viewport height.
    #[serde(default = "default_max_row_height_fraction")]
    #[prefer(default = "0.25")]
    pub max_row_height_fraction: f64,
}

fn default_landscape_threshold() -> f64 {
    1.3
}
fn default_small_set_max() -> usize {
    4
}
fn default_row_tolerance() -> f64 {
    10.0
}
fn default_max_row_height_fraction() -> f64 {
    0.25
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            landscape_threshold: default_landscape_threshold(),
            small_set_max: default_small_set_max(),
            row_tolerance: default_row_tolerance(),
            max_row_height_fraction: default_max_row_height_fraction(),
        }
    }
}

/// Entry point bundling the layout passes with one configuration.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Describe an image with this engine's landscape threshold.
    pub fn describe(&self, src: &str, alt: &str, width: f64, height: f64) -> ImageDescriptor {
        ImageDescriptor::new(src, alt, width, height, self.config.landscape_threshold)
    }

    /// Order a grid's images for placement.
    pub fn order(&self, images: Vec<ImageDescriptor>) -> Vec<ImageDescriptor> {
        order_images(images, &self.config)
    }

    /// Placement order as indices, for images that already sit in a grid.
    pub fn order_indices(&self, images: &[ImageDescriptor]) -> Vec<usize> {
        order_indices(images, &self.config)
    }

    /// Height hints for rendered rows that mix landscape and portrait images.
    pub fn row_heights(
        &self,
        ordered: &[ImageDescriptor],
        boxes: &[ItemBox],
        viewport_height: f64,
    ) -> Vec<RowHeight> {
        match_row_heights(ordered, boxes, viewport_height, &self.config)
    }
}
