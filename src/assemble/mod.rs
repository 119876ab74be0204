//! Turns a fetched archive unit into a fragment ready to append to the page.
//!
//! Every step degrades silently: a missing placeholder, grid or metadata
//! block simply skips the step.

mod bars;
mod grids;
mod headings;
mod paths;

pub use bars::{inject_bar, inject_bars, segment_class, BAR_CATEGORIES};
pub use grids::{grid_images, style_matched_rows, GRID_CLASS};
pub use headings::{insert_localized_headings, remove_old_heading};
pub use paths::rewrite_image_paths;

use std::sync::Arc;

use tracing::debug;

use crate::archive::{ArchiveKey, ArchiveUnit};
use crate::fragment::Element;
use crate::layout::{settle_all, ImageDescriptor, ImageProbe, LayoutEngine};
use crate::render::PageImage;

use grids::ArrangedGrid;

/// Placement order chosen for one grid of a fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    /// Position among the fragment's grids, in document order.
    pub index: usize,
    pub images: Vec<ImageDescriptor>,
}

/// An assembled archive unit.
#[derive(Debug, Clone)]
pub struct FinalizedFragment {
    pub key: ArchiveKey,
    pub post: Element,
    /// Grids that received a layout pass, by index.
    pub grids: Vec<GridPlan>,
}

impl FinalizedFragment {
    pub fn to_html(&self) -> String {
        self.post.to_html()
    }

    /// Grid images of this fragment, in document order.
    pub fn images(&self) -> Vec<PageImage> {
        grid_images(&self.post)
    }
}

/// Runs the assembly steps over a unit's post.
#[derive(Clone)]
pub struct ContentAssembler {
    engine: LayoutEngine,
    probe: Arc<dyn ImageProbe>,
}

impl ContentAssembler {
    pub fn new(engine: LayoutEngine, probe: Arc<dyn ImageProbe>) -> Self {
        Self { engine, probe }
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub async fn assemble(&self, unit: ArchiveUnit) -> FinalizedFragment {
        let ArchiveUnit {
            key,
            mut post,
            metadata,
        } = unit;
        let base_path = key.base_path();

        remove_old_heading(&mut post);
        insert_localized_headings(&mut post, key);

        if let Some(metadata) = &metadata {
            inject_bars(&mut post, metadata);
        }

        rewrite_image_paths(&mut post, &base_path);

        // Decided before population so freshly inserted images are not re-laid out.
        let (empty, authored) = grids::classify_grids(&post);
        let mut plans = Vec::new();

        if let Some(metadata) = &metadata {
            plans.extend(grids::populate_empty_grids(
                &mut post,
                metadata.images(),
                &base_path,
                &self.engine,
                &empty,
            ));
        }

        if !authored.is_empty() {
            let pending = grids::prepare_authored_grids(&mut post, &authored);
            let mut arranged = Vec::with_capacity(pending.len());
            for grid in pending {
                arranged.push(self.arrange_authored(grid).await);
            }
            plans.extend(grids::apply_authored_order(&mut post, arranged));
        }

        plans.sort_by_key(|plan| plan.index);
        debug!(
            "Assembled {} with {} laid-out grid(s)",
            key,
            plans.len()
        );

        FinalizedFragment {
            key,
            post,
            grids: plans,
        }
    }

    /// Wait for every image of an authored grid, then pick its order.
    async fn arrange_authored(&self, grid: grids::PendingGrid) -> ArrangedGrid {
        let srcs: Vec<String> = grid.images.iter().map(|(src, _)| src.clone()).collect();
        let loads = settle_all(self.probe.as_ref(), &srcs).await;

        let descriptors: Vec<ImageDescriptor> = grid
            .images
            .iter()
            .zip(&loads)
            .map(|((src, alt), load)| {
                let (width, height) = load.dimensions();
                self.engine.describe(src, alt, width, height)
            })
            .collect();

        let order = if descriptors.len() > 1 {
            self.engine.order_indices(&descriptors)
        } else {
            (0..descriptors.len()).collect()
        };

        ArrangedGrid {
            index: grid.index,
            order,
            descriptors,
        }
    }
}
