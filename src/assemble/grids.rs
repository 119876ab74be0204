//! Image grid population and normalization.
//!
//! Grids are addressed by their position among `.image-grid` elements in
//! document order; the same index is reported to the render sink.

use crate::archive::ImageEntry;
use crate::fragment::{Element, Node};
use crate::layout::{ImageDescriptor, LayoutEngine, RowHeight};
use crate::render::PageImage;

use super::GridPlan;

pub const GRID_CLASS: &str = "image-grid";

pub fn is_grid(el: &Element) -> bool {
    el.has_class(GRID_CLASS)
}

fn is_image(el: &Element) -> bool {
    el.is("img")
}

/// A direct grid child holding an image, whatever its wrapper (`div.item`,
/// a link, a figure). These are the units the layout moves around.
fn is_image_item(el: &Element) -> bool {
    el.find_first(&is_image).is_some()
}

/// Grid indices split into (empty, already holding images).
pub fn classify_grids(post: &Element) -> (Vec<usize>, Vec<usize>) {
    let mut empty = Vec::new();
    let mut authored = Vec::new();
    for (index, grid) in post.find_all(&is_grid).into_iter().enumerate() {
        if grid.find_first(&is_image).is_some() {
            authored.push(index);
        } else {
            empty.push(index);
        }
    }
    (empty, authored)
}

/// Visit the grids whose index is in `wanted`, passing each its index.
fn for_each_grid(post: &mut Element, wanted: &[usize], f: &mut dyn FnMut(usize, &mut Element)) {
    let mut index = 0;
    post.walk_mut(&mut |el| {
        if !is_grid(el) {
            return;
        }
        if wanted.contains(&index) {
            f(index, el);
        }
        index += 1;
    });
}

/// Spread sidecar images evenly over the empty grids.
///
/// Each grid takes the next `ceil(images / grids)` entries, ordered by the
/// layout engine.
pub fn populate_empty_grids(
    post: &mut Element,
    entries: &[ImageEntry],
    base_path: &str,
    engine: &LayoutEngine,
    empty: &[usize],
) -> Vec<GridPlan> {
    if empty.is_empty() || entries.is_empty() {
        return Vec::new();
    }

    let per_grid = entries.len().div_ceil(empty.len());
    let mut plans = Vec::new();
    let mut filled = 0;

    for_each_grid(post, empty, &mut |index, grid| {
        let start = (filled * per_grid).min(entries.len());
        let end = (start + per_grid).min(entries.len());
        filled += 1;

        let slice = &entries[start..end];
        grid.set_attr("data-count", &slice.len().to_string());

        let descriptors = slice
            .iter()
            .map(|e| engine.describe(&e.source(base_path), &e.alt_text(), e.width, e.height))
            .collect();
        let ordered = engine.order(descriptors);
        for image in &ordered {
            grid.append(image_item(image));
        }
        plans.push(GridPlan {
            index,
            images: ordered,
        });
    });
    plans
}

/// Grid item markup for a sidecar image.
pub fn image_item(image: &ImageDescriptor) -> Element {
    let mut item = Element::new("div").with_class("item");
    if image.is_landscape() {
        item.add_class("landscape");
    }
    item.with_child(
        Element::new("img")
            .with_attr("src", &image.src)
            .with_attr("alt", &image.alt)
            .with_attr("loading", "lazy")
            .with_attr("data-fullscreen-enabled", "true"),
    )
}

/// An authored grid after normalization, waiting for its images to settle.
#[derive(Debug, Clone)]
pub struct PendingGrid {
    pub index: usize,
    /// (src, alt) per item, in current document order.
    pub images: Vec<(String, String)>,
}

/// Wrap bare images in items and enable fullscreen on every image.
pub fn prepare_authored_grids(post: &mut Element, authored: &[usize]) -> Vec<PendingGrid> {
    let mut pending = Vec::new();
    for_each_grid(post, authored, &mut |index, grid| {
        pending.push(PendingGrid {
            index,
            images: normalize_grid(grid),
        });
    });
    pending
}

fn normalize_grid(grid: &mut Element) -> Vec<(String, String)> {
    let image_count = grid.find_all(&is_image).len();
    grid.set_attr("data-count", &image_count.to_string());

    for child in grid.children.iter_mut() {
        if let Node::Element(el) = child {
            if el.is("img") {
                let img = std::mem::replace(el, Element::new("div").with_class("item"));
                el.append(img);
            }
        }
    }

    grid.walk_mut(&mut |el| {
        if is_image(el) && !el.has_attr("data-fullscreen-enabled") {
            el.set_attr("data-fullscreen-enabled", "true");
            el.set_style("cursor", "pointer");
        }
    });

    let mut images = Vec::new();
    for child in grid.children.iter_mut() {
        let Node::Element(item) = child else { continue };
        if !is_image_item(item) {
            continue;
        }
        item.set_style("transition", "transform 0.2s ease, filter 0.2s ease");
        if let Some(img) = item.find_first(&is_image) {
            images.push((
                img.attr("src").unwrap_or_default().to_string(),
                img.attr("alt").unwrap_or_default().to_string(),
            ));
        }
    }
    images
}

/// Placement decided for an authored grid once its images settled.
#[derive(Debug, Clone)]
pub struct ArrangedGrid {
    pub index: usize,
    /// Indices into `descriptors`, in placement order.
    pub order: Vec<usize>,
    pub descriptors: Vec<ImageDescriptor>,
}

/// Tag orientation and move items into their placement order.
pub fn apply_authored_order(post: &mut Element, arranged: Vec<ArrangedGrid>) -> Vec<GridPlan> {
    let wanted: Vec<usize> = arranged.iter().map(|g| g.index).collect();
    let mut plans = Vec::new();

    for_each_grid(post, &wanted, &mut |index, grid| {
        let Some(arrangement) = arranged.iter().find(|g| g.index == index) else {
            return;
        };
        reorder_grid(grid, arrangement);
        plans.push(GridPlan {
            index,
            images: arrangement
                .order
                .iter()
                .filter_map(|&i| arrangement.descriptors.get(i).cloned())
                .collect(),
        });
    });
    plans
}

fn reorder_grid(grid: &mut Element, arrangement: &ArrangedGrid) {
    let mut others = Vec::new();
    let mut items = Vec::new();
    for child in std::mem::take(&mut grid.children) {
        match child {
            Node::Element(el) if is_image_item(&el) => items.push(Some(el)),
            other => others.push(other),
        }
    }

    for (item, descriptor) in items.iter_mut().zip(&arrangement.descriptors) {
        if let Some(item) = item {
            if descriptor.is_landscape() {
                item.add_class("landscape");
            } else {
                item.remove_class("landscape");
            }
        }
    }

    // Items go after any other content, in placement order.
    grid.children = others;
    for &i in &arrangement.order {
        if let Some(item) = items.get_mut(i).and_then(Option::take) {
            grid.append(item);
        }
    }
    for item in items.into_iter().flatten() {
        grid.append(item);
    }
}

/// Apply matched row heights to a rendered grid's items.
///
/// For sinks that keep the element tree: the grid gets `mixed-row`, each item
/// in a row the row height, and its image fills the item.
pub fn style_matched_rows(grid: &mut Element, rows: &[RowHeight]) {
    if rows.is_empty() {
        return;
    }
    grid.add_class("mixed-row");

    let mut items: Vec<&mut Element> = grid
        .children
        .iter_mut()
        .filter_map(|child| match child {
            Node::Element(el) if is_image_item(el) => Some(el),
            _ => None,
        })
        .collect();

    for row in rows {
        let height = format!("{}px", row.height);
        for i in row.items.clone() {
            let Some(item) = items.get_mut(i) else { break };
            item.set_style("height", &height);
            if let Some(img) = item.find_first_mut(&is_image) {
                img.set_style("height", "100%");
                img.set_style("object-fit", "cover");
                img.set_style("object-position", "center");
            }
        }
    }
}

/// Every image inside a grid, in document order.
pub fn grid_images(post: &Element) -> Vec<PageImage> {
    let mut out = Vec::new();
    collect_grid_images(post, is_grid(post), &mut out);
    out
}

fn collect_grid_images(el: &Element, inside_grid: bool, out: &mut Vec<PageImage>) {
    for child in el.child_elements() {
        if inside_grid && is_image(child) {
            out.push(PageImage {
                src: child.attr("src").unwrap_or_default().to_string(),
                alt: child.attr("alt").unwrap_or_default().to_string(),
            });
        }
        collect_grid_images(child, inside_grid || is_grid(child), out);
    }
}
