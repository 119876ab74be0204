use std::ops::Range;

use super::{ImageDescriptor, LayoutConfig};

/// Rendered position of one grid item, as measured by the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBox {
    pub top: f64,
    pub width: f64,
}

/// Uniform height to apply to a run of items forming one mixed row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowHeight {
    /// Item indices (in placement order) covered by this row.
    pub items: Range<usize>,
    pub height: f64,
}

/// Group consecutive items into rows by top offset.
///
/// An item joins the current row when its top is within `tolerance` of the
/// row's first item.
pub fn detect_rows(boxes: &[ItemBox], tolerance: f64) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut row_top: Option<f64> = None;

    for (i, item) in boxes.iter().enumerate() {
        match row_top {
            Some(top) if (item.top - top).abs() <= tolerance => {}
            Some(_) => {
                rows.push(start..i);
                start = i;
                row_top = Some(item.top);
            }
            None => row_top = Some(item.top),
        }
    }
    if !boxes.is_empty() {
        rows.push(start..boxes.len());
    }
    rows
}

/// Height hints for rows mixing landscape and portrait images.
///
/// Each item's natural height at its rendered width is computed; the row
/// minimum, capped at a fraction of the viewport, applies to the whole row.
/// Uniform rows and single-item rows are left alone.
pub fn match_row_heights(
    ordered: &[ImageDescriptor],
    boxes: &[ItemBox],
    viewport_height: f64,
    config: &LayoutConfig,
) -> Vec<RowHeight> {
    let count = ordered.len().min(boxes.len());
    let cap = viewport_height * config.max_row_height_fraction;

    detect_rows(&boxes[..count], config.row_tolerance)
        .into_iter()
        .filter(|row| row.len() > 1)
        .filter_map(|row| {
            let images = &ordered[row.clone()];
            let has_landscape = images.iter().any(|i| i.is_landscape());
            let has_portrait = images.iter().any(|i| !i.is_landscape());
            if !(has_landscape && has_portrait) {
                return None;
            }

            let natural = images
                .iter()
                .zip(&boxes[row.clone()])
                .map(|(image, item)| item.width / image.aspect_ratio())
                .fold(f64::INFINITY, f64::min);

            Some(RowHeight {
                items: row,
                height: natural.min(cap),
            })
        })
        .collect()
}
