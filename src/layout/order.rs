use std::cmp::Ordering;

use super::{ImageDescriptor, LayoutConfig};

/// Stable ordering of one grid's images.
///
/// Same orientation: widest first. Mixed orientation: small sets stay purely
/// widest-first, larger sets put every landscape image before the portraits.
pub fn order_images(images: Vec<ImageDescriptor>, config: &LayoutConfig) -> Vec<ImageDescriptor> {
    let order = order_indices(&images, config);
    let mut slots: Vec<Option<ImageDescriptor>> = images.into_iter().map(Some).collect();
    order.into_iter().filter_map(|i| slots[i].take()).collect()
}

/// Placement order as indices into `images`.
pub fn order_indices(images: &[ImageDescriptor], config: &LayoutConfig) -> Vec<usize> {
    let small_set = images.len() <= config.small_set_max;
    let mut indices: Vec<usize> = (0..images.len()).collect();
    indices.sort_by(|&a, &b| compare(&images[a], &images[b], small_set));
    indices
}

fn compare(a: &ImageDescriptor, b: &ImageDescriptor, small_set: bool) -> Ordering {
    if a.is_landscape() == b.is_landscape() || small_set {
        return b.aspect_ratio().total_cmp(&a.aspect_ratio());
    }
    if a.is_landscape() {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}
