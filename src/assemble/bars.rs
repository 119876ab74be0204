//! Proportional activity/mood bars.

use std::sync::LazyLock;

use regex::Regex;

use crate::archive::{ArchiveMetadata, CategoryEntry};
use crate::fragment::Element;

/// Bar categories, by display title.
pub const BAR_CATEGORIES: [&str; 2] = ["Activities", "Mood"];

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Segment class for an entry label: lower-cased, whitespace runs become `-`.
pub fn segment_class(label: &str) -> String {
    WHITESPACE
        .replace_all(&label.to_lowercase(), "-")
        .into_owned()
}

/// Inject every category bar present in the metadata.
pub fn inject_bars(post: &mut Element, metadata: &ArchiveMetadata) {
    for title in BAR_CATEGORIES {
        if let Some(entries) = metadata.category(title) {
            inject_bar(post, title, entries);
        }
    }
}

/// Replace the `[data-bar="{title}"]` placeholder's contents with a bar.
///
/// Returns false when there is nothing to draw or no placeholder.
pub fn inject_bar(post: &mut Element, title: &str, entries: &[CategoryEntry]) -> bool {
    if entries.is_empty() {
        return false;
    }

    let key = title.to_lowercase();
    let Some(placeholder) = post.find_first_mut(&|e| e.attr("data-bar") == Some(key.as_str()))
    else {
        return false;
    };

    placeholder.clear_children();
    placeholder.append(progress_bar(entries));
    true
}

fn progress_bar(entries: &[CategoryEntry]) -> Element {
    let mut bar = Element::new("div").with_class("progress-bar");
    for entry in entries.iter().filter(|e| e.hours > 0.0) {
        let hours = entry.hours.to_string();
        let segment = Element::new("div")
            .with_attr("class", &format!("segment {}", segment_class(&entry.label)))
            .with_attr("style", &format!("flex: {}", hours))
            .with_attr("data-activity", &entry.label)
            .with_attr("data-hours", &hours);
        bar.append(segment);
    }
    bar
}
