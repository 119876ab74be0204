//! Parsed archive content and its sidecar metadata.

use serde::{Deserialize, Serialize};

use super::ArchiveKey;
use crate::fragment::Element;

/// Content for one archive key: the post subtree plus optional metadata.
#[derive(Debug, Clone)]
pub struct ArchiveUnit {
    pub key: ArchiveKey,
    /// The `.post` container from the primary resource.
    pub post: Element,
    /// Sidecar `data.json`, when present and well-formed.
    pub metadata: Option<ArchiveMetadata>,
}

/// Sidecar metadata shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchiveMetadata {
    #[serde(default)]
    pub activities: Option<Vec<CategoryEntry>>,
    #[serde(default)]
    pub mood: Option<Vec<CategoryEntry>>,
    #[serde(default)]
    pub images: Option<Vec<ImageEntry>>,
}

impl ArchiveMetadata {
    /// Entries for a bar category by its display title ("Activities", "Mood").
    pub fn category(&self, title: &str) -> Option<&[CategoryEntry]> {
        match title.to_lowercase().as_str() {
            "activities" => self.activities.as_deref(),
            "mood" => self.mood.as_deref(),
            _ => None,
        }
    }

    /// Supplied images, if any were listed.
    pub fn images(&self) -> &[ImageEntry] {
        self.images.as_deref().unwrap_or(&[])
    }
}

/// A labelled weight shown as one bar segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub label: String,
    #[serde(default)]
    pub hours: f64,
}

/// An image listed in the sidecar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

impl ImageEntry {
    /// Image source: explicit URL, else the name inside the unit's folder.
    pub fn source(&self, base_path: &str) -> String {
        match (&self.url, &self.name) {
            (Some(url), _) if !url.is_empty() => url.clone(),
            (_, Some(name)) => format!("{}/{}", base_path, name),
            _ => base_path.to_string(),
        }
    }

    /// Alt text: explicit alt, else the file name.
    pub fn alt_text(&self) -> String {
        self.alt
            .as_ref()
            .filter(|a| !a.is_empty())
            .or(self.name.as_ref())
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_sidecar() {
        let json = r#"{
            "activities": [{"label": "Deep Work", "hours": 5}, {"label": "Rest", "hours": 0}],
            "mood": [{"label": "Happy", "hours": 2.5}],
            "images": [{"width": 1600, "height": 900, "name": "a.jpg", "alt": "Lake"}]
        }"#;
        let meta: ArchiveMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.category("Activities").unwrap().len(), 2);
        assert_eq!(meta.category("Mood").unwrap()[0].hours, 2.5);
        assert_eq!(meta.images().len(), 1);
    }

    #[test]
    fn test_parse_empty_sidecar() {
        let meta: ArchiveMetadata = serde_json::from_str("{}").unwrap();
        assert!(meta.category("Activities").is_none());
        assert!(meta.images().is_empty());
    }

    #[test]
    fn test_image_source_prefers_url() {
        let entry = ImageEntry {
            width: 10.0,
            height: 10.0,
            name: Some("a.jpg".to_string()),
            url: Some("https://cdn.example.com/a.jpg".to_string()),
            alt: None,
        };
        assert_eq!(entry.source("2025/07"), "https://cdn.example.com/a.jpg");
        assert_eq!(entry.alt_text(), "a.jpg");
    }

    #[test]
    fn test_image_source_from_name() {
        let entry = ImageEntry {
            width: 10.0,
            height: 10.0,
            name: Some("a.jpg".to_string()),
            url: None,
            alt: Some("Mountains".to_string()),
        };
        assert_eq!(entry.source("2025/07"), "2025/07/a.jpg");
        assert_eq!(entry.alt_text(), "Mountains");
    }
}
