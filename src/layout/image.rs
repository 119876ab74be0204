//! Image descriptors with derived aspect ratio and orientation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// An image placed in a grid. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDescriptor {
    pub src: String,
    pub alt: String,
    pub width: f64,
    pub height: f64,
    aspect_ratio: f64,
    orientation: Orientation,
}

impl ImageDescriptor {
    /// Describe an image. Unknown or degenerate dimensions give aspect ratio 1.0.
    pub fn new(src: &str, alt: &str, width: f64, height: f64, landscape_threshold: f64) -> Self {
        let aspect_ratio = if width > 0.0 && height > 0.0 {
            width / height
        } else {
            1.0
        };
        let orientation = if aspect_ratio > landscape_threshold {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };
        Self {
            src: src.to_string(),
            alt: alt.to_string(),
            width,
            height,
            aspect_ratio,
            orientation,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_landscape(&self) -> bool {
        self.orientation == Orientation::Landscape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_threshold_is_strict() {
        assert!(ImageDescriptor::new("a", "", 1600.0, 900.0, 1.3).is_landscape());
        assert!(!ImageDescriptor::new("b", "", 130.0, 100.0, 1.3).is_landscape());
        assert!(!ImageDescriptor::new("c", "", 1200.0, 1000.0, 1.3).is_landscape());
    }

    #[test]
    fn test_unknown_dimensions_are_square() {
        let img = ImageDescriptor::new("a", "", 0.0, 0.0, 1.3);
        assert_eq!(img.aspect_ratio(), 1.0);
        assert_eq!(img.orientation(), Orientation::Portrait);

        let img = ImageDescriptor::new("b", "", 800.0, 0.0, 1.3);
        assert_eq!(img.aspect_ratio(), 1.0);
    }
}
