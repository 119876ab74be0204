//! Subscribe status banner driven by the URL fragment.

/// Result of a newsletter signup redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeStatus {
    Subscribed,
    Error,
}

impl SubscribeStatus {
    /// Read the status from a URL fragment such as `#subscribed`.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        match fragment {
            "#subscribed" => Some(SubscribeStatus::Subscribed),
            "#error" => Some(SubscribeStatus::Error),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SubscribeStatus::Subscribed => "✅ Thanks for subscribing!",
            SubscribeStatus::Error => "❌ Something went wrong. Please try again.",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SubscribeStatus::Subscribed => "lightgreen",
            SubscribeStatus::Error => "salmon",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fragment() {
        assert_eq!(
            SubscribeStatus::from_fragment("#subscribed"),
            Some(SubscribeStatus::Subscribed)
        );
        assert_eq!(SubscribeStatus::from_fragment("#error"), Some(SubscribeStatus::Error));
        assert_eq!(SubscribeStatus::from_fragment(""), None);
        assert_eq!(SubscribeStatus::from_fragment("#top"), None);
    }

    #[test]
    fn test_message_and_color() {
        assert!(SubscribeStatus::Subscribed.message().contains("Thanks"));
        assert_eq!(SubscribeStatus::Error.color(), "salmon");
    }
}
