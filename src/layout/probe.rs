//! Waiting for images to load (or fail) before they are measured.

use std::io::Cursor;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::debug;
use url::Url;

use crate::archive::HttpClient;

/// Outcome of waiting for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoad {
    Loaded { width: u32, height: u32 },
    Failed,
}

impl ImageLoad {
    /// Natural dimensions, or zero when the image failed to load.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            ImageLoad::Loaded { width, height } => (f64::from(*width), f64::from(*height)),
            ImageLoad::Failed => (0.0, 0.0),
        }
    }
}

/// Resolves once an image has either loaded or definitively failed.
#[async_trait]
pub trait ImageProbe: Send + Sync {
    async fn settle(&self, src: &str) -> ImageLoad;
}

/// Wait for every image in a set; resolves only when all have settled.
pub async fn settle_all(probe: &dyn ImageProbe, srcs: &[String]) -> Vec<ImageLoad> {
    join_all(srcs.iter().map(|src| probe.settle(src))).await
}

/// Downloads images relative to the archive root and reads their dimensions.
#[derive(Clone)]
pub struct HttpImageProbe {
    client: HttpClient,
    base: Url,
}

impl HttpImageProbe {
    pub fn new(client: HttpClient, base: Url) -> Self {
        Self { client, base }
    }

    async fn load(&self, src: &str) -> Option<(u32, u32)> {
        let url = self.base.join(src).ok()?;
        let response = self.client.get(url.as_str()).await.ok()?;
        if !response.is_success() {
            return None;
        }
        let bytes = response.bytes().await.ok()?;
        ::image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}

#[async_trait]
impl ImageProbe for HttpImageProbe {
    async fn settle(&self, src: &str) -> ImageLoad {
        match self.load(src).await {
            Some((width, height)) => ImageLoad::Loaded { width, height },
            None => {
                debug!("Image {} did not load", src);
                ImageLoad::Failed
            }
        }
    }
}
