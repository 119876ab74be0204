//! In-memory fetcher, probe and page used by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use blog_archive::archive::{ArchiveMetadata, MonthCursor};
use blog_archive::assemble::ContentAssembler;
use blog_archive::fragment;
use blog_archive::layout::{ImageLoad, ImageProbe, ItemBox, LayoutEngine, RowHeight};
use blog_archive::render::{PageImage, PageMetrics};
use blog_archive::scroll::ScrollOptions;
use blog_archive::{ArchiveFetcher, ArchiveKey, ArchiveUnit, FetchError, RenderSink, ScrollController};

pub fn key(year: i32, month: u32) -> ArchiveKey {
    ArchiveKey::new(year, month)
}

pub fn post_html(title: &str) -> String {
    format!(
        r#"<html><body><div class="post"><h2>{title}</h2><p>Notes for {title}</p></div></body></html>"#
    )
}

/// Serves units from memory; every other key is a 404.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<ArchiveKey, (String, Option<ArchiveMetadata>)>,
    broken: HashSet<ArchiveKey>,
    latency: Option<Duration>,
    calls: Mutex<Vec<ArchiveKey>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(mut self, key: ArchiveKey) -> Self {
        self.pages.insert(key, (post_html(&key.to_string()), None));
        self
    }

    pub fn with_page(mut self, key: ArchiveKey, html: &str, metadata: Option<ArchiveMetadata>) -> Self {
        self.pages.insert(key, (html.to_string(), metadata));
        self
    }

    /// Fail this key as if the connection dropped.
    pub fn with_transport_failure(mut self, key: ArchiveKey) -> Self {
        self.broken.insert(key);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self) -> Vec<ArchiveKey> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArchiveFetcher for FakeFetcher {
    async fn fetch(&self, key: ArchiveKey) -> Result<ArchiveUnit, FetchError> {
        self.calls.lock().unwrap().push(key);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if self.broken.contains(&key) {
            return Err(FetchError::Transport {
                key,
                message: "connection reset".to_string(),
            });
        }

        let (html, metadata) = self.pages.get(&key).ok_or(FetchError::NotFound { key })?;
        let post = fragment::select_first(html, ".post").ok_or(FetchError::NotFound { key })?;
        Ok(ArchiveUnit {
            key,
            post,
            metadata: metadata.clone(),
        })
    }
}

/// Reports fixed dimensions per source; unknown sources fail to load.
#[derive(Default)]
pub struct FakeProbe {
    sizes: HashMap<String, (u32, u32)>,
}

impl FakeProbe {
    pub fn with_size(mut self, src: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(src.to_string(), (width, height));
        self
    }
}

#[async_trait]
impl ImageProbe for FakeProbe {
    async fn settle(&self, src: &str) -> ImageLoad {
        match self.sizes.get(src) {
            Some(&(width, height)) => ImageLoad::Loaded { width, height },
            None => ImageLoad::Failed,
        }
    }
}

/// A page whose content grows by a fixed height per appended unit.
pub struct FakeSink {
    viewport_height: f64,
    unit_height: f64,
    scroll_y: Mutex<f64>,
    appended: Mutex<Vec<ArchiveKey>>,
    images: Mutex<Vec<PageImage>>,
    row_updates: Mutex<Vec<(ArchiveKey, usize, Vec<RowHeight>)>>,
    grid_boxes: Mutex<HashMap<usize, Vec<ItemBox>>>,
}

impl FakeSink {
    pub fn new(viewport_height: f64, unit_height: f64) -> Self {
        Self {
            viewport_height,
            unit_height,
            scroll_y: Mutex::new(0.0),
            appended: Mutex::new(Vec::new()),
            images: Mutex::new(Vec::new()),
            row_updates: Mutex::new(Vec::new()),
            grid_boxes: Mutex::new(HashMap::new()),
        }
    }

    pub fn appended(&self) -> Vec<ArchiveKey> {
        self.appended.lock().unwrap().clone()
    }

    pub fn row_updates(&self) -> Vec<(ArchiveKey, usize, Vec<RowHeight>)> {
        self.row_updates.lock().unwrap().clone()
    }

    pub fn set_grid_boxes(&self, grid: usize, boxes: Vec<ItemBox>) {
        self.grid_boxes.lock().unwrap().insert(grid, boxes);
    }

    /// Scroll so the bottom of the viewport touches the end of the content.
    pub fn scroll_to_bottom(&self) {
        let content = self.metrics().content_height;
        *self.scroll_y.lock().unwrap() = (content - self.viewport_height).max(0.0);
    }

    pub fn scroll_to_top(&self) {
        *self.scroll_y.lock().unwrap() = 0.0;
    }
}

#[async_trait]
impl RenderSink for FakeSink {
    async fn append(&self, fragment: &blog_archive::FinalizedFragment) {
        self.appended.lock().unwrap().push(fragment.key);
        self.images.lock().unwrap().extend(fragment.images());
    }

    async fn next_frame(&self) {
        tokio::task::yield_now().await;
    }

    fn metrics(&self) -> PageMetrics {
        let units = self.appended.lock().unwrap().len() as f64;
        PageMetrics {
            content_height: units * self.unit_height,
            viewport_height: self.viewport_height,
            scroll_y: *self.scroll_y.lock().unwrap(),
        }
    }

    fn measure_grid(&self, _key: ArchiveKey, grid: usize) -> Vec<ItemBox> {
        self.grid_boxes
            .lock()
            .unwrap()
            .get(&grid)
            .cloned()
            .unwrap_or_default()
    }

    fn apply_row_heights(&self, key: ArchiveKey, grid: usize, rows: &[RowHeight]) {
        self.row_updates
            .lock()
            .unwrap()
            .push((key, grid, rows.to_vec()));
    }

    fn images(&self) -> Vec<PageImage> {
        self.images.lock().unwrap().clone()
    }
}

pub fn assembler(probe: FakeProbe) -> ContentAssembler {
    ContentAssembler::new(LayoutEngine::default(), Arc::new(probe))
}

pub fn controller(
    fetcher: Arc<FakeFetcher>,
    sink: Arc<FakeSink>,
    start: ArchiveKey,
    floor_year: i32,
) -> ScrollController {
    ScrollController::new(
        fetcher,
        assembler(FakeProbe::default()),
        sink,
        MonthCursor::new(start, floor_year),
        ScrollOptions::default(),
    )
}
