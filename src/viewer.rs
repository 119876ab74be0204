//! Fullscreen image viewer.
//!
//! The image list is captured fresh from the page every time the viewer
//! opens, so units appended in the background are always included.

use tracing::debug;

use crate::render::PageImage;

/// Keys the viewer reacts to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerKey {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl ViewerKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Escape" => ViewerKey::Escape,
            "ArrowLeft" => ViewerKey::ArrowLeft,
            "ArrowRight" => ViewerKey::ArrowRight,
            _ => ViewerKey::Other,
        }
    }
}

/// Modal surface the viewer drives.
pub trait ViewerSurface {
    /// Display an image and set the enabled state of the edge buttons.
    fn show(&mut self, image: &PageImage, previous_enabled: bool, next_enabled: bool);
    fn hide(&mut self);
    fn attach_key_listener(&mut self);
    fn detach_key_listener(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
enum Session {
    Closed,
    Open { index: usize, images: Vec<PageImage> },
}

/// Closed/Open state machine for paging through every image on the page.
pub struct FullscreenViewer<V: ViewerSurface> {
    surface: V,
    session: Session,
    listening: bool,
}

impl<V: ViewerSurface> FullscreenViewer<V> {
    pub fn new(surface: V) -> Self {
        Self {
            surface,
            session: Session::Closed,
            listening: false,
        }
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn is_open(&self) -> bool {
        matches!(self.session, Session::Open { .. })
    }

    pub fn current_index(&self) -> Option<usize> {
        match &self.session {
            Session::Open { index, .. } => Some(*index),
            Session::Closed => None,
        }
    }

    pub fn image_count(&self) -> usize {
        match &self.session {
            Session::Open { images, .. } => images.len(),
            Session::Closed => 0,
        }
    }

    /// Open at `index` within the page's current image list.
    ///
    /// `index` is the clicked element's position in that list, so repeated
    /// copies of one image each open at their own place. An out-of-range
    /// index (or an empty page) leaves the viewer closed.
    pub fn open(&mut self, images: Vec<PageImage>, index: usize) -> bool {
        if index >= images.len() {
            debug!("Ignoring fullscreen open at {} of {}", index, images.len());
            return false;
        }

        self.session = Session::Open { index, images };
        if !self.listening {
            self.surface.attach_key_listener();
            self.listening = true;
        }
        self.render();
        true
    }

    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.session = Session::Closed;
        self.surface.hide();
        if self.listening {
            self.surface.detach_key_listener();
            self.listening = false;
        }
    }

    /// Background click; identical to an explicit close.
    pub fn click_background(&mut self) {
        self.close();
    }

    pub fn previous(&mut self) {
        if let Session::Open { index, .. } = &mut self.session {
            if *index > 0 {
                *index -= 1;
                self.render();
            }
        }
    }

    pub fn next(&mut self) {
        if let Session::Open { index, images } = &mut self.session {
            if *index + 1 < images.len() {
                *index += 1;
                self.render();
            }
        }
    }

    pub fn handle_key(&mut self, key: ViewerKey) {
        if !self.is_open() {
            return;
        }
        match key {
            ViewerKey::Escape => self.close(),
            ViewerKey::ArrowLeft => self.previous(),
            ViewerKey::ArrowRight => self.next(),
            ViewerKey::Other => {}
        }
    }

    fn render(&mut self) {
        if let Session::Open { index, images } = &self.session {
            if let Some(image) = images.get(*index) {
                self.surface
                    .show(image, *index > 0, *index + 1 < images.len());
            }
        }
    }
}
