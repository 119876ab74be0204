//! Client-side archive loader for a static, month-indexed blog.
//!
//! Walks backwards through `{year}/{MM}/` archive units, assembles each one
//! into an insertable fragment (localized headings, proportional bars, image
//! grids) and hands it to a [`render::RenderSink`]. Infinite scroll and the
//! fullscreen image viewer are modelled as explicit state machines so they
//! can be driven without a live page.

pub mod archive;
pub mod assemble;
pub mod config;
pub mod fragment;
pub mod layout;
pub mod logging;
pub mod page;
pub mod render;
pub mod scroll;
pub mod viewer;

pub use archive::{ArchiveFetcher, ArchiveKey, ArchiveUnit, FetchError, HttpArchiveFetcher};
pub use assemble::{ContentAssembler, FinalizedFragment};
pub use config::{load_settings, Config, Settings};
pub use layout::{ImageDescriptor, LayoutConfig};
pub use render::RenderSink;
pub use scroll::{LoadOutcome, ScrollController, ScrollState};
pub use viewer::{FullscreenViewer, ViewerKey, ViewerSurface};
