//! Infinite scroll: walks the archive backwards and appends units in order.
//!
//! All loading goes through one async mutex around the session, so at most
//! one fetch/assemble/append cycle runs at a time and units land on the page
//! in strictly decreasing calendar order. Scroll triggers that arrive while a
//! cycle is running are dropped rather than queued; the next scroll event
//! re-checks the page position.

mod session;

pub use session::ArchiveSession;

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use crate::archive::{ArchiveFetcher, ArchiveKey, MonthCursor};
use crate::assemble::{ContentAssembler, FinalizedFragment};
use crate::config::Settings;
use crate::render::RenderSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    Idle,
    Loading,
    Exhausted,
}

/// Result of one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A unit was appended to the page.
    Appended(ArchiveKey),
    /// The floor was crossed; nothing more will ever load.
    Exhausted,
    /// Another load was already in flight.
    Busy,
    /// Nothing to do: the page is not close enough to the bottom, the
    /// controller has not been activated yet, or it already was.
    NotNeeded,
}

/// Tuning for the controller, usually taken from [`Settings`].
#[derive(Debug, Clone)]
pub struct ScrollOptions {
    pub max_extra_units: usize,
    pub scroll_threshold: f64,
    pub scrollable_margin: f64,
}

impl From<&Settings> for ScrollOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            max_extra_units: settings.max_extra_units,
            scroll_threshold: settings.scroll_threshold,
            scrollable_margin: settings.scrollable_margin,
        }
    }
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

pub struct ScrollController {
    fetcher: Arc<dyn ArchiveFetcher>,
    assembler: ContentAssembler,
    sink: Arc<dyn RenderSink>,
    options: ScrollOptions,
    session: Mutex<ArchiveSession>,
    state: watch::Sender<ScrollState>,
}

impl ScrollController {
    pub fn new(
        fetcher: Arc<dyn ArchiveFetcher>,
        assembler: ContentAssembler,
        sink: Arc<dyn RenderSink>,
        cursor: MonthCursor,
        options: ScrollOptions,
    ) -> Self {
        let session = ArchiveSession::new(cursor);
        let initial = if session.is_exhausted() {
            ScrollState::Exhausted
        } else {
            ScrollState::Idle
        };
        let (state, _) = watch::channel(initial);

        Self {
            fetcher,
            assembler,
            sink,
            options,
            session: Mutex::new(session),
            state,
        }
    }

    /// Controller starting at the current month, configured from settings.
    pub fn from_settings(
        settings: &Settings,
        fetcher: Arc<dyn ArchiveFetcher>,
        assembler: ContentAssembler,
        sink: Arc<dyn RenderSink>,
    ) -> Self {
        Self::new(
            fetcher,
            assembler,
            sink,
            MonthCursor::starting_now(settings.floor_year),
            ScrollOptions::from(settings),
        )
    }

    pub fn state(&self) -> ScrollState {
        *self.state.borrow()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ScrollState> {
        self.state.subscribe()
    }

    /// Keys appended so far, newest first.
    pub async fn loaded_keys(&self) -> Vec<ArchiveKey> {
        self.session.lock().await.loaded_keys()
    }

    /// Initial activation: load the current month (or the newest one before
    /// it), then keep loading until the page can scroll.
    ///
    /// Runs once per session; later calls return `NotNeeded`.
    pub async fn activate(&self) -> LoadOutcome {
        let mut session = self.session.lock().await;
        if session.is_activated() {
            return LoadOutcome::NotNeeded;
        }
        session.mark_activated();
        if session.is_exhausted() {
            return LoadOutcome::Exhausted;
        }

        let current = session.cursor().current();
        let outcome = if self.try_load(&mut session, current).await {
            LoadOutcome::Appended(current)
        } else {
            self.load_next_locked(&mut session).await
        };

        if let LoadOutcome::Appended(_) = outcome {
            self.ensure_scrollable(&mut session).await;
        }
        outcome
    }

    /// Load the next older unit, waiting for any load already in flight.
    ///
    /// Before [`activate`](Self::activate) has run this does nothing, so the
    /// current month is always the first one tried.
    pub async fn load_next(&self) -> LoadOutcome {
        let mut session = self.session.lock().await;
        if !session.is_activated() {
            return LoadOutcome::NotNeeded;
        }
        self.load_next_locked(&mut session).await
    }

    /// Scroll observer: load the next unit when the viewport nears the bottom.
    pub async fn on_scroll(&self) -> LoadOutcome {
        if self.state() == ScrollState::Exhausted {
            return LoadOutcome::Exhausted;
        }
        if !self.sink.metrics().near_bottom(self.options.scroll_threshold) {
            return LoadOutcome::NotNeeded;
        }
        let Ok(mut session) = self.session.try_lock() else {
            debug!("Scroll trigger ignored, load already in flight");
            return LoadOutcome::Busy;
        };
        if !session.is_activated() {
            debug!("Scroll trigger ignored, archive not activated yet");
            return LoadOutcome::NotNeeded;
        }
        self.load_next_locked(&mut session).await
    }

    /// Load up to the extra-unit cap while the page is too short to scroll.
    async fn ensure_scrollable(&self, session: &mut ArchiveSession) {
        self.sink.next_frame().await;

        let mut extra = 0;
        while extra < self.options.max_extra_units
            && !session.is_exhausted()
            && !self.sink.metrics().is_scrollable(self.options.scrollable_margin)
        {
            self.load_next_locked(session).await;
            self.sink.next_frame().await;
            extra += 1;
        }
    }

    /// Walk back month by month until a unit appends or the floor is crossed.
    async fn load_next_locked(&self, session: &mut ArchiveSession) -> LoadOutcome {
        loop {
            let Some(key) = session.advance() else {
                self.mark_exhausted(session);
                return LoadOutcome::Exhausted;
            };
            if self.try_load(session, key).await {
                return LoadOutcome::Appended(key);
            }
        }
    }

    /// Fetch, assemble and append one unit. False means "try an earlier month".
    async fn try_load(&self, session: &mut ArchiveSession, key: ArchiveKey) -> bool {
        if !session.can_append(key) {
            debug!("Skipping {}, already loaded or out of order", key);
            return false;
        }

        self.state.send_replace(ScrollState::Loading);
        let unit = match self.fetcher.fetch(key).await {
            Ok(unit) => unit,
            Err(e) => {
                debug!("{}", e);
                self.state.send_replace(ScrollState::Idle);
                return false;
            }
        };

        let fragment = self.assembler.assemble(unit).await;
        self.sink.append(&fragment).await;
        session.record_appended(key);
        info!("Appended archive unit {}", key);

        self.sink.next_frame().await;
        self.match_row_heights(&fragment);

        self.state.send_replace(ScrollState::Idle);
        true
    }

    /// Second layout pass, once the fragment's grids have been rendered.
    fn match_row_heights(&self, fragment: &FinalizedFragment) {
        let viewport = self.sink.metrics().viewport_height;
        let engine = self.assembler.engine();

        for plan in &fragment.grids {
            let boxes = self.sink.measure_grid(fragment.key, plan.index);
            let rows = engine.row_heights(&plan.images, &boxes, viewport);
            if !rows.is_empty() {
                debug!(
                    "Matching {} mixed row(s) in grid {} of {}",
                    rows.len(),
                    plan.index,
                    fragment.key
                );
                self.sink.apply_row_heights(fragment.key, plan.index, &rows);
            }
        }
    }

    fn mark_exhausted(&self, session: &mut ArchiveSession) {
        session.exhaust();
        if self.state() != ScrollState::Exhausted {
            info!(
                "Reached the floor year {}, no more archive units",
                session.cursor().floor_year()
            );
        }
        self.state.send_replace(ScrollState::Exhausted);
    }
}
