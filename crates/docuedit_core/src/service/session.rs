//! Editor session: the single owner of document, surface and save state.
//!
//! # Responsibility
//! - Compose pages, surface, scheduler and store behind one facade.
//! - Enforce flush-before-read: page content leaves this type only
//!   through accessors that first copy the surface back into the active
//!   page.
//!
//! # Invariants
//! - The surface always mirrors the active page between operations.
//! - Page add/delete persist immediately; switching pages does not.
//! - No operation panics; failures surface as values and log events.
//!
//! # See also
//! - DESIGN.md (session section)

use crate::export;
use crate::markup::{self, TextStats};
use crate::model::document::{Document, DocumentSnapshot};
use crate::model::pages::{PageCollection, PageError};
use crate::service::loader::{load_document, LoadSource};
use crate::service::save::{SaveScheduler, SaveState};
use crate::service::surface::EditSurface;
use crate::store::{PersistenceStore, StoreError, PAGES_KEY, TITLE_KEY};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type SessionResult<T> = Result<T, SessionError>;

/// Error surface of session operations.
#[derive(Debug)]
pub enum SessionError {
    /// Structural page-collection rejection.
    Page(PageError),
    /// Persistence transport failure.
    Store(StoreError),
    /// Page list could not be encoded for storage.
    Encode(serde_json::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Page(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode page list: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Page(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<PageError> for SessionError {
    fn from(value: PageError) -> Self {
        Self::Page(value)
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// One editing session over a document.
///
/// Generic over the host surface and the persistence backend so UI shells
/// and tests plug in their own.
pub struct EditorSession<S: EditSurface, P: PersistenceStore> {
    document: Document,
    surface: S,
    store: P,
    scheduler: SaveScheduler,
}

impl<S: EditSurface, P: PersistenceStore> EditorSession<S, P> {
    /// Opens a session: loads the document and binds the surface to
    /// page 0.
    ///
    /// Pre-existing surface content is offered to the loader as the
    /// adoption seed for the no-stored-data case.
    pub fn open(store: P, surface: S, now: Instant) -> Self {
        let seed = surface.content();
        let outcome = load_document(&store, Some(seed.as_str()));

        let mut session = Self {
            document: outcome.document,
            surface,
            store,
            scheduler: SaveScheduler::new(now),
        };
        session.bind_active();
        info!(
            "event=session_open module=service status=ok pages={} active=0",
            session.document.pages.len()
        );
        session
    }

    /// Re-runs loading over a live session.
    ///
    /// Stored pages replace the in-memory ones. When the store holds no
    /// page data, the live pages are kept and page 0 is re-activated via
    /// the normal switch path; the surface is never re-adopted here.
    pub fn reload(&mut self) {
        let outcome = load_document(&self.store, None);
        if outcome.source == LoadSource::Store {
            self.document = outcome.document;
            self.bind_active();
        } else {
            // Cannot fail: index 0 is always valid.
            let _ = self.switch_to(0);
        }
    }

    /// Copies the surface's current markup into the active page.
    ///
    /// Idempotent between edits; every content read below goes through
    /// this.
    pub fn flush(&mut self) {
        self.document.pages.active_mut().content = self.surface.content();
    }

    fn bind_active(&mut self) {
        self.surface.set_content(&self.document.pages.active().content);
    }

    /// Records a whole-content surface update from the host.
    pub fn input(&mut self, markup: &str, now: Instant) {
        self.surface.set_content(markup);
        self.scheduler.note_body_edit(now);
    }

    pub fn title(&self) -> &str {
        &self.document.title
    }

    /// Updates the title and arms the title debounce channel.
    pub fn set_title(&mut self, title: impl Into<String>, now: Instant) {
        self.document.title = title.into();
        self.scheduler.note_title_edit(now);
    }

    /// Appends a blank page, activates it and saves immediately.
    ///
    /// Returns the new page's index.
    pub fn add_page(&mut self, now: Instant) -> SessionResult<usize> {
        self.flush();
        let index = self.document.pages.push_blank();
        self.bind_active();
        self.save(now)?;
        info!(
            "event=page_add module=service status=ok pages={} active={}",
            self.document.pages.len(),
            index
        );
        Ok(index)
    }

    /// Deletes the active page and saves immediately.
    ///
    /// Confirmation is the caller's responsibility. Returns the index of
    /// the newly active page.
    ///
    /// # Errors
    /// - `PageError::LastPage` when only one page remains; no state
    ///   change.
    pub fn delete_active_page(&mut self, now: Instant) -> SessionResult<usize> {
        if self.document.pages.len() == 1 {
            let err = PageError::LastPage;
            warn!("event=page_delete module=service status=rejected reason={err}");
            return Err(err.into());
        }
        // The flushed content is discarded with the page; flushing anyway
        // keeps the discipline uniform across active-page changes.
        self.flush();
        self.document.pages.remove_active()?;
        self.bind_active();
        self.save(now)?;
        let index = self.document.pages.active_index();
        info!(
            "event=page_delete module=service status=ok pages={} active={}",
            self.document.pages.len(),
            index
        );
        Ok(index)
    }

    /// Switches the active page: flush out, activate, bind in.
    ///
    /// Does not save by itself.
    ///
    /// # Errors
    /// - `PageError::InvalidIndex` when out of range; logged, no state
    ///   change.
    pub fn switch_to(&mut self, index: usize) -> Result<usize, PageError> {
        if self.document.pages.get(index).is_none() {
            let err = PageError::InvalidIndex {
                index,
                len: self.document.pages.len(),
            };
            error!("event=page_switch module=service status=error reason={err}");
            return Err(err);
        }
        self.flush();
        self.document.pages.activate(index)?;
        self.bind_active();
        Ok(index)
    }

    /// Switches to the following page; `None` at the last page.
    pub fn next_page(&mut self) -> Option<usize> {
        let target = self.document.pages.next_index()?;
        self.switch_to(target).ok()
    }

    /// Switches to the preceding page; `None` at the first page.
    pub fn prev_page(&mut self) -> Option<usize> {
        let target = self.document.pages.prev_index()?;
        self.switch_to(target).ok()
    }

    /// Fires at most one due debounced save.
    ///
    /// Returns whether a save ran.
    pub fn tick(&mut self, now: Instant) -> SessionResult<bool> {
        if !self.scheduler.save_due(now) {
            return Ok(false);
        }
        self.save(now)?;
        Ok(true)
    }

    /// Persists the current snapshot: title key, then page-list key.
    ///
    /// The two writes are not atomic as a pair; the page list is the
    /// authoritative half.
    pub fn save(&mut self, now: Instant) -> SessionResult<()> {
        self.scheduler.begin_save();
        self.flush();

        let snapshot = self.document.snapshot();
        let result = (|| -> SessionResult<()> {
            let pages_json = serde_json::to_string(&snapshot.pages)?;
            self.store.write(TITLE_KEY, &snapshot.title)?;
            self.store.write(PAGES_KEY, &pages_json)?;
            Ok(())
        })();

        match result {
            Ok(()) => {
                self.scheduler.complete_save(now);
                info!(
                    "event=autosave module=service status=ok pages={}",
                    snapshot.pages.len()
                );
                Ok(())
            }
            Err(err) => {
                self.scheduler.fail_save(now);
                error!("event=autosave module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Pages, flushed first so content is never stale.
    pub fn pages(&mut self) -> &PageCollection {
        self.flush();
        &self.document.pages
    }

    /// Ordered page markup, flushed first.
    pub fn page_contents(&mut self) -> Vec<String> {
        self.flush();
        self.document.pages.contents()
    }

    /// Current snapshot, flushed first.
    pub fn snapshot(&mut self) -> DocumentSnapshot {
        self.flush();
        self.document.snapshot()
    }

    /// Self-contained export HTML for the whole document, flushed first.
    pub fn export_html(&mut self) -> String {
        let snapshot = self.snapshot();
        export::export_html(&snapshot)
    }

    /// Download file name for an export of this document.
    pub fn export_file_name(&self) -> String {
        export::export_file_name(&self.document.title)
    }

    /// Word/character statistics of the active page, flushed first.
    pub fn text_stats(&mut self) -> TextStats {
        self.flush();
        markup::text_stats(&self.document.pages.active().content)
    }

    /// 1-based "current / total" indicator text.
    pub fn page_indicator(&self) -> String {
        format!(
            "{} / {}",
            self.document.pages.active_index() + 1,
            self.document.pages.len()
        )
    }

    pub fn save_state(&self) -> SaveState {
        self.scheduler.state()
    }

    pub fn status_label(&self) -> &'static str {
        self.scheduler.status_label()
    }

    /// Relative last-saved text, recomputed on host display ticks.
    pub fn last_saved_label(&self, now: Instant) -> String {
        self.scheduler.last_saved_label(now)
    }

    /// Read access to the surface, for hosts that render from it.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Read access to the persistence backend.
    pub fn store(&self) -> &P {
        &self.store
    }
}
