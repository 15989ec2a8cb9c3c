//! Document loading and fail-open recovery.
//!
//! # Responsibility
//! - Rebuild a document from the persistence store at startup.
//! - Degrade to a usable default on absent, malformed or unreadable data.
//!
//! # Invariants
//! - Loading never returns an error; worst case is the default document.
//! - Page 0 is active after every load.

use crate::model::document::{Document, DEFAULT_TITLE, WELCOME_PAGE_CONTENT};
use crate::model::pages::{Page, PageCollection};
use crate::store::{PersistenceStore, PAGES_KEY, TITLE_KEY};
use log::{info, warn};

/// Where the loaded pages came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Parsed out of the store's `docPages` key.
    Store,
    /// Adopted from pre-existing surface content (first run over a
    /// static page).
    Adopted,
    /// Synthesized welcome page.
    Default,
}

/// Result of a load: the document plus provenance of its pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub document: Document,
    pub source: LoadSource,
}

/// Rebuilds the document from `store`.
///
/// `surface_seed` is the host surface's current markup; it is adopted as
/// the sole page only when the store holds no page data at all. Any read
/// or parse failure is treated as absent data.
pub fn load_document(store: &impl PersistenceStore, surface_seed: Option<&str>) -> LoadOutcome {
    let title = load_title(store);

    if let Some(pages) = load_stored_pages(store) {
        let page_count = pages.len();
        let outcome = LoadOutcome {
            document: Document::new(title, pages),
            source: LoadSource::Store,
        };
        info!(
            "event=doc_load module=service status=ok source=store pages={}",
            page_count
        );
        return outcome;
    }

    match surface_seed {
        Some(seed) if !seed.trim().is_empty() => {
            info!("event=doc_load module=service status=ok source=adopted pages=1");
            LoadOutcome {
                document: Document::new(title, PageCollection::new(Page::new(seed))),
                source: LoadSource::Adopted,
            }
        }
        _ => {
            info!("event=doc_load module=service status=ok source=default pages=1");
            LoadOutcome {
                document: Document::new(title, PageCollection::new(Page::new(WELCOME_PAGE_CONTENT))),
                source: LoadSource::Default,
            }
        }
    }
}

fn load_title(store: &impl PersistenceStore) -> String {
    match store.read(TITLE_KEY) {
        Ok(Some(title)) => title,
        Ok(None) => DEFAULT_TITLE.to_string(),
        Err(err) => {
            warn!(
                "event=doc_load module=service status=fallback key={TITLE_KEY} reason=read_error error={err}"
            );
            DEFAULT_TITLE.to_string()
        }
    }
}

/// Stored pages, or `None` for every absent/malformed/unreadable case.
fn load_stored_pages(store: &impl PersistenceStore) -> Option<PageCollection> {
    let raw = match store.read(PAGES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!(
                "event=doc_load module=service status=fallback key={PAGES_KEY} reason=read_error error={err}"
            );
            return None;
        }
    };

    let contents: Vec<String> = match serde_json::from_str(&raw) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(
                "event=doc_load module=service status=fallback key={PAGES_KEY} reason=parse_error error={err}"
            );
            return None;
        }
    };

    // An empty stored list falls through to default-page creation.
    PageCollection::from_contents(contents)
}
