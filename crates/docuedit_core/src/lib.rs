//! Core domain logic for DocuEdit.
//! This crate is the single source of truth for document invariants.

pub mod export;
pub mod logging;
pub mod markup;
pub mod model;
pub mod service;
pub mod store;

pub use export::{export_file_name, export_html, EXPORT_FALLBACK_TITLE};
pub use logging::{default_log_level, init_logging, logging_status};
pub use markup::{image_markup, link_markup, table_markup, text_stats, TextStats};
pub use model::document::{Document, DocumentSnapshot, DEFAULT_TITLE, WELCOME_PAGE_CONTENT};
pub use model::pages::{Page, PageCollection, PageError, BLANK_PAGE_CONTENT};
pub use service::loader::{load_document, LoadOutcome, LoadSource};
pub use service::save::{SaveScheduler, SaveState, BODY_DEBOUNCE, TITLE_DEBOUNCE};
pub use service::session::{EditorSession, SessionError, SessionResult};
pub use service::surface::{BufferSurface, EditSurface};
pub use store::{MemoryStore, PersistenceStore, SqliteStore, StoreError, PAGES_KEY, TITLE_KEY};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
