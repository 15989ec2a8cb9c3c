//! Document aggregate and persistence snapshot.
//!
//! # Responsibility
//! - Pair the document title with its page collection.
//! - Provide the default first-run document.
//! - Define the snapshot value type used by save/load/export paths.
//!
//! # Invariants
//! - Title and pages are independent; neither mutation touches the other.
//! - The default document always contains exactly one page.

use crate::model::pages::{Page, PageCollection};
use serde::{Deserialize, Serialize};

/// Title used when the store holds none.
pub const DEFAULT_TITLE: &str = "Untitled Document";

/// Markup for the synthesized first-run page.
pub const WELCOME_PAGE_CONTENT: &str =
    "<h1>Welcome to DocuEdit</h1><p>Start typing your document here.</p>";

/// Editable document: a title plus ordered pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub pages: PageCollection,
}

impl Document {
    /// Creates a document over an existing page collection.
    pub fn new(title: impl Into<String>, pages: PageCollection) -> Self {
        Self {
            title: title.into(),
            pages,
        }
    }

    /// Creates the default document: default title, single welcome page.
    pub fn with_default_page() -> Self {
        Self::new(DEFAULT_TITLE, PageCollection::new(Page::new(WELCOME_PAGE_CONTENT)))
    }

    /// Captures title and ordered page contents as one value.
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            title: self.title.clone(),
            pages: self.pages.contents(),
        }
    }
}

/// Serializable projection of a document at one point in time.
///
/// The persisted wire format stores `title` and `pages` under separate
/// keys; this type exists so save/export paths handle one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub title: String,
    pub pages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::{Document, DEFAULT_TITLE, WELCOME_PAGE_CONTENT};

    #[test]
    fn default_document_has_one_welcome_page() {
        let document = Document::with_default_page();

        assert_eq!(document.title, DEFAULT_TITLE);
        assert_eq!(document.pages.len(), 1);
        assert_eq!(document.pages.active().content, WELCOME_PAGE_CONTENT);
    }

    #[test]
    fn snapshot_preserves_page_order() {
        let mut document = Document::with_default_page();
        document.pages.push_blank();
        document.pages.active_mut().content = "second".to_string();

        let snapshot = document.snapshot();

        assert_eq!(snapshot.title, DEFAULT_TITLE);
        assert_eq!(
            snapshot.pages,
            vec![WELCOME_PAGE_CONTENT.to_string(), "second".to_string()]
        );
    }
}
