//! Standalone HTML export.
//!
//! # Responsibility
//! - Render a document snapshot into one self-contained HTML file.
//! - Derive the download file name from the document title.
//!
//! # Invariants
//! - Pages appear in document order, separated by page-break markers.
//! - An empty title falls back to "Document" in both the rendered output
//!   and the file name.

use crate::model::document::DocumentSnapshot;

/// Title fallback for untitled exports.
pub const EXPORT_FALLBACK_TITLE: &str = "Document";

const PAGE_BREAK: &str = "<div style=\"page-break-after: always;\"></div>";

const EXPORT_STYLE: &str = "\
body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; line-height: 1.6; }
table { border-collapse: collapse; width: 100%; margin: 10px 0; }
td { border: 1px solid #ddd; padding: 8px; }
.page { min-height: 800px; padding: 20px; border: 1px solid #eee; margin-bottom: 20px; }";

/// Renders the snapshot as a complete HTML document string.
pub fn export_html(snapshot: &DocumentSnapshot) -> String {
    let title = effective_title(&snapshot.title);
    let body = snapshot.pages.join(PAGE_BREAK);

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <title>{title}</title>\n\
         <style>\n{EXPORT_STYLE}\n</style>\n\
         </head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n"
    )
}

/// Download file name for an exported document: `<title>.html`.
pub fn export_file_name(title: &str) -> String {
    format!("{}.html", effective_title(title))
}

fn effective_title(title: &str) -> &str {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        EXPORT_FALLBACK_TITLE
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, export_html, EXPORT_FALLBACK_TITLE, PAGE_BREAK};
    use crate::model::document::DocumentSnapshot;

    fn snapshot(title: &str, pages: &[&str]) -> DocumentSnapshot {
        DocumentSnapshot {
            title: title.to_string(),
            pages: pages.iter().map(|page| page.to_string()).collect(),
        }
    }

    #[test]
    fn export_embeds_title_and_pages_in_order() {
        let html = export_html(&snapshot("Report", &["<p>one</p>", "<p>two</p>"]));

        assert!(html.contains("<title>Report</title>"));
        assert!(html.contains("<h1>Report</h1>"));
        let first = html.find("<p>one</p>").unwrap();
        let second = html.find("<p>two</p>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn export_separates_pages_with_page_breaks() {
        let html = export_html(&snapshot("Report", &["a", "b", "c"]));
        assert_eq!(html.matches(PAGE_BREAK).count(), 2);
    }

    #[test]
    fn export_falls_back_on_empty_title() {
        let html = export_html(&snapshot("  ", &["a"]));
        assert!(html.contains(&format!("<h1>{EXPORT_FALLBACK_TITLE}</h1>")));
        assert_eq!(export_file_name(""), "Document.html");
    }

    #[test]
    fn file_name_appends_extension() {
        assert_eq!(export_file_name("Quarterly Report"), "Quarterly Report.html");
    }
}
