use docuedit_core::{
    Document, Page, PageCollection, PageError, BLANK_PAGE_CONTENT, WELCOME_PAGE_CONTENT,
};

#[test]
fn collection_never_drops_below_one_page() {
    let mut pages = PageCollection::new(Page::new("seed"));

    for _ in 0..4 {
        pages.push_blank();
    }
    while pages.len() > 1 {
        pages.remove_active().unwrap();
    }

    let err = pages.remove_active().unwrap_err();
    assert_eq!(err, PageError::LastPage);
    assert_eq!(pages.len(), 1);
}

#[test]
fn interleaved_adds_and_deletes_keep_invariants() {
    let mut pages = PageCollection::new(Page::new("seed"));

    pages.push_blank();
    pages.push_blank();
    pages.activate(0).unwrap();
    pages.remove_active().unwrap();
    pages.push_blank();
    pages.remove_active().unwrap();

    assert!(pages.len() >= 1);
    assert!(pages.active_index() < pages.len());
}

#[test]
fn delete_on_single_page_reports_rejection_and_changes_nothing() {
    let mut pages = PageCollection::new(Page::new("only page"));
    let before = pages.clone();

    let err = pages.remove_active().unwrap_err();

    assert_eq!(err, PageError::LastPage);
    assert_eq!(pages, before);
    assert_eq!(err.to_string(), "cannot delete the last page");
}

#[test]
fn two_adds_on_default_document_give_three_pages_with_last_active() {
    // Default single page, then add twice.
    let mut document = Document::with_default_page();
    assert_eq!(document.pages.active().content, WELCOME_PAGE_CONTENT);

    document.pages.push_blank();
    document.pages.push_blank();

    assert_eq!(document.pages.len(), 3);
    assert_eq!(document.pages.active_index(), 2);
    assert_eq!(document.pages.active().content, BLANK_PAGE_CONTENT);
}

#[test]
fn switch_targets_must_be_in_range() {
    let mut pages = PageCollection::from_contents(["a", "b", "c"]).unwrap();

    assert_eq!(pages.activate(2).unwrap(), 2);
    let err = pages.activate(3).unwrap_err();
    assert_eq!(err, PageError::InvalidIndex { index: 3, len: 3 });
    assert_eq!(pages.active_index(), 2);
}

#[test]
fn ordering_is_insertion_order() {
    let mut pages = PageCollection::from_contents(["a", "b"]).unwrap();
    pages.push_blank();
    pages.active_mut().content = "c".to_string();

    assert_eq!(
        pages.contents(),
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
}
