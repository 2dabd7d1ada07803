//! Session state across consumer mount/unmount cycles

use graft::{graphql, lazy_fragment, query, DocumentNode, Session};
use std::sync::Arc;

fn sidebar() -> DocumentNode {
    graphql! {
        { lazy_fragment("Sidebar") } " on Page { links }"
    }
}

fn page_query() -> Arc<DocumentNode> {
    Arc::new(graphql! {
        { query("Page") } " { page { title ..." { sidebar() } " } }"
    })
}

#[test]
fn session_clones_share_state() {
    let session = Session::new();
    let clone = session.clone();

    let _handle = session.fragment(&sidebar()).unwrap();
    assert!(clone.is_visible("Sidebar"));
}

#[test]
fn loading_tracks_the_executed_document_not_current_visibility() {
    let session = Session::new();
    let handle = session.query(page_query());

    // Consumer mounts after the last fetch: visible, but data still missing
    let sidebar_handle = session.fragment(&sidebar()).unwrap();
    assert!(sidebar_handle.loading());

    // The next executed document includes the fragment
    handle.did_fetch().unwrap();
    assert!(!sidebar_handle.loading());

    // A newer fetch without the fragment marks it loading again
    drop(sidebar_handle);
    handle.did_fetch().unwrap();

    let remounted = session.fragment(&sidebar()).unwrap();
    assert!(remounted.loading());
}

#[test]
fn two_consumers_one_fragment_name() {
    let session = Session::new();
    let handle = session.query(page_query());

    let first = session.fragment(&sidebar()).unwrap();
    let second = session.fragment(&sidebar()).unwrap();

    // One unmount must not strip the fragment from the next render while the
    // other consumer is still mounted. (Boolean visibility registries get
    // this wrong; the reference-counted registry keeps the claim alive.)
    drop(first);
    let rendered = handle.rendered().unwrap();
    assert!(
        rendered.document.contains("fragment Sidebar"),
        "still-mounted consumer keeps its data in the query"
    );

    drop(second);
    let rendered = handle.rendered().unwrap();
    assert!(!rendered.document.contains("Sidebar"));
}

#[test]
fn forced_visibility_bypasses_handles() {
    let session = Session::new();
    let handle = session.query(page_query());

    session.set_visible("Sidebar", true);
    assert!(handle.rendered().unwrap().document.contains("fragment Sidebar"));

    session.set_visible("Sidebar", false);
    assert!(!handle.rendered().unwrap().document.contains("Sidebar"));
}
