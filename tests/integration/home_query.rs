//! End-to-end composition of a query from component fragment declarations
//!
//! Mirrors the canonical setup: a `Home` query composing a non-lazy
//! `CountryData` fragment and a lazy `CapitalData` fragment, with visibility
//! toggling between renders.

use graft::{fragment, graphql, lazy_fragment, query, DocumentNode, Session};
use std::sync::Arc;

fn country_data() -> DocumentNode {
    graphql! {
        { fragment("CountryData") } " on Country { code name }"
    }
}

fn capital_data() -> DocumentNode {
    graphql! {
        { lazy_fragment("CapitalData") } " on Country { capital }"
    }
}

fn home_query() -> Arc<DocumentNode> {
    Arc::new(graphql! {
        { query("Home") } " { usa: country(code: \"US\") { ..."
            { country_data() } " ..."
            { capital_data() }
        " } }"
    })
}

#[test]
fn invisible_capital_is_absent_from_the_wire_query() {
    let session = Session::new();
    let handle = session.query(home_query());

    let rendered = handle.rendered().unwrap();
    assert_eq!(rendered.operation_name, "Home");
    assert_eq!(rendered.fetched_fragments, vec!["CountryData"]);

    assert!(rendered.document.contains("query Home"));
    assert!(rendered.document.contains("...CountryData"));
    assert!(rendered.document.contains("fragment CountryData on Country { code name }"));

    // No trace of the lazy fragment: neither definition nor sub-reference
    assert!(!rendered.document.contains("CapitalData"));
    assert!(!rendered.document.contains("fragment CapitalData"));
}

#[test]
fn visible_capital_appears_in_declaration_order() {
    let session = Session::new();
    let handle = session.query(home_query());

    let _capital = session.fragment(&capital_data()).unwrap();

    let rendered = handle.rendered().unwrap();
    assert_eq!(
        rendered.fetched_fragments,
        vec!["CountryData", "CapitalData"],
        "fetched fragments follow encounter order"
    );
    assert!(rendered.document.contains("fragment CountryData on Country { code name }"));
    assert!(rendered.document.contains("fragment CapitalData on Country { capital }"));
    assert!(rendered.document.contains("...CountryData"));
    assert!(rendered.document.contains("...CapitalData"));

    // Definitions precede the root operation
    let query_pos = rendered.document.find("query Home").unwrap();
    let country_pos = rendered.document.find("fragment CountryData").unwrap();
    let capital_pos = rendered.document.find("fragment CapitalData").unwrap();
    assert!(country_pos < query_pos);
    assert!(capital_pos < query_pos);
}

#[test]
fn toggling_visibility_changes_the_next_render_only() {
    let session = Session::new();
    let handle = session.query(home_query());

    let without = handle.rendered().unwrap();

    let capital = session.fragment(&capital_data()).unwrap();
    let with = handle.rendered().unwrap();
    assert_ne!(without, with);

    drop(capital);
    let reverted = handle.rendered().unwrap();
    assert_eq!(without, reverted, "rendering is a pure function of tree and registry");
}

#[test]
fn rendering_is_deterministic_across_invocations() {
    let session = Session::new();
    let handle = session.query(home_query());
    let _capital = session.fragment(&capital_data()).unwrap();

    let first = handle.rendered().unwrap();
    for _ in 0..10 {
        assert_eq!(handle.rendered().unwrap(), first);
    }
}
