//! Renderer behavior under lazy-fragment visibility

use graft::{
    fragment, graphql, lazy_fragment, query, render_part, render_query, DocumentNode, Part,
    RenderError, RenderOutcome, VisibilityRegistry,
};

fn as_part(node: &DocumentNode) -> &Part {
    match node {
        DocumentNode::Part(part) => part,
        _ => panic!("expected a part"),
    }
}

fn details() -> DocumentNode {
    graphql! {
        { lazy_fragment("Details") } " on Thing { weight }"
    }
}

#[test]
fn lone_invisible_lazy_part_is_skipped() {
    let node = details();
    let outcome = render_part(as_part(&node), &VisibilityRegistry::new(), false).unwrap();
    assert_eq!(outcome, RenderOutcome::Skipped);
}

#[test]
fn composite_drops_skipped_subreference_cleanly() {
    let node = graphql! {
        { query("Things") } " { thing { id ..." { details() } " } }"
    };
    let rendered = render_query(&node, &VisibilityRegistry::new()).unwrap();

    assert_eq!(rendered.document, "query Things { thing { id  } }");
    assert!(!rendered.document.contains("..."), "no dangling spread token");
    assert!(rendered.fetched_fragments.is_empty());
}

#[test]
fn visible_lazy_fragment_appears_exactly_once() {
    let node = graphql! {
        { query("Things") } " { thing { id ..." { details() } " } }"
    };
    let mut registry = VisibilityRegistry::new();
    registry.set_visible("Details", true);

    let rendered = render_query(&node, &registry).unwrap();
    assert_eq!(rendered.fetched_fragments, vec!["Details"]);
    assert_eq!(
        rendered.document.matches("fragment Details").count(),
        1,
        "definition emitted once"
    );
    assert!(rendered.document.contains("...Details"));
}

#[test]
fn for_types_render_includes_every_lazy_fragment() {
    let node = graphql! {
        { query("Things") } " { thing { id ..." { details() } " } }"
    };
    // Empty registry: nothing is visible for a real render
    let outcome = render_part(as_part(&node), &VisibilityRegistry::new(), true).unwrap();

    let RenderOutcome::Rendered(doc) = outcome else {
        panic!("for_types renders never skip");
    };
    assert_eq!(doc.dependency_names, vec!["Details"]);
}

#[test]
fn skip_propagates_through_nested_composites() {
    // The lazy fragment sits two levels down; only its own enclosing part
    // is skipped, outer composition stays intact.
    let wrapper = graphql! {
        { fragment("Wrapper") } " on Thing { ..." { details() } " }"
    };
    let node = graphql! {
        { query("Things") } " { thing { ..." { wrapper } " } }"
    };

    let rendered = render_query(&node, &VisibilityRegistry::new()).unwrap();
    assert_eq!(rendered.fetched_fragments, vec!["Wrapper"]);
    assert!(rendered.document.contains("fragment Wrapper on Thing {  }"));
}

#[test]
fn lazy_query_root_cannot_be_rendered() {
    let node = details();
    assert_eq!(
        render_query(&node, &VisibilityRegistry::new()).unwrap_err(),
        RenderError::SkippedQueryRoot
    );
}
