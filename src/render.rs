//! Document renderer
//!
//! Recursive flattening of a [`DocumentNode`] tree into a single textual
//! GraphQL document. A render walks a part's segments left to right,
//! emitting literal text and substituting each child reference in order.
//! Rendering is pure synchronous computation; visibility skips are normal
//! control flow ([`RenderOutcome::Skipped`]), while structural violations are
//! hard errors.

use crate::error::RenderError;
use crate::node::{DocumentNode, Part};
use crate::registry::VisibilityRegistry;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Length of the `...` spread token preceding a sub-document reference
const SPREAD_TOKEN_LEN: usize = 3;

/// Outcome of rendering a single document part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The part rendered to a document
    Rendered(RenderedDocument),
    /// The part's leading fragment is lazy and currently invisible
    Skipped,
}

/// A flattened document part with its collected dependencies
///
/// `dependency_texts` and `dependency_names` are positionally paired and
/// collected pre-order. They are intentionally *not* deduplicated at this
/// level: a fragment reached via two composition paths appears twice.
/// Deduplication happens once, during final document assembly in
/// [`render_query`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    /// The part's own flattened text
    pub text: String,
    /// Name recorded from the part's fragment or query reference
    pub name: String,
    /// Full texts of every nested sub-document, in encounter order
    pub dependency_texts: Vec<String>,
    /// Names positionally paired with `dependency_texts`
    pub dependency_names: Vec<String>,
}

/// A complete, executable query document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQuery {
    /// Fragment definitions followed by the root operation, newline-joined
    pub document: String,
    /// Name of the root operation
    pub operation_name: String,
    /// Fragment names included in the document, first-encounter order
    pub fetched_fragments: Vec<String>,
}

/// Render one composite part against the given visibility state
///
/// `for_types` force-includes every lazy fragment, producing the exhaustive
/// document used to derive static types; it must never reach a server.
pub fn render_part(
    part: &Part,
    registry: &VisibilityRegistry,
    for_types: bool,
) -> Result<RenderOutcome, RenderError> {
    if part.segments.len() != part.children.len() + 1 {
        return Err(RenderError::InterleaveMismatch {
            segments: part.segments.len(),
            children: part.children.len(),
        });
    }

    let mut rendered = RenderedDocument::default();
    let mut children = part.children.iter();

    for segment in &part.segments {
        rendered.text.push_str(segment);

        let Some(child) = children.next() else {
            // Trailing segment has no paired child
            break;
        };

        match child {
            DocumentNode::Fragment(frag) => {
                if frag.lazy && !for_types && !registry.is_visible(&frag.name) {
                    trace!(fragment = %frag.name, "skipping invisible lazy fragment");
                    return Ok(RenderOutcome::Skipped);
                }
                rendered.name.clone_from(&frag.name);
                rendered.text.push_str("fragment ");
                rendered.text.push_str(&frag.name);
            }
            DocumentNode::Query(query) => {
                rendered.name.clone_from(&query.name);
                rendered.text.push_str("query ");
                rendered.text.push_str(&query.name);
            }
            DocumentNode::Part(sub) => match render_part(sub, registry, for_types)? {
                RenderOutcome::Skipped => {
                    // The spread token for this reference is already in the
                    // output; drop it so the surrounding text stays valid.
                    // Pop whole chars: segments are opaque text and may end
                    // in multibyte UTF-8, so a byte-length cut could land
                    // mid-character.
                    for _ in 0..SPREAD_TOKEN_LEN {
                        rendered.text.pop();
                    }
                }
                RenderOutcome::Rendered(sub_doc) => {
                    rendered.text.push_str(&sub_doc.name);
                    rendered.dependency_names.push(sub_doc.name);
                    rendered.dependency_names.extend(sub_doc.dependency_names);
                    rendered.dependency_texts.push(sub_doc.text);
                    rendered.dependency_texts.extend(sub_doc.dependency_texts);
                }
            },
        }
    }

    Ok(RenderOutcome::Rendered(rendered))
}

/// Render a document tree into an executable query
///
/// The root must be a composite part resolving to a query reference. A lazy
/// skip escaping to this level is promoted to an error: a query root must
/// never be gated by fragment visibility.
pub fn render_query(
    node: &DocumentNode,
    registry: &VisibilityRegistry,
) -> Result<RenderedQuery, RenderError> {
    let DocumentNode::Part(part) = node else {
        return Err(RenderError::NotAPart);
    };

    // Exhaustive render for static type derivation. Tooling-only: the result
    // is surfaced to tracing and must never influence the real render below.
    #[cfg(debug_assertions)]
    match render_part(part, &VisibilityRegistry::new(), true)? {
        RenderOutcome::Rendered(exhaustive) => trace!(
            operation = %exhaustive.name,
            fragments = exhaustive.dependency_names.len(),
            "exhaustive type render"
        ),
        RenderOutcome::Skipped => unreachable!("for_types renders force-include lazy fragments"),
    }

    let rendered = match render_part(part, registry, false)? {
        RenderOutcome::Rendered(rendered) => rendered,
        RenderOutcome::Skipped => return Err(RenderError::SkippedQueryRoot),
    };

    debug!(
        operation = %rendered.name,
        fragments = rendered.dependency_names.len(),
        "rendered query document"
    );
    Ok(assemble(rendered))
}

/// Assemble fragment definitions and root text into the wire document
///
/// Dependencies are deduplicated by name here, preserving first-encounter
/// order: a valid GraphQL document must not define the same fragment twice,
/// even when the fragment is reachable through several composition paths.
fn assemble(rendered: RenderedDocument) -> RenderedQuery {
    let mut seen = HashSet::new();
    let mut pieces = Vec::with_capacity(rendered.dependency_texts.len() + 1);
    let mut fetched = Vec::with_capacity(rendered.dependency_names.len());

    for (name, text) in rendered
        .dependency_names
        .into_iter()
        .zip(rendered.dependency_texts)
    {
        if seen.insert(name.clone()) {
            pieces.push(text);
            fetched.push(name);
        }
    }
    pieces.push(rendered.text);

    RenderedQuery {
        document: pieces.join("\n"),
        operation_name: rendered.name,
        fetched_fragments: fetched,
    }
}
