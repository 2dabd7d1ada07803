//! Document node model
//!
//! Components declare the GraphQL fields they need as immutable `DocumentNode`
//! trees, built once at declaration time and shared freely afterwards.
//! Construction is pure: it performs no I/O, never fails, and never inspects
//! the GraphQL text itself. Malformed names propagate verbatim into the
//! rendered output.

use serde::{Deserialize, Serialize};

/// A node in a declared GraphQL document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentNode {
    /// A named, reusable selection
    Fragment(FragmentRef),
    /// The named root operation
    Query(QueryRef),
    /// Literal text interleaved with child references
    Part(Part),
}

/// Reference to a named fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentRef {
    pub name: String,
    /// Lazy fragments are excluded from rendering unless explicitly visible
    pub lazy: bool,
}

/// Reference naming the root operation of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRef {
    pub name: String,
}

/// A composite part: literal segments interleaved with child nodes
///
/// Invariant: `segments.len() == children.len() + 1`. The [`PartBuilder`] and
/// the [`graphql!`](crate::graphql) macro maintain this by construction; the
/// renderer rejects parts that violate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub segments: Vec<String>,
    pub children: Vec<DocumentNode>,
    /// Declaration site, recorded in debug builds for developer tooling.
    /// Never affects rendering output.
    #[serde(skip)]
    pub origin: Option<Origin>,
}

impl DocumentNode {
    /// Fragment name of this node's leading reference, if it has one
    pub fn fragment_name(&self) -> Option<&str> {
        match self {
            DocumentNode::Fragment(frag) => Some(&frag.name),
            DocumentNode::Part(part) => match part.children.first() {
                Some(DocumentNode::Fragment(frag)) => Some(&frag.name),
                _ => None,
            },
            DocumentNode::Query(_) => None,
        }
    }
}

/// Source location of a document declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub file: &'static str,
    pub line: u32,
}

impl Origin {
    pub fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Create a non-lazy fragment reference
pub fn fragment(name: impl Into<String>) -> DocumentNode {
    DocumentNode::Fragment(FragmentRef {
        name: name.into(),
        lazy: false,
    })
}

/// Create a lazy fragment reference
///
/// Lazy fragments are omitted from rendered queries until a consumer marks
/// them visible through the session API.
pub fn lazy_fragment(name: impl Into<String>) -> DocumentNode {
    DocumentNode::Fragment(FragmentRef {
        name: name.into(),
        lazy: true,
    })
}

/// Create a query root reference
pub fn query(name: impl Into<String>) -> DocumentNode {
    DocumentNode::Query(QueryRef { name: name.into() })
}

/// Builder for composite [`Part`] nodes
///
/// Accepts text segments and child nodes in any order and normalizes them to
/// the interleave invariant: adjacent children get an empty segment between
/// them, and the part always starts and ends with a segment.
#[derive(Debug, Default)]
pub struct PartBuilder {
    segments: Vec<String>,
    children: Vec<DocumentNode>,
    origin: Option<Origin>,
}

impl PartBuilder {
    pub fn new() -> Self {
        Self {
            segments: vec![String::new()],
            children: Vec::new(),
            origin: None,
        }
    }

    /// Append literal GraphQL text
    pub fn text(mut self, segment: impl AsRef<str>) -> Self {
        // Unwrap is safe: segments is never empty after new()
        self.segments
            .last_mut()
            .expect("builder holds at least one segment")
            .push_str(segment.as_ref());
        self
    }

    /// Append a child reference
    pub fn child(mut self, node: DocumentNode) -> Self {
        self.children.push(node);
        self.segments.push(String::new());
        self
    }

    /// Record the declaration site for developer tooling
    ///
    /// Only retained in debug builds; a no-op under release.
    pub fn origin(mut self, origin: Origin) -> Self {
        if cfg!(debug_assertions) {
            self.origin = Some(origin);
        }
        self
    }

    pub fn build(self) -> DocumentNode {
        DocumentNode::Part(Part {
            segments: self.segments,
            children: self.children,
            origin: self.origin,
        })
    }
}

/// Declare a composite document part
///
/// Alternates string literals with `{ expr }` child references, mirroring a
/// tagged template:
///
/// ```
/// use graft::{fragment, graphql};
///
/// let country_data = graphql! {
///     { fragment("CountryData") } " on Country { code name }"
/// };
/// ```
#[macro_export]
macro_rules! graphql {
    ( $( $item:tt )* ) => {{
        #[allow(unused_mut)]
        let mut builder = $crate::node::PartBuilder::new()
            .origin($crate::node::Origin::new(::core::file!(), ::core::line!()));
        $( builder = $crate::__graphql_item!(builder, $item); )*
        builder.build()
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __graphql_item {
    ( $builder:expr, $segment:literal ) => {
        $builder.text($segment)
    };
    ( $builder:expr, { $child:expr } ) => {
        $builder.child($child)
    };
}
