//! Graft: Colocated GraphQL Document Composition
//!
//! Components declare the exact data fields they need as immutable document
//! nodes next to their rendering logic; at request time those declarations
//! are flattened into one executable query document. Lazy fragments stay out
//! of the wire query until a consumer claims them visible through a
//! session-scoped registry.
//!
//! ```
//! use graft::{fragment, graphql, query, Session};
//! use std::sync::Arc;
//!
//! let country_data = graphql! {
//!     { fragment("CountryData") } " on Country { code name }"
//! };
//! let home = Arc::new(graphql! {
//!     { query("Home") } " { country(code: \"US\") { ..." { country_data } " } }"
//! });
//!
//! let session = Session::new();
//! let handle = session.query(home);
//! let rendered = handle.rendered().unwrap();
//! assert_eq!(rendered.operation_name, "Home");
//! assert!(rendered.document.starts_with("fragment CountryData"));
//! ```
//!
//! The crate never parses GraphQL: fragment and query bodies are opaque text
//! interleaved with named references, and schema validation belongs to the
//! server.

pub mod config;
pub mod error;
pub mod logging;
pub mod node;
pub mod registry;
pub mod render;
pub mod session;
pub mod transport;

pub use config::{EndpointConfig, GraftConfig};
pub use error::{ConfigError, RenderError, TransportError};
pub use logging::{init_logging, LoggingConfig};
pub use node::{fragment, lazy_fragment, query, DocumentNode, FragmentRef, Origin, Part, PartBuilder, QueryRef};
pub use registry::{FetchedFragments, VisibilityRegistry};
pub use render::{render_part, render_query, RenderOutcome, RenderedDocument, RenderedQuery};
pub use session::{FragmentHandle, QueryHandle, Session};
pub use transport::{fetch_query, GraphQlTransport, HttpTransport};
