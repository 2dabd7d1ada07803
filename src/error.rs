//! Error types for document rendering, transport, and configuration.

use thiserror::Error;

/// Structural rendering errors
///
/// These indicate a declaration bug and are raised immediately, never
/// recovered. A lazy-visibility skip is *not* an error; it is modeled as
/// [`RenderOutcome::Skipped`](crate::render::RenderOutcome) and only promoted
/// to [`RenderError::SkippedQueryRoot`] when it escapes to the top of
/// [`render_query`](crate::render::render_query).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Part interleave violated: {segments} segments for {children} children")]
    InterleaveMismatch { segments: usize, children: usize },

    #[error("Only composite parts can be rendered")]
    NotAPart,

    #[error("Cannot render a fragment as a query")]
    SkippedQueryRoot,

    #[error("Document root is not a fragment declaration")]
    NotAFragment,
}

/// Transport-level errors
///
/// Retry policy belongs to callers; the core never retries.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("GraphQL request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GraphQL endpoint returned status {status}")]
    Status { status: u16 },

    #[error("Malformed GraphQL response envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("GraphQL execution errors: {messages:?}")]
    GraphQl { messages: Vec<String> },

    #[error("GraphQL response contained no data")]
    MissingData,

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Configuration and logging setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
