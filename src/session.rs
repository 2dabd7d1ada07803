//! Query assembly and consumption API
//!
//! A [`Session`] is the explicit context object created at the root of a
//! component tree and threaded to every consumer. It owns the visibility
//! registry and the fetched-fragment record behind `parking_lot` locks, so
//! handles can be cloned cheaply and shared across the tree. Dropping the
//! last clone tears the session state down with it.
//!
//! Consumers interact through two handle types:
//!
//! - [`QueryHandle`] memoizes a rendered document and re-renders it whenever
//!   lazy visibility changes, then acknowledges fetch completion.
//! - [`FragmentHandle`] claims visibility for a lazy fragment while alive and
//!   releases the claim on drop.

use crate::error::RenderError;
use crate::node::DocumentNode;
use crate::registry::{FetchedFragments, VisibilityRegistry};
use crate::render::{render_query, RenderedQuery};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::debug;

/// Session-scoped composition state
///
/// Cheap to clone; all clones share the same registry and fetched record.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug, Default)]
struct SessionInner {
    registry: RwLock<VisibilityRegistry>,
    fetched: RwLock<FetchedFragments>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a lazy fragment is currently visible in this session
    pub fn is_visible(&self, name: &str) -> bool {
        self.inner.registry.read().is_visible(name)
    }

    /// Force a fragment's visibility outside the handle lifecycle
    pub fn set_visible(&self, name: &str, visible: bool) {
        self.inner.registry.write().set_visible(name, visible);
    }

    /// Whether a fragment's data arrived with the last executed document
    pub fn is_fetched(&self, name: &str) -> bool {
        self.inner.fetched.read().contains(name)
    }

    /// Create a memoizing handle for a query document
    pub fn query(&self, node: Arc<DocumentNode>) -> QueryHandle {
        QueryHandle {
            session: self.clone(),
            node,
            cache: Mutex::new(None),
        }
    }

    /// Create a consumption handle for a fragment document
    ///
    /// The node's leading child must be a fragment reference. Lazy fragments
    /// are claimed visible for the lifetime of the handle; the claim is
    /// reference-counted, so a fragment shared by several live handles stays
    /// visible until the last one drops.
    pub fn fragment(&self, node: &DocumentNode) -> Result<FragmentHandle, RenderError> {
        let DocumentNode::Part(part) = node else {
            return Err(RenderError::NotAFragment);
        };
        let Some(DocumentNode::Fragment(frag)) = part.children.first() else {
            return Err(RenderError::NotAFragment);
        };

        if frag.lazy {
            self.inner.registry.write().acquire(&frag.name);
        }
        Ok(FragmentHandle {
            session: self.clone(),
            name: frag.name.clone(),
            lazy: frag.lazy,
        })
    }
}

/// Memoizing handle for a renderable query document
///
/// The rendered document is cached against the registry version at render
/// time; any visibility transition invalidates the cache, so the next
/// [`rendered`](QueryHandle::rendered) call recomputes against current state.
#[derive(Debug)]
pub struct QueryHandle {
    session: Session,
    node: Arc<DocumentNode>,
    cache: Mutex<Option<CachedRender>>,
}

#[derive(Debug)]
struct CachedRender {
    registry_version: u64,
    rendered: RenderedQuery,
}

impl QueryHandle {
    /// The rendered document under current lazy visibility
    pub fn rendered(&self) -> Result<RenderedQuery, RenderError> {
        let mut cache = self.cache.lock();

        let registry = self.session.inner.registry.read();
        let version = registry.version();
        if let Some(cached) = cache.as_ref() {
            if cached.registry_version == version {
                return Ok(cached.rendered.clone());
            }
        }

        let rendered = render_query(&self.node, &registry)?;
        drop(registry);

        debug!(
            operation = %rendered.operation_name,
            registry_version = version,
            "memoized query render"
        );
        *cache = Some(CachedRender {
            registry_version: version,
            rendered: rendered.clone(),
        });
        Ok(rendered)
    }

    /// Acknowledge that the rendered document was sent and answered
    ///
    /// Atomically replaces the session's fetched-fragment record with the
    /// fragments of the document this handle last rendered.
    pub fn did_fetch(&self) -> Result<(), RenderError> {
        let rendered = self.rendered()?;
        self.session
            .inner
            .fetched
            .write()
            .replace(rendered.fetched_fragments);
        Ok(())
    }
}

/// Consumption handle for a declared fragment
///
/// Holds a visibility claim for lazy fragments; dropping the handle releases
/// the claim.
#[derive(Debug)]
pub struct FragmentHandle {
    session: Session,
    name: String,
    lazy: bool,
}

impl FragmentHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this fragment's data is still outstanding
    ///
    /// True only for lazy fragments whose name was not part of the most
    /// recently executed document.
    pub fn loading(&self) -> bool {
        self.lazy && !self.session.inner.fetched.read().contains(&self.name)
    }
}

impl Drop for FragmentHandle {
    fn drop(&mut self) {
        if self.lazy {
            self.session.inner.registry.write().release(&self.name);
        }
    }
}
