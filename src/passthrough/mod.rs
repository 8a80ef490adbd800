//! Markup "execution": the document is handed verbatim to an embedded
//! surface owned by the host instead of being simulated.

mod memory;

use tracing::{debug, info};

use crate::error::Result;

pub use memory::MemoryHost;

/// Identifier of one mounted surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

/// Something that can host isolated documents, e.g. an iframe in a browser
/// front end.
pub trait SurfaceHost {
    /// Create a fresh surface and load `document` into it.
    fn mount(&mut self, document: &str) -> Result<SurfaceId>;

    /// Destroy `surface` together with anything still running inside it.
    fn teardown(&mut self, surface: SurfaceId) -> Result<()>;
}

/// Owns at most one live surface at a time.
pub struct PassthroughExecutor<H> {
    host: H,
    current: Option<SurfaceId>,
}

impl<H: SurfaceHost> PassthroughExecutor<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            current: None,
        }
    }

    /// Replace the current surface with a new one showing `source`.
    ///
    /// The old surface is torn down before the new one is mounted.
    pub fn render(&mut self, source: &str) -> Result<SurfaceId> {
        self.discard()?;
        let id = self.host.mount(source)?;
        info!(surface = id.0, bytes = source.len(), "mounted document surface");
        self.current = Some(id);
        Ok(id)
    }

    /// Tear down the current surface, if any.
    pub fn discard(&mut self) -> Result<()> {
        if let Some(old) = self.current.take() {
            debug!(surface = old.0, "tearing down surface");
            self.host.teardown(old)?;
        }
        Ok(())
    }

    pub fn current(&self) -> Option<SurfaceId> {
        self.current
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}
