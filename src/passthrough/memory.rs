use std::collections::BTreeMap;

use super::{SurfaceHost, SurfaceId};
use crate::error::{Error, Result};

/// In-process host that keeps mounted documents in a map.
///
/// Used by the console front end and the protocol server, which hand the
/// document on to whatever UI renders it.
#[derive(Debug, Default)]
pub struct MemoryHost {
    next_id: u64,
    live: BTreeMap<SurfaceId, String>,
    torn_down: Vec<SurfaceId>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self, id: SurfaceId) -> Option<&str> {
        self.live.get(&id).map(String::as_str)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn torn_down(&self) -> &[SurfaceId] {
        &self.torn_down
    }
}

impl SurfaceHost for MemoryHost {
    fn mount(&mut self, document: &str) -> Result<SurfaceId> {
        self.next_id += 1;
        let id = SurfaceId(self.next_id);
        self.live.insert(id, document.to_string());
        Ok(id)
    }

    fn teardown(&mut self, surface: SurfaceId) -> Result<()> {
        if self.live.remove(&surface).is_none() {
            return Err(Error::Surface(format!("surface {} is not mounted", surface.0)));
        }
        self.torn_down.push(surface);
        Ok(())
    }
}
