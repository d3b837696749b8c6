//! Per-product in-flight flags. A download control stays disabled while its
//! product's flag is held; different products never block each other.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
pub struct BusyFlags {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl BusyFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the flag for `id`. `None` if an attempt is already in flight.
    pub fn try_acquire(&self, id: &str) -> Option<BusyGuard> {
        let mut set = self.inner.lock().ok()?;
        if !set.insert(id.to_string()) {
            return None;
        }
        Some(BusyGuard {
            flags: Arc::clone(&self.inner),
            id: id.to_string(),
        })
    }

    pub fn is_busy(&self, id: &str) -> bool {
        self.inner
            .lock()
            .map(|set| set.contains(id))
            .unwrap_or(false)
    }
}

/// Releases the flag when dropped, whether the attempt succeeded or not.
#[derive(Debug)]
pub struct BusyGuard {
    flags: Arc<Mutex<HashSet<String>>>,
    id: String,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        if let Ok(mut set) = self.flags.lock() {
            set.remove(&self.id);
        }
    }
}
