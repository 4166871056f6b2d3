//! Single-flight guard for exports.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared "export in progress" flag.
///
/// Clones share the flag, so a UI can hold one to grey out its export
/// control while the pipeline holds another.
#[derive(Debug, Clone, Default)]
pub struct ExportGate {
    busy: Arc<AtomicBool>,
}

impl ExportGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the gate, or returns `None` when an export already holds it.
    pub fn try_acquire(&self) -> Option<ExportPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportPermit {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Held for the duration of one export; releases the gate on drop.
#[derive(Debug)]
pub struct ExportPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for ExportPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
