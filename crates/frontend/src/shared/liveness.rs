use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Flag tied to the mounted lifetime of a component.
///
/// Clones share the flag. The owner revokes it in `on_cleanup`; async tasks
/// spawned while mounted check `is_alive()` before touching reactive state.
#[derive(Clone, Debug)]
pub struct LivenessToken {
    alive: Arc<AtomicBool>,
}

impl LivenessToken {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn revoke(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Default for LivenessToken {
    fn default() -> Self {
        Self::new()
    }
}
