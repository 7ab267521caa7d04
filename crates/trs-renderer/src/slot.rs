//! Visualization slot filled by a background build
//!
//! Geometry construction can run off the main thread. Until the ready flag
//! is published nothing is drawn or hit-tested; callers keep running their
//! hover and drag bookkeeping regardless.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use parking_lot::Mutex;

use crate::registry::HandleRegistry;
use crate::visualization::HandleVisualizations;

struct SlotInner {
    ready: AtomicBool,
    value: Mutex<Option<HandleVisualizations>>,
}

/// Shared, lazily filled handle visualization
#[derive(Clone)]
pub struct VisualizationSlot {
    inner: Arc<SlotInner>,
}

impl Default for VisualizationSlot {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for VisualizationSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualizationSlot")
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl VisualizationSlot {
    /// Slot with nothing built yet
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(SlotInner {
                ready: AtomicBool::new(false),
                value: Mutex::new(None),
            }),
        }
    }

    /// Build on the calling thread
    pub fn build_now(registry: Arc<HandleRegistry>) -> Self {
        let slot = Self::empty();
        slot.fill(HandleVisualizations::new(registry));
        slot
    }

    /// Build on a background thread; the slot becomes ready when the thread finishes
    pub fn spawn(registry: Arc<HandleRegistry>) -> (Self, JoinHandle<()>) {
        let slot = Self::empty();
        let target = slot.clone();
        let handle = std::thread::spawn(move || {
            target.fill(HandleVisualizations::new(registry));
        });
        (slot, handle)
    }

    /// Store a built visualization and publish the ready flag
    pub fn fill(&self, visualizations: HandleVisualizations) {
        *self.inner.value.lock() = Some(visualizations);
        self.inner.ready.store(true, Ordering::Release);
        tracing::debug!("Gizmo visualization ready");
    }

    /// True once the visualization has been built
    pub fn is_ready(&self) -> bool {
        self.inner.ready.load(Ordering::Acquire)
    }

    /// Run `f` on the visualization if it is ready
    pub fn with<R>(&self, f: impl FnOnce(&HandleVisualizations) -> R) -> Option<R> {
        if !self.is_ready() {
            return None;
        }
        self.inner.value.lock().as_ref().map(f)
    }

    /// Run `f` on the visualization mutably if it is ready
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut HandleVisualizations) -> R) -> Option<R> {
        if !self.is_ready() {
            return None;
        }
        self.inner.value.lock().as_mut().map(f)
    }
}
