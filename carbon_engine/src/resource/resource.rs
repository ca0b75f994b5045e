/// Resource trait and the shared cell every resident resource lives in.
///
/// The manager owns one `Arc<ResourceCell>` per resident resource; every
/// external handle holds another. The cell tracks the number of external
/// handles separately so the manager can tell "only I reference this"
/// without relying on `Arc::strong_count`.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use crossbeam_channel::Sender;
use crate::error::Result;
use crate::resource::{ResourceFlags, ResourceId, ResourceKey, ResourceKind, ResourceManager};
use crate::system::{Clock, StreamType};

// ===== TRAIT =====

/// Behavior shared by every resource kind
pub trait Resource: Any + Send {
    /// Kind discriminator (immutable)
    fn kind(&self) -> ResourceKind;

    /// Fetch/compile backing data and create device objects
    ///
    /// Receives the manager so composite resources can acquire children.
    fn load(&mut self, manager: &mut ResourceManager) -> Result<()>;

    /// Release backing data, device objects and child handles
    fn unload(&mut self);

    /// Device-dependent backing store has been invalidated
    fn is_lost(&self) -> bool {
        false
    }

    /// Release device-dependent backing store, keeping the description
    fn device_lost(&mut self) {}

    /// Rebuild device-dependent backing store from the description
    fn device_restored(&mut self) -> Result<()> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===== CELL =====

/// Bookkeeping owned by the manager, readable through handles
#[derive(Debug, Clone)]
pub(crate) struct ResourceState {
    pub name: String,
    pub flags: ResourceFlags,
    pub stream_type: StreamType,
    pub source: String,
    pub loaded: bool,
    pub destroy_delay: f64,
    pub last_referenced: f64,
}

/// Sent when the last external handle to a resource is dropped
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReleaseEvent {
    pub key: ResourceKey,
    pub released_at: f64,
}

pub(crate) struct ResourceCell {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub key: ResourceKey,
    pub state: Mutex<ResourceState>,
    pub object: Mutex<Box<dyn Resource>>,
    pub handles: AtomicUsize,
    pub releases: Sender<ReleaseEvent>,
    pub clock: Arc<dyn Clock>,
}

impl ResourceCell {
    pub fn state(&self) -> MutexGuard<'_, ResourceState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn object(&self) -> MutexGuard<'_, Box<dyn Resource>> {
        match self.object.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn handle_count(&self) -> usize {
        self.handles.load(Ordering::SeqCst)
    }

    /// Register one more external handle; returns the previous count
    pub fn acquire(&self) -> usize {
        self.handles.fetch_add(1, Ordering::SeqCst)
    }

    /// Drop one external handle, notifying the manager on the last one
    pub fn release(&self) {
        if self.handles.fetch_sub(1, Ordering::SeqCst) == 1 {
            // The manager may already be gone; detached cells just drop.
            let _ = self.releases.send(ReleaseEvent {
                key: self.key,
                released_at: self.clock.now(),
            });
        }
    }
}
