/// Typed, reference-counted resource handles.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use crate::resource::resource::ResourceCell;
use crate::resource::{Resource, ResourceFlags, ResourceId, ResourceKind};

/// Shared reference to a resident resource
///
/// Cloning a handle adds a reference; dropping it (or calling `close`)
/// releases one. When the last handle goes away the manager schedules the
/// resource for delayed destruction.
pub struct ResourceHandle<T: Resource> {
    cell: Arc<ResourceCell>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> ResourceHandle<T> {
    /// Wrap a cell, registering a new external reference
    pub(crate) fn acquire(cell: Arc<ResourceCell>) -> Self {
        cell.acquire();
        Self { cell, _marker: PhantomData }
    }

    pub(crate) fn cell(&self) -> &Arc<ResourceCell> {
        &self.cell
    }

    pub fn id(&self) -> ResourceId {
        self.cell.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.cell.kind
    }

    pub fn name(&self) -> String {
        self.cell.state().name.clone()
    }

    pub fn flags(&self) -> ResourceFlags {
        self.cell.state().flags
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.state().loaded
    }

    pub fn is_lost(&self) -> bool {
        self.cell.object().is_lost()
    }

    /// Number of live external handles
    pub fn reference_count(&self) -> usize {
        self.cell.handle_count()
    }

    pub fn destroy_delay(&self) -> f64 {
        self.cell.state().destroy_delay
    }

    /// Seconds to wait in the garbage set before destruction
    ///
    /// Without `override_existing` the delay can only grow.
    pub fn set_destroy_delay(&self, delay: f64, override_existing: bool) {
        let mut state = self.cell.state();
        if override_existing || delay > state.destroy_delay {
            state.destroy_delay = delay;
        }
    }

    /// Do both handles reference the same resource?
    pub fn ptr_eq(&self, other: &ResourceHandle<T>) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }

    /// Borrow the resource
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let object = self.cell.object();
        object.as_any().downcast_ref::<T>().map(f)
    }

    /// Borrow the resource mutably
    pub fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut object = self.cell.object();
        object.as_any_mut().downcast_mut::<T>().map(f)
    }

    /// Release this reference now
    pub fn close(self) {}
}

impl<T: Resource> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        Self::acquire(self.cell.clone())
    }
}

impl<T: Resource> Drop for ResourceHandle<T> {
    fn drop(&mut self) {
        self.cell.release();
    }
}

impl<T: Resource> fmt::Debug for ResourceHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("id", &self.cell.id)
            .field("kind", &self.cell.kind)
            .field("name", &self.name())
            .finish()
    }
}
