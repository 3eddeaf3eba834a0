//! Handle-to-object registry for live native objects.
//!
//! Every native object the bridge exposes across the IPC boundary (sources,
//! scenes, services, encoders, ...) is referred to remotely by a small `u32`
//! handle. An [`ObjectManager`] hands those handles out, resolves them back
//! to objects, and releases them when the object is destroyed.

use std::sync::{Mutex, MutexGuard};
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::index::{IndexAllocator, IndexConfig};
use crate::{bridge_bail, bridge_err, bridge_debug, bridge_trace};

const SOURCE: &str = "osn::ObjectManager";

/// Allocator and map, always locked together
struct ManagerState<T> {
    index: IndexAllocator,
    objects: FxHashMap<u32, T>,
}

/// Thread-safe registry mapping handles to objects
///
/// A single mutex guards both the handle allocator and the handle map, so a
/// handle is only ever observed as used while its object is present. The
/// manager is an ordinary owned value; share it with `Arc` where more than
/// one thread needs it.
///
/// # Example
///
/// ```
/// use obs_bridge::osn::{ObjectManager, Error};
///
/// let sources: ObjectManager<String> = ObjectManager::new();
/// let handle = sources.allocate("mic".to_string())?;
/// assert_eq!(sources.get(handle)?, "mic");
///
/// sources.free(handle)?;
/// assert_eq!(sources.get(handle), Err(Error::InvalidReference(handle)));
/// # Ok::<(), Error>(())
/// ```
pub struct ObjectManager<T> {
    state: Mutex<ManagerState<T>>,
}

impl<T> ObjectManager<T> {
    /// Create an empty manager handing out handles from 0
    pub fn new() -> Self {
        Self::from_allocator(IndexAllocator::new())
    }

    /// Create an empty manager over a custom handle window
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the window is empty.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        let index = IndexAllocator::with_config(config)
            .map_err(|err| bridge_err!(SOURCE, err))?;
        Ok(Self::from_allocator(index))
    }

    fn from_allocator(index: IndexAllocator) -> Self {
        Self {
            state: Mutex::new(ManagerState {
                index,
                objects: FxHashMap::default(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ManagerState<T>>> {
        self.state
            .lock()
            .map_err(|_| bridge_err!(SOURCE, Error::LockPoisoned("ObjectManager state".to_string())))
    }

    /// Register an object and return its new handle
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexExhausted` if no handle is free.
    pub fn allocate(&self, object: T) -> Result<u32> {
        let mut state = self.lock()?;

        let Some(handle) = state.index.allocate() else {
            bridge_bail!(SOURCE, Error::IndexExhausted);
        };
        state.objects.insert(handle, object);

        bridge_trace!(SOURCE, "Allocated handle {}", handle);
        Ok(handle)
    }

    /// Whether `handle` currently refers to an object
    ///
    /// # Errors
    ///
    /// Returns `Error::LockPoisoned` if a thread panicked while holding the
    /// manager lock.
    pub fn contains(&self, handle: u32) -> Result<bool> {
        Ok(self.lock()?.index.is_used(handle))
    }

    /// Run `f` against the object behind `handle`
    ///
    /// The manager lock is held while `f` runs. Calling back into the same
    /// manager from `f` deadlocks; a panic in `f` poisons the manager.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidReference` if the handle is not allocated.
    pub fn with<R>(&self, handle: u32, f: impl FnOnce(&T) -> R) -> Result<R> {
        let state = self.lock()?;
        if !state.index.is_used(handle) {
            bridge_bail!(SOURCE, Error::InvalidReference(handle));
        }
        match state.objects.get(&handle) {
            Some(object) => Ok(f(object)),
            None => Err(bridge_err!(SOURCE, Error::InvalidReference(handle))),
        }
    }

    /// Unregister the object behind `handle` and release the handle
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidReference` if the handle is not allocated.
    pub fn free(&self, handle: u32) -> Result<T> {
        let mut state = self.lock()?;
        if !state.index.is_used(handle) {
            bridge_bail!(SOURCE, Error::InvalidReference(handle));
        }

        let Some(object) = state.objects.remove(&handle) else {
            bridge_bail!(SOURCE, Error::InvalidReference(handle));
        };
        state.index.mark(handle, false);

        bridge_trace!(SOURCE, "Released handle {}", handle);
        Ok(object)
    }

    /// Visit every object in ascending handle order
    pub fn for_each(&self, mut f: impl FnMut(u32, &T)) -> Result<()> {
        let state = self.lock()?;
        let mut handles: Vec<u32> = state.objects.keys().copied().collect();
        handles.sort_unstable();
        for handle in handles {
            if let Some(object) = state.objects.get(&handle) {
                f(handle, object);
            }
        }
        Ok(())
    }

    /// All live handles, ascending
    pub fn handles(&self) -> Result<Vec<u32>> {
        let mut handles = Vec::new();
        self.for_each(|handle, _| handles.push(handle))?;
        Ok(handles)
    }

    /// Number of registered objects
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.objects.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Drop every object and release every handle
    pub fn clear(&self) -> Result<()> {
        let mut state = self.lock()?;
        let released = state.objects.len();
        state.objects.clear();
        state.index.clear();

        bridge_debug!(SOURCE, "Cleared {} objects", released);
        Ok(())
    }
}

impl<T: Clone> ObjectManager<T> {
    /// Clone of the object behind `handle`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidReference` if the handle is not allocated.
    pub fn get(&self, handle: u32) -> Result<T> {
        self.with(handle, T::clone)
    }
}

impl<T: PartialEq> ObjectManager<T> {
    /// Handle of the first registered object equal to `object`
    pub fn find(&self, object: &T) -> Result<Option<u32>> {
        let state = self.lock()?;
        Ok(lowest_handle_of(&state.objects, object))
    }

    /// Unregister `object` and release its handle
    ///
    /// Returns the released handle, or `None` if the object is not registered.
    pub fn free_object(&self, object: &T) -> Result<Option<u32>> {
        let mut state = self.lock()?;
        let Some(handle) = lowest_handle_of(&state.objects, object) else {
            return Ok(None);
        };

        state.objects.remove(&handle);
        state.index.mark(handle, false);

        bridge_trace!(SOURCE, "Released handle {}", handle);
        Ok(Some(handle))
    }
}

fn lowest_handle_of<T: PartialEq>(objects: &FxHashMap<u32, T>, object: &T) -> Option<u32> {
    objects
        .iter()
        .filter(|(_, candidate)| *candidate == object)
        .map(|(handle, _)| *handle)
        .min()
}

impl<T> Default for ObjectManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "object_manager_tests.rs"]
mod tests;
