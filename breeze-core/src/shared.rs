//! Reference-counted process-wide shared resources.
//!
//! Some resources are too heavy to give every channel its own copy (the
//! timer thread, most prominently). A [`SharedResource`] describes one
//! such resource kind: how to create the process-wide singleton and how
//! to dispose of it once the last holder lets go. Holders pair every
//! [`acquire`](SharedResource::acquire) with exactly one
//! [`release`](SharedResource::release).
//!
//! Disposal runs as soon as the reference count reaches zero; a later
//! `acquire` simply creates a fresh instance.

use std::sync::Arc;

use parking_lot::Mutex;

/// A shared resource kind and its singleton slot.
///
/// Declared as a `static` so every holder in the process sees the same
/// slot:
///
/// ```rust
/// use breeze_core::SharedResource;
///
/// static SCRATCH: SharedResource<Vec<u8>> =
///     SharedResource::new("scratch", || vec![0; 64], |_| {});
///
/// let buf = SCRATCH.acquire();
/// assert_eq!(buf.len(), 64);
/// SCRATCH.release(buf);
/// ```
pub struct SharedResource<R> {
    name: &'static str,
    create: fn() -> R,
    dispose: fn(&R),
    slot: Mutex<Option<Slot<R>>>,
}

struct Slot<R> {
    instance: Arc<R>,
    refs: usize,
}

impl<R> SharedResource<R> {
    /// Define a resource kind.
    ///
    /// `create` builds the singleton on first acquire and runs under the
    /// slot lock, so each generation is created exactly once. `dispose`
    /// tears the instance down after the last release, outside the lock.
    #[must_use]
    pub const fn new(name: &'static str, create: fn() -> R, dispose: fn(&R)) -> Self {
        Self {
            name,
            create,
            dispose,
            slot: Mutex::new(None),
        }
    }

    /// Name of this resource kind, for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Take a reference to the shared instance, creating it if this is
    /// the first outstanding reference.
    #[must_use]
    pub fn acquire(&self) -> Arc<R> {
        let mut slot = self.slot.lock();
        match slot.as_mut() {
            Some(held) => {
                held.refs += 1;
                tracing::trace!(resource = self.name, refs = held.refs, "shared resource acquired");
                held.instance.clone()
            }
            None => {
                let instance = Arc::new((self.create)());
                *slot = Some(Slot {
                    instance: instance.clone(),
                    refs: 1,
                });
                tracing::debug!(resource = self.name, "shared resource created");
                instance
            }
        }
    }

    /// Give back a reference obtained from [`acquire`](Self::acquire).
    ///
    /// Passing an instance that is not the shared one, or releasing when
    /// nothing is held, is a caller bug: it is logged and ignored so the
    /// slot stays consistent for other holders.
    pub fn release(&self, instance: Arc<R>) {
        let mut slot = self.slot.lock();

        let last = match slot.as_mut() {
            None => {
                tracing::error!(resource = self.name, "release without an outstanding acquire");
                return;
            }
            Some(held) => {
                if !Arc::ptr_eq(&held.instance, &instance) {
                    tracing::error!(
                        resource = self.name,
                        "released instance is not the shared one"
                    );
                    return;
                }
                held.refs -= 1;
                if held.refs > 0 {
                    tracing::trace!(
                        resource = self.name,
                        refs = held.refs,
                        "shared resource released"
                    );
                }
                held.refs == 0
            }
        };

        if !last {
            return;
        }

        // Last reference gone: empty the slot first, then dispose outside
        // the lock. An acquire racing in sees the empty slot and creates a
        // fresh instance.
        let taken = slot.take();
        drop(slot);
        if let Some(held) = taken {
            tracing::debug!(resource = self.name, "shared resource disposed");
            (self.dispose)(&held.instance);
        }
    }

    /// Current number of outstanding references (0 when the slot is
    /// empty).
    #[must_use]
    pub fn ref_count(&self) -> usize {
        self.slot.lock().as_ref().map_or(0, |held| held.refs)
    }
}
