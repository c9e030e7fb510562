//! Shared Value Module
//!
//! A cloneable handle around an optional payload and a disposal callback.
//! The callback runs exactly once, with the payload, when the last handle
//! is dropped.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::{CacheError, Result};

/// Disposal callback invoked with the payload when the last handle drops.
type DisposeFn<T> = Box<dyn FnOnce(T) + Send>;

// == Shared State ==
/// State shared by every handle cloned from the same allocation.
///
/// The payload is only ever read under the lock, and `Drop` runs only once
/// no handle is left, so disposal can never overlap a live access.
struct Shared<T> {
    state: Mutex<State<T>>,
}

struct State<T> {
    payload: Option<T>,
    dispose: Option<DisposeFn<T>>,
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        // A poisoned lock still disposes; a holder's panic must not leak
        // the payload.
        let state = match self.state.get_mut() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let (Some(payload), Some(dispose)) = (state.payload.take(), state.dispose.take()) {
            dispose(payload);
        }
    }
}

// == Shared Value ==
/// A reference-counted, thread-safe handle to a single shared payload.
///
/// Every clone refers to the same allocation; cloning and dropping are safe
/// from any number of threads. The payload stays alive while any clone
/// exists, and dropping the last clone runs the disposal callback exactly
/// once with the payload.
pub struct SharedValue<T> {
    shared: Arc<Shared<T>>,
}

impl<T> SharedValue<T> {
    // == Constructors ==
    /// Wraps a payload together with the callback that releases it.
    ///
    /// The callback receives the payload by value once the last handle is
    /// dropped. Pass [`drop`] when the payload's own `Drop` is all the
    /// cleanup that is needed.
    pub fn new(payload: T, dispose: impl FnOnce(T) + Send + 'static) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    payload: Some(payload),
                    dispose: Some(Box::new(dispose)),
                }),
            }),
        }
    }

    /// Creates a handle that carries no payload.
    pub fn empty() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    payload: None,
                    dispose: None,
                }),
            }),
        }
    }

    // == Accessors ==
    /// Runs `f` against the payload under the shared lock.
    ///
    /// Returns `Ok(None)` for an empty handle. While `f` runs, no other
    /// thread can read the payload and disposal cannot begin.
    ///
    /// # Errors
    /// [`CacheError::Poisoned`] if a previous holder panicked while the
    /// lock was held.
    pub fn with_value<R>(&self, f: impl FnOnce(&T) -> R) -> Result<Option<R>> {
        let state = self
            .shared
            .state
            .lock()
            .map_err(|_| CacheError::Poisoned)?;
        Ok(state.payload.as_ref().map(f))
    }

    /// Returns a clone of the payload, if one is present.
    pub fn value(&self) -> Result<Option<T>>
    where
        T: Clone,
    {
        self.with_value(|payload| payload.clone())
    }

    /// Checks whether the handle carries a readable payload.
    ///
    /// A poisoned lock reads as "no value", matching how an unreadable
    /// payload behaves everywhere else.
    pub fn has_value(&self) -> bool {
        self.with_value(|_| ()).map(|v| v.is_some()).unwrap_or(false)
    }

    /// Number of live handles sharing this allocation.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.shared)
    }
}

impl<T> Clone for SharedValue<T> {
    /// Returns a new handle to the same allocation, incrementing the
    /// shared reference count.
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for SharedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedValue")
            .field("has_value", &self.has_value())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}
