//! ResourceArc Wrappers
//!
//! Persistent cursor state handed to Elixir. The BEAM may call in from any
//! scheduler, so the cursor sits behind a mutex.

use rustler::ResourceArc;
use std::sync::{Mutex, MutexGuard};

use crate::reader::cursor::Cursor;

/// Wrapper for Cursor that can be stored in a ResourceArc
pub struct CursorResource {
    pub inner: Mutex<Cursor>,
}

impl CursorResource {
    pub fn new() -> Self {
        CursorResource {
            inner: Mutex::new(Cursor::new()),
        }
    }

    /// Lock the cursor
    ///
    /// # Errors
    ///
    /// Returns `"mutex_poisoned"` if a previous call panicked while holding the lock.
    pub fn lock(&self) -> Result<MutexGuard<'_, Cursor>, &'static str> {
        self.inner.lock().map_err(|_| "mutex_poisoned")
    }
}

#[rustler::resource_impl]
impl rustler::Resource for CursorResource {}

impl Default for CursorResource {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for the ResourceArc
pub type CursorRef = ResourceArc<CursorResource>;
