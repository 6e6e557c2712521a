//! View Handles
//!
//! Presenters never own their view. They hold a [`ViewHandle`], a shared and
//! lockable reference tagged with a [`ViewId`] so the command store can tell
//! whether a remembered command already reached a given view.

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lock;

/// Identity of an attached view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(Uuid);

impl ViewId {
    /// Creates a new, unique identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared reference to a view.
///
/// Clones refer to the same view and keep its [`ViewId`].
pub struct ViewHandle<V: ?Sized> {
    id: ViewId,
    view: Arc<Mutex<V>>,
}

impl<V> ViewHandle<V> {
    /// Wraps `view` and assigns it a fresh identity.
    pub fn new(view: V) -> Self {
        Self::from_shared(Arc::new(Mutex::new(view)))
    }
}

impl<V: ?Sized> ViewHandle<V> {
    /// Wraps an already shared view, e.g. an `Arc<Mutex<dyn SomeView>>`.
    ///
    /// Every call assigns a fresh identity, even for the same `Arc`.
    pub fn from_shared(view: Arc<Mutex<V>>) -> Self {
        Self {
            id: ViewId::new(),
            view,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Locks the view and runs `f` against it.
    ///
    /// # Returns
    /// The closure's result, or an error if the view lock is poisoned.
    pub fn with<R>(&self, f: impl FnOnce(&mut V) -> R) -> Result<R> {
        let mut guard = lock!(self.view)?;
        Ok(f(&mut *guard))
    }

    #[cfg(test)]
    pub(crate) fn shared(&self) -> &Arc<Mutex<V>> {
        &self.view
    }
}

impl<V: ?Sized> Clone for ViewHandle<V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            view: self.view.clone(),
        }
    }
}

impl<V: ?Sized> fmt::Debug for ViewHandle<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHandle").field("id", &self.id).finish()
    }
}
