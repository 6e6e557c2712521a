//! Lifecycle API
//!
//! Events and observer trait used to tie a presenter to the lifecycle of the
//! screen that hosts its view.

use anyhow::Result;

use crate::core::view_handle::ViewHandle;

/// Lifecycle events emitted by a view host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The view became visible and may receive commands.
    Start,
    /// The view is no longer visible.
    Stop,
    /// The view host is gone for good.
    Destroy,
}

/// States of a [`Lifecycle`](crate::components::lifecycle::Lifecycle).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    Initialized,
    Started,
    Stopped,
    Destroyed,
}

impl LifecycleState {
    /// Returns the state reached by applying `event`, or `None` if the
    /// transition is not allowed.
    pub fn next(self, event: LifecycleEvent) -> Option<Self> {
        match (self, event) {
            (Self::Destroyed, _) => None,
            (_, LifecycleEvent::Destroy) => Some(Self::Destroyed),
            (Self::Started, LifecycleEvent::Start) => None,
            (_, LifecycleEvent::Start) => Some(Self::Started),
            (Self::Started, LifecycleEvent::Stop) => Some(Self::Stopped),
            (_, LifecycleEvent::Stop) => None,
        }
    }
}

/// LifecycleObserverApi trait
///
/// Receives the lifecycle events of a view host together with its view.
pub trait LifecycleObserverApi<V: ?Sized>: Send + Sync {
    /// The host moved to [`LifecycleState::Started`].
    fn on_start(&self, view: &ViewHandle<V>) -> Result<()>;

    /// The host moved to [`LifecycleState::Stopped`].
    fn on_stop(&self) -> Result<()>;

    /// The host is destroyed. The observer gets unregistered right after.
    fn on_destroy(&self) -> Result<()> {
        Ok(())
    }
}
