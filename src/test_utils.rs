//! Test Utilities
//!
//! Drives the lifecycle of a presenter in unit tests, without a host.
//!
//! ```ignore
//! let mut harness = MyPresenter::default().test(view)?;
//! harness.on_lifecycle_stop();
//! harness.on_lifecycle_start(other_view)?;
//! ```

use std::sync::Arc;

use anyhow::Result;

use crate::{
    api::presenter::Presenter,
    components::{executor::ImmediateExecutor, presenter::PresenterLifecycle},
    core::view_handle::ViewHandle,
};

/// Owns a presenter and mimics the lifecycle events of its host.
///
/// Commands are executed on the current thread.
pub struct PresenterTestHarness<P: Presenter> {
    pub presenter: P,
    pub view: ViewHandle<P::View>,
}

impl<P: Presenter> PresenterTestHarness<P> {
    /// Calls `created` on `presenter` and attaches `view`.
    pub fn new(mut presenter: P, view: ViewHandle<P::View>) -> Result<Self> {
        presenter
            .core_mut()
            .set_executor(Arc::new(ImmediateExecutor));
        presenter.created();
        presenter.attach_view(view.clone())?;
        Ok(Self { presenter, view })
    }

    /// Mimics [`LifecycleEvent::Start`](crate::api::lifecycle::LifecycleEvent::Start)
    /// with `view` as the host's view.
    pub fn on_lifecycle_start(&mut self, view: ViewHandle<P::View>) -> Result<()> {
        self.view = view.clone();
        self.presenter.attach_view(view)
    }

    /// Mimics [`LifecycleEvent::Stop`](crate::api::lifecycle::LifecycleEvent::Stop).
    pub fn on_lifecycle_stop(&mut self) {
        self.presenter.detach_view();
    }

    /// Ends the presenter's life.
    pub fn on_lifecycle_destroy(&mut self) {
        self.presenter.destroy();
    }
}

/// Shortcut to build a [`PresenterTestHarness`] from a presenter.
pub trait PresenterTestExt: Presenter + Sized {
    fn test(self, view: ViewHandle<Self::View>) -> Result<PresenterTestHarness<Self>> {
        PresenterTestHarness::new(self, view)
    }
}

impl<P: Presenter> PresenterTestExt for P {}
