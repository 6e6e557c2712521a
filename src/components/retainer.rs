//! Presenter Retainer
//!
//! Hosts come and go (a window gets rebuilt, a screen gets recreated), the
//! presenter should not. A [`PresenterRetainer`] lives outside the host, creates
//! the presenter the first time it is asked and hands the same instance to every
//! later host, until it is cleared.

use std::{fmt, sync::Arc};

use anyhow::Result;
use log::{debug, error};

use super::lifecycle::{Lifecycle, PresenterLifecycleObserver};
use crate::api::{
    lifecycle::LifecycleObserverApi,
    presenter::{Presenter, PresenterProvider, SharedPresenter},
};

/// Provides a stateful presenter that is only destroyed once [`clear`](Self::clear)
/// is called (or the retainer is dropped).
pub struct PresenterRetainer<P: Presenter> {
    observer: Option<Arc<PresenterLifecycleObserver<P>>>,
}

impl<P: Presenter> Default for PresenterRetainer<P> {
    fn default() -> Self {
        Self { observer: None }
    }
}

impl<P: Presenter> fmt::Debug for PresenterRetainer<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterRetainer")
            .field("retains_presenter", &self.observer.is_some())
            .finish()
    }
}

impl<P: Presenter> PresenterRetainer<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provides the presenter and ties it to `lifecycle`.
    ///
    /// On the first call `provider` is asked to create the presenter. Later
    /// calls return the same instance and do not touch `provider`.
    pub fn provide_presenter<PP>(
        &mut self,
        provider: &PP,
        lifecycle: &mut Lifecycle<P::View>,
    ) -> Result<SharedPresenter<P>>
    where
        PP: PresenterProvider<Presenter = P> + ?Sized,
    {
        let observer = self
            .observer
            .get_or_insert_with(|| {
                debug!("creating presenter");
                Arc::new(PresenterLifecycleObserver::new(provider))
            })
            .clone();
        let presenter = observer.presenter().clone();
        let erased: Arc<dyn LifecycleObserverApi<P::View>> = observer;
        lifecycle.add_observer(erased)?;
        Ok(presenter)
    }

    /// The retained presenter, if one was provided.
    pub fn presenter(&self) -> Option<SharedPresenter<P>> {
        self.observer.as_ref().map(|o| o.presenter().clone())
    }

    /// Destroys the presenter and forgets it.
    pub fn clear(&mut self) -> Result<()> {
        match self.observer.take() {
            Some(observer) => observer.destroy(),
            None => Ok(()),
        }
    }
}

impl<P: Presenter> Drop for PresenterRetainer<P> {
    fn drop(&mut self) {
        if let Err(e) = self.clear() {
            error!("failed to destroy retained presenter: {}", e);
        }
    }
}
