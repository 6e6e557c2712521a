//! Lifecycle
//!
//! [`Lifecycle`] is owned by the screen that hosts a view and forwards its
//! start/stop/destroy events to registered observers.
//! [`PresenterLifecycleObserver`] is the observer that keeps a presenter and
//! attaches or detaches the host's view as the host starts and stops.

use std::{fmt, sync::Arc};

use anyhow::{anyhow, Result};
use log::{debug, error};

use super::presenter::PresenterLifecycle;
use crate::{
    api::{
        lifecycle::{LifecycleEvent, LifecycleObserverApi, LifecycleState},
        presenter::{Presenter, PresenterProvider, SharedPresenter},
    },
    core::view_handle::ViewHandle,
    lock,
};

/// Lifecycle registry of a view host.
pub struct Lifecycle<V: ?Sized> {
    view: ViewHandle<V>,
    state: LifecycleState,
    observers: Vec<Arc<dyn LifecycleObserverApi<V>>>,
}

impl<V: ?Sized> fmt::Debug for Lifecycle<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("view", &self.view)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<V: ?Sized> Lifecycle<V> {
    /// Creates the lifecycle of the host showing `view`.
    pub fn new(view: ViewHandle<V>) -> Self {
        Self {
            view,
            state: LifecycleState::Initialized,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn view(&self) -> &ViewHandle<V> {
        &self.view
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Registers `observer`, unless it is registered already.
    ///
    /// An observer added while the host is started receives `on_start` right
    /// away.
    pub fn add_observer(&mut self, observer: Arc<dyn LifecycleObserverApi<V>>) -> Result<()> {
        if self.state == LifecycleState::Destroyed {
            return Err(anyhow!("cannot observe a destroyed lifecycle"));
        }
        if self.observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            return Ok(());
        }
        if self.state == LifecycleState::Started {
            observer.on_start(&self.view)?;
        }
        self.observers.push(observer);
        Ok(())
    }

    pub fn remove_observer(&mut self, observer: &Arc<dyn LifecycleObserverApi<V>>) {
        self.observers.retain(|o| !Arc::ptr_eq(o, observer));
    }

    /// Moves to the state reached by `event` and notifies every observer.
    ///
    /// All observers are notified even if one fails; the first error is
    /// returned. After [`LifecycleEvent::Destroy`] no observer stays registered.
    /// Destroying a started host stops it first, so observers always see
    /// `on_stop` before `on_destroy`.
    pub fn handle_event(&mut self, event: LifecycleEvent) -> Result<()> {
        if event == LifecycleEvent::Destroy && self.state == LifecycleState::Started {
            let stopped = self.handle_event(LifecycleEvent::Stop);
            let destroyed = self.handle_event(LifecycleEvent::Destroy);
            return stopped.and(destroyed);
        }

        let next = self
            .state
            .next(event)
            .ok_or_else(|| anyhow!("invalid lifecycle event {:?} in state {:?}", event, self.state))?;
        debug!("lifecycle {:?} -> {:?}", self.state, next);
        self.state = next;

        let mut result = Ok(());
        for observer in &self.observers {
            let outcome = match event {
                LifecycleEvent::Start => observer.on_start(&self.view),
                LifecycleEvent::Stop => observer.on_stop(),
                LifecycleEvent::Destroy => observer.on_destroy(),
            };
            if let Err(e) = outcome {
                error!("lifecycle observer failed on {:?}: {}", event, e);
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }

        if event == LifecycleEvent::Destroy {
            self.observers.clear();
        }
        result
    }
}

/// Keeps a presenter for as long as it is observing lifecycles.
///
/// * On start, the host's view gets attached to the presenter.
/// * On stop, the view gets detached.
/// * On destroy, the registration ends; the presenter survives and can be
///   handed to the next host.
pub struct PresenterLifecycleObserver<P: Presenter> {
    presenter: SharedPresenter<P>,
}

impl<P: Presenter> PresenterLifecycleObserver<P> {
    /// Creates the presenter through `provider` and calls its `created` hook.
    pub fn new<PP>(provider: &PP) -> Self
    where
        PP: PresenterProvider<Presenter = P> + ?Sized,
    {
        let mut presenter = provider.create_presenter();
        presenter.created();
        Self {
            presenter: Arc::new(std::sync::Mutex::new(presenter)),
        }
    }

    pub fn presenter(&self) -> &SharedPresenter<P> {
        &self.presenter
    }

    /// Destroys the presenter. Does not unregister from any lifecycle.
    pub fn destroy(&self) -> Result<()> {
        lock!(self.presenter)?.destroy();
        Ok(())
    }
}

impl<P: Presenter> LifecycleObserverApi<P::View> for PresenterLifecycleObserver<P> {
    fn on_start(&self, view: &ViewHandle<P::View>) -> Result<()> {
        lock!(self.presenter)?.attach_view(view.clone())
    }

    fn on_stop(&self) -> Result<()> {
        lock!(self.presenter)?.detach_view();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::presenter::tests::{new_view, shown, MockPresenter, MockView};
    use crate::components::store::CommandTag;
    use mockall::{mock, Sequence};

    struct MockProvider;

    impl PresenterProvider for MockProvider {
        type Presenter = MockPresenter;

        fn create_presenter(&self) -> MockPresenter {
            MockPresenter::default()
        }
    }

    mock! {
        Observer {}
        impl LifecycleObserverApi<dyn MockView> for Observer {
            fn on_start(&self, view: &ViewHandle<dyn MockView>) -> Result<()>;
            fn on_stop(&self) -> Result<()>;
            fn on_destroy(&self) -> Result<()>;
        }
    }

    fn observer(
        provider: &MockProvider,
    ) -> (
        Arc<PresenterLifecycleObserver<MockPresenter>>,
        Arc<dyn LifecycleObserverApi<dyn MockView>>,
    ) {
        let concrete = Arc::new(PresenterLifecycleObserver::new(provider));
        let erased: Arc<dyn LifecycleObserverApi<dyn MockView>> = concrete.clone();
        (concrete, erased)
    }

    #[test]
    fn test_observer_calls_on_create() {
        let (observer, _) = observer(&MockProvider);
        assert!(observer.presenter().lock().unwrap().on_create_called);
    }

    #[test]
    fn test_start_attaches_view() {
        let (_, view) = new_view();
        let mut lifecycle = Lifecycle::new(view.clone());
        let (observer, erased) = observer(&MockProvider);
        lifecycle.add_observer(erased).unwrap();

        lifecycle.handle_event(LifecycleEvent::Start).unwrap();
        let presenter = observer.presenter().lock().unwrap();
        assert_eq!(presenter.core.view().map(|v| v.id()), Some(view.id()));
    }

    #[test]
    fn test_stop_detaches_view() {
        let (_, view) = new_view();
        let mut lifecycle = Lifecycle::new(view);
        let (observer, erased) = observer(&MockProvider);
        lifecycle.add_observer(erased).unwrap();

        lifecycle.handle_event(LifecycleEvent::Start).unwrap();
        lifecycle.handle_event(LifecycleEvent::Stop).unwrap();
        let presenter = observer.presenter().lock().unwrap();
        assert!(presenter.core.view().is_none());
        assert!(presenter.on_view_detached_called);
    }

    #[test]
    fn test_destroy_stops_observing() {
        let (_, view) = new_view();
        let mut lifecycle = Lifecycle::new(view);
        let (observer, erased) = observer(&MockProvider);
        lifecycle.add_observer(erased).unwrap();

        lifecycle.handle_event(LifecycleEvent::Destroy).unwrap();
        assert_eq!(lifecycle.observer_count(), 0);
        // the presenter outlives the lifecycle
        assert!(!observer.presenter().lock().unwrap().on_destroy_called);
        assert!(lifecycle.handle_event(LifecycleEvent::Start).is_err());
    }

    #[test]
    fn test_destroy_while_started_detaches_view() {
        let (recorder, view) = new_view();
        let mut lifecycle = Lifecycle::new(view);
        let (observer, erased) = observer(&MockProvider);
        lifecycle.add_observer(erased).unwrap();

        lifecycle.handle_event(LifecycleEvent::Start).unwrap();
        lifecycle.handle_event(LifecycleEvent::Destroy).unwrap();
        assert_eq!(lifecycle.state(), LifecycleState::Destroyed);

        let mut presenter = observer.presenter().lock().unwrap();
        assert!(!presenter.core.is_view_attached());
        assert!(presenter.on_view_detached_called);

        // nothing reaches the destroyed host's view any more
        presenter
            .core
            .send_to_view(CommandTag::Untagged, |v| v.show("late"))
            .unwrap();
        assert!(shown(&recorder).is_empty());
    }

    #[test]
    fn test_destroy_while_started_stops_observers_first() {
        let (_, view) = new_view();
        let mut lifecycle = Lifecycle::new(view);
        let mut seq = Sequence::new();
        let mut mock = MockObserver::new();
        mock.expect_on_start().times(1).returning(|_| Ok(()));
        mock.expect_on_stop()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        mock.expect_on_destroy()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        lifecycle.add_observer(Arc::new(mock)).unwrap();

        lifecycle.handle_event(LifecycleEvent::Start).unwrap();
        lifecycle.handle_event(LifecycleEvent::Destroy).unwrap();
        assert_eq!(lifecycle.observer_count(), 0);
    }

    #[test]
    fn test_observer_destroy_destroys_presenter() {
        let (observer, _) = observer(&MockProvider);
        observer.destroy().unwrap();
        assert!(observer.presenter().lock().unwrap().on_destroy_called);
    }

    #[test]
    fn test_late_observer_catches_up() {
        let (recorder, view) = new_view();
        let mut lifecycle = Lifecycle::new(view);
        lifecycle.handle_event(LifecycleEvent::Start).unwrap();

        let (observer, erased) = observer(&MockProvider);
        observer
            .presenter()
            .lock()
            .unwrap()
            .core
            .send_to_view(CommandTag::Untagged, |v| v.show("queued"))
            .unwrap();
        lifecycle.add_observer(erased).unwrap();
        assert_eq!(shown(&recorder), vec!["queued"]);
    }

    #[test]
    fn test_add_observer_is_idempotent() {
        let (_, view) = new_view();
        let mut lifecycle = Lifecycle::new(view);
        let mut mock = MockObserver::new();
        mock.expect_on_start().times(1).returning(|_| Ok(()));
        let observer: Arc<dyn LifecycleObserverApi<dyn MockView>> = Arc::new(mock);

        lifecycle.add_observer(observer.clone()).unwrap();
        lifecycle.add_observer(observer.clone()).unwrap();
        assert_eq!(lifecycle.observer_count(), 1);
        lifecycle.handle_event(LifecycleEvent::Start).unwrap();

        lifecycle.remove_observer(&observer);
        assert_eq!(lifecycle.observer_count(), 0);
    }

    #[test]
    fn test_failing_observer_does_not_stop_others() {
        let (_, view) = new_view();
        let mut lifecycle = Lifecycle::new(view);

        let mut failing = MockObserver::new();
        failing
            .expect_on_start()
            .times(1)
            .returning(|_| Err(anyhow!("boom")));
        let mut healthy = MockObserver::new();
        healthy.expect_on_start().times(1).returning(|_| Ok(()));

        lifecycle.add_observer(Arc::new(failing)).unwrap();
        lifecycle.add_observer(Arc::new(healthy)).unwrap();
        assert!(lifecycle.handle_event(LifecycleEvent::Start).is_err());
        assert_eq!(lifecycle.state(), LifecycleState::Started);
    }

    #[test]
    fn test_poisoned_presenter_is_reported() {
        let (observer, erased) = observer(&MockProvider);
        let presenter = observer.presenter().clone();
        let _ = std::thread::spawn(move || {
            let _guard = presenter.lock().unwrap();
            panic!("poison the presenter");
        })
        .join();
        assert!(erased.on_stop().is_err());
    }
}
