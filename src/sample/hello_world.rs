//! Hello World
//!
//! The sample's view contract and its presenter.

use std::sync::Arc;

use anyhow::Result;
use log::{error, info};
#[cfg(test)]
use mockall::automock;
use rode::{CommandTag, Presenter, PresenterCore, PresenterProvider, ViewCommandExecutor, ViewHandle};

/// An exemplary *view* from the MVP architecture.
#[cfg_attr(test, automock)]
pub trait HelloWorldView: Send {
    /// Sets the given *text* as the greeting.
    fn set_hello_world_text(&mut self, text: &str);

    fn show_first_error(&mut self);

    fn clear_first_error(&mut self);

    fn show_second_error(&mut self);

    fn clear_second_error(&mut self);

    /// Shows a transient status line.
    fn set_status(&mut self, status: &str);
}

/// Presenter of the hello world screen.
pub struct HelloWorldPresenter {
    core: PresenterCore<dyn HelloWorldView>,
    greeting: String,
    first_error_set: bool,
    second_error_set: bool,
    ticks: u64,
}

impl HelloWorldPresenter {
    pub fn new(
        greeting: impl Into<String>,
        executor: Arc<dyn ViewCommandExecutor<dyn HelloWorldView>>,
    ) -> Self {
        Self {
            core: PresenterCore::with_executor(executor),
            greeting: greeting.into(),
            first_error_set: false,
            second_error_set: false,
            ticks: 0,
        }
    }

    pub fn on_click_toggle_first(&mut self) -> Result<()> {
        if self.first_error_set {
            self.core
                .send_to_view("first", |view| view.clear_first_error())?;
        } else {
            self.core.send_to_view("first", |view| view.show_first_error())?;
        }
        self.first_error_set = !self.first_error_set;
        Ok(())
    }

    pub fn on_click_toggle_second(&mut self) -> Result<()> {
        if self.second_error_set {
            self.core
                .send_to_view("second", |view| view.clear_second_error())?;
        } else {
            self.core
                .send_to_view("second", |view| view.show_second_error())?;
        }
        self.second_error_set = !self.second_error_set;
        Ok(())
    }

    /// Reports the `tick`-th tick of the presenter's clock.
    ///
    /// Status lines share the `status` tag: one sent while no view is attached
    /// cancels the one still waiting, and a new view gets the latest status.
    pub fn on_tick(&mut self, tick: u64) -> Result<()> {
        self.ticks = tick;
        let status = format!("presenter alive for {} ticks", tick);
        self.core
            .send_to_view("status", move |view| view.set_status(&status))
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Presenter for HelloWorldPresenter {
    type View = dyn HelloWorldView;

    fn core(&self) -> &PresenterCore<Self::View> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PresenterCore<Self::View> {
        &mut self.core
    }

    fn on_create(&mut self) {
        info!("HelloWorldPresenter: onCreate called");
        let greeting = self.greeting.clone();
        if let Err(e) = self
            .core
            .send_to_view(CommandTag::Untagged, move |view| {
                view.set_hello_world_text(&greeting)
            })
        {
            error!("failed to send greeting: {}", e);
        }
    }

    fn on_destroy(&mut self) {
        info!("HelloWorldPresenter: onDestroy called");
    }

    fn on_view_attached(&mut self, view: &ViewHandle<Self::View>) {
        info!("HelloWorldPresenter: onViewAttached called with view {}", view.id());
    }

    fn on_view_detached(&mut self) {
        info!("HelloWorldPresenter: onViewDetached called");
    }
}

/// Builds [`HelloWorldPresenter`]s that deliver their commands through `executor`.
pub struct HelloWorldProvider {
    pub greeting: String,
    pub executor: Arc<dyn ViewCommandExecutor<dyn HelloWorldView>>,
}

impl PresenterProvider for HelloWorldProvider {
    type Presenter = HelloWorldPresenter;

    fn create_presenter(&self) -> HelloWorldPresenter {
        HelloWorldPresenter::new(self.greeting.clone(), self.executor.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use rode::{test_utils::PresenterTestExt, ImmediateExecutor};

    const GREETING: &str = "Hello from the test";

    fn presenter() -> HelloWorldPresenter {
        HelloWorldPresenter::new(GREETING, Arc::new(ImmediateExecutor))
    }

    fn view(setup: impl FnOnce(&mut MockHelloWorldView)) -> ViewHandle<dyn HelloWorldView> {
        let mut mock = MockHelloWorldView::new();
        setup(&mut mock);
        let shared: Arc<Mutex<dyn HelloWorldView>> = Arc::new(Mutex::new(mock));
        ViewHandle::from_shared(shared)
    }

    fn expect_greeting(mock: &mut MockHelloWorldView) {
        mock.expect_set_hello_world_text()
            .withf(|text| text == GREETING)
            .times(1)
            .return_const(());
    }

    #[test]
    fn test_sets_hello_world_text_on_view_attach() {
        let _harness = presenter().test(view(expect_greeting)).unwrap();
    }

    #[test]
    fn test_sets_hello_world_text_on_same_view_only_once() {
        let view = view(expect_greeting);
        let mut harness = presenter().test(view.clone()).unwrap();
        harness.on_lifecycle_stop();
        harness.on_lifecycle_start(view).unwrap();
    }

    #[test]
    fn test_sets_hello_world_text_on_new_view() {
        let mut harness = presenter().test(view(expect_greeting)).unwrap();
        harness.on_lifecycle_stop();
        harness.on_lifecycle_start(view(expect_greeting)).unwrap();
    }

    #[test]
    fn test_toggle_first_error() {
        let view = view(|mock| {
            expect_greeting(mock);
            mock.expect_show_first_error().times(1).return_const(());
            mock.expect_clear_first_error().times(1).return_const(());
        });
        let mut harness = presenter().test(view).unwrap();
        harness.presenter.on_click_toggle_first().unwrap();
        harness.presenter.on_click_toggle_first().unwrap();
    }

    #[test]
    fn test_shown_error_is_replayed_to_new_view() {
        let mut harness = presenter()
            .test(view(|mock| {
                expect_greeting(mock);
                mock.expect_show_second_error().times(1).return_const(());
            }))
            .unwrap();
        harness.presenter.on_click_toggle_second().unwrap();
        harness.on_lifecycle_stop();

        harness
            .on_lifecycle_start(view(|mock| {
                expect_greeting(mock);
                mock.expect_show_second_error().times(1).return_const(());
            }))
            .unwrap();
    }

    #[test]
    fn test_cleared_error_is_not_replayed_to_new_view() {
        let mut harness = presenter()
            .test(view(|mock| {
                expect_greeting(mock);
                mock.expect_show_first_error().times(1).return_const(());
                mock.expect_clear_first_error().times(1).return_const(());
            }))
            .unwrap();
        harness.presenter.on_click_toggle_first().unwrap();
        harness.presenter.on_click_toggle_first().unwrap();
        harness.on_lifecycle_stop();

        harness
            .on_lifecycle_start(view(|mock| {
                expect_greeting(mock);
                mock.expect_show_first_error().never();
                mock.expect_clear_first_error().never();
            }))
            .unwrap();
    }

    #[test]
    fn test_toggles_while_detached_cancel_out() {
        let mut harness = presenter().test(view(expect_greeting)).unwrap();
        harness.on_lifecycle_stop();
        harness.presenter.on_click_toggle_first().unwrap();
        harness.presenter.on_click_toggle_first().unwrap();

        harness
            .on_lifecycle_start(view(|mock| {
                expect_greeting(mock);
                mock.expect_show_first_error().never();
                mock.expect_clear_first_error().never();
            }))
            .unwrap();
    }

    #[test]
    fn test_tick_reaches_attached_view() {
        let mut harness = presenter()
            .test(view(|mock| {
                expect_greeting(mock);
                mock.expect_set_status()
                    .withf(|status| status == "presenter alive for 1 ticks")
                    .times(1)
                    .return_const(());
            }))
            .unwrap();
        harness.presenter.on_tick(1).unwrap();
        assert_eq!(harness.presenter.ticks(), 1);
    }

    #[test]
    fn test_latest_status_is_replayed_to_new_view() {
        let mut harness = presenter()
            .test(view(|mock| {
                expect_greeting(mock);
                mock.expect_set_status().never();
            }))
            .unwrap();
        harness.on_lifecycle_stop();
        harness.presenter.on_tick(1).unwrap();
        harness.presenter.on_tick(2).unwrap();
        harness.presenter.on_tick(3).unwrap();
        assert_eq!(harness.presenter.ticks(), 3);

        // the second tick cancelled the first one while both waited
        harness
            .on_lifecycle_start(view(|mock| {
                expect_greeting(mock);
                mock.expect_set_status()
                    .withf(|status| status == "presenter alive for 3 ticks")
                    .times(1)
                    .return_const(());
            }))
            .unwrap();
    }
}
