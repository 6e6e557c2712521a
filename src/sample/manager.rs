//! View Manager
//!
//! Hosts the hello world screen inside eframe: runs the presenter's commands on
//! the UI thread, renders the screen, forwards input to the presenter and
//! rebuilds the screen on request while the presenter lives on.

use std::{
    cell::RefCell,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Result;
use eframe::App;
use log::{error, info, warn};
use rode::{
    Lifecycle, LifecycleEvent, LifecycleState, PresenterRetainer, QueuedExecutor, SharedPresenter,
    UiDispatcher, ViewHandle,
};
use tokio::task::JoinHandle;

use super::{
    config::SampleConfig,
    events::UiInputEvent,
    hello_world::{HelloWorldPresenter, HelloWorldProvider, HelloWorldView},
    screen::HelloWorldScreen,
    view_trait::ViewApi,
};

pub struct ViewManager {
    config: SampleConfig,
    dispatcher: UiDispatcher,
    provider: HelloWorldProvider,
    retainer: PresenterRetainer<HelloWorldPresenter>,
    presenter: SharedPresenter<HelloWorldPresenter>,
    screen: Arc<Mutex<HelloWorldScreen>>,
    lifecycle: Lifecycle<dyn HelloWorldView>,
    generation: usize,
    ticker: JoinHandle<()>,
}

impl ViewManager {
    /// Creates the first screen and starts it.
    ///
    /// Must be called within a tokio runtime.
    pub fn new(config: SampleConfig, gui_ctx: egui::Context) -> Result<Self> {
        let (executor, dispatcher) = QueuedExecutor::channel();
        let executor = executor.with_waker(move || gui_ctx.request_repaint());
        let provider = HelloWorldProvider {
            greeting: config.greeting.clone(),
            executor: Arc::new(executor),
        };

        let mut retainer = PresenterRetainer::new();
        let (screen, mut lifecycle) = Self::build_screen(1, &config);
        let presenter = retainer.provide_presenter(&provider, &mut lifecycle)?;
        lifecycle.handle_event(LifecycleEvent::Start)?;

        let ticker = Self::spawn_ticker(
            presenter.clone(),
            Duration::from_millis(config.tick_interval_ms.max(1)),
        );

        Ok(Self {
            config,
            dispatcher,
            provider,
            retainer,
            presenter,
            screen,
            lifecycle,
            generation: 1,
            ticker,
        })
    }

    fn build_screen(
        generation: usize,
        config: &SampleConfig,
    ) -> (Arc<Mutex<HelloWorldScreen>>, Lifecycle<dyn HelloWorldView>) {
        let screen = Arc::new(Mutex::new(HelloWorldScreen::new(generation, config)));
        let view: Arc<Mutex<dyn HelloWorldView>> = screen.clone();
        (screen, Lifecycle::new(ViewHandle::from_shared(view)))
    }

    fn spawn_ticker(presenter: SharedPresenter<HelloWorldPresenter>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            let mut tick = 0;
            loop {
                interval.tick().await;
                tick += 1;
                match presenter.lock() {
                    Ok(mut presenter) => {
                        if let Err(e) = presenter.on_tick(tick) {
                            warn!("tick not delivered: {}", e);
                        }
                    }
                    Err(e) => {
                        error!("presenter lock poisoned, ticker stops: {}", e);
                        break;
                    }
                }
            }
        })
    }

    /// Tears the current screen down and shows a new one, keeping the presenter.
    fn recreate_screen(&mut self) -> Result<()> {
        self.lifecycle.handle_event(LifecycleEvent::Stop)?;
        self.lifecycle.handle_event(LifecycleEvent::Destroy)?;

        self.generation += 1;
        info!("recreating screen, generation {}", self.generation);
        let (screen, mut lifecycle) = Self::build_screen(self.generation, &self.config);
        self.presenter = self
            .retainer
            .provide_presenter(&self.provider, &mut lifecycle)?;
        lifecycle.handle_event(LifecycleEvent::Start)?;
        info!(
            "screen {} replaces view {}",
            lifecycle.view().id(),
            self.lifecycle.view().id()
        );
        self.screen = screen;
        self.lifecycle = lifecycle;
        Ok(())
    }

    fn handle_event(&mut self, event: UiInputEvent) -> Result<()> {
        match event {
            UiInputEvent::ToggleFirst => rode::lock!(self.presenter)?.on_click_toggle_first(),
            UiInputEvent::ToggleSecond => rode::lock!(self.presenter)?.on_click_toggle_second(),
            UiInputEvent::RecreateScreen => self.recreate_screen(),
        }
    }
}

impl App for ViewManager {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.config.pixels_per_point);
        self.dispatcher.run_pending();

        let events = RefCell::new(Vec::new());
        let rendered = match self.screen.lock() {
            Ok(mut screen) => screen.render(&|e| events.borrow_mut().push(e), ctx),
            Err(e) => Err(anyhow::anyhow!("screen lock poisoned: {}", e)),
        };
        if let Err(e) = rendered {
            error!("view failed to render: {}", e);
        }

        for event in events.into_inner() {
            if let Err(e) = self.handle_event(event) {
                error!("failed to handle {:?}: {}", event, e);
            }
        }
    }
}

impl Drop for ViewManager {
    fn drop(&mut self) {
        self.ticker.abort();
        if self.lifecycle.state() == LifecycleState::Started {
            if let Err(e) = self.lifecycle.handle_event(LifecycleEvent::Stop) {
                error!("failed to stop screen: {}", e);
            }
        }
        if let Err(e) = self.retainer.clear() {
            error!("failed to destroy presenter: {}", e);
        }
    }
}
