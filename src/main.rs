//! Rode Sample
//!
//! A desktop port of the classic MVP hello world: a presenter toggles two error
//! labels and greets every screen it gets attached to. Recreating the screen
//! shows how remembered view commands are replayed to a new view.

use anyhow::anyhow;
use eframe::NativeOptions;
use env_logger::Env;
use tokio::runtime::Runtime;

use sample::{
    config::{SampleConfig, LOG_LEVEL_ENV, LOG_STYLE_ENV},
    manager::ViewManager,
};

/// The sample application.
mod sample {
    /// Configuration loading.
    pub mod config;
    /// Input events of the screen.
    pub mod events;
    /// View contract and presenter.
    pub mod hello_world;
    /// eframe host of the screen.
    pub mod manager;
    /// egui implementation of the view.
    pub mod screen;
    /// Trait for renderable screens.
    pub mod view_trait;
}

/// Main entry point of the sample.
///
/// Initializes logging, sets up the asynchronous runtime, loads the
/// configuration and starts the eframe application.
fn main() -> anyhow::Result<()> {
    // Initialize logger with environment-specific settings.
    env_logger::Builder::from_env(
        Env::default()
            .filter_or(LOG_LEVEL_ENV, "info")
            .write_style_or(LOG_STYLE_ENV, "always"),
    )
    .init();

    // The presenter's ticker runs on this runtime.
    let rt = Runtime::new()?;
    let _enter = rt.enter();

    let config = rt.block_on(SampleConfig::from_env())?;
    let title = config.title.clone();

    eframe::run_native(
        &title,
        NativeOptions::default(),
        Box::new(|cc| {
            let view_manager = ViewManager::new(config, cc.egui_ctx.clone())?;
            Ok(Box::new(view_manager))
        }),
    )
    .map_err(|e| anyhow!("failed to start eframe application: {}", e))
}
