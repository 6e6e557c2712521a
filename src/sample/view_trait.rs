//! Sample View Trait
//!
//! This module defines the `ViewApi` trait, implemented by every screen of the sample.

use anyhow::Result;

use super::events::UiInputEvent;

/// Trait defining the interface for renderable screens.
pub trait ViewApi: Send {
    /// Renders the screen.
    ///
    /// # Arguments
    /// * `publish` - A function to publish `UiInputEvent` events.
    /// * `ctx` - The `egui::Context` for rendering the UI.
    fn render<F: Fn(UiInputEvent) + ?Sized>(&mut self, publish: &F, ctx: &egui::Context)
        -> Result<()>;
}
