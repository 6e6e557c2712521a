//! Hello World Screen
//!
//! The egui implementation of [`HelloWorldView`]. Presenter commands only change
//! the screen's state; drawing happens in [`ViewApi::render`].

use anyhow::Result;
use egui::Color32;

use super::{config::SampleConfig, events::UiInputEvent, hello_world::HelloWorldView, view_trait::ViewApi};

#[derive(Debug, Default)]
pub struct HelloWorldScreen {
    generation: usize,
    hello_text: String,
    first_error_text: String,
    second_error_text: String,
    first_error: Option<String>,
    second_error: Option<String>,
    status: String,
}

impl HelloWorldScreen {
    /// Creates the `generation`-th screen of the app.
    pub fn new(generation: usize, config: &SampleConfig) -> Self {
        Self {
            generation,
            first_error_text: config.first_error_text.clone(),
            second_error_text: config.second_error_text.clone(),
            ..Default::default()
        }
    }
}

impl HelloWorldView for HelloWorldScreen {
    fn set_hello_world_text(&mut self, text: &str) {
        self.hello_text = text.to_string();
    }

    fn show_first_error(&mut self) {
        self.first_error = Some(self.first_error_text.clone());
    }

    fn clear_first_error(&mut self) {
        self.first_error = None;
    }

    fn show_second_error(&mut self) {
        self.second_error = Some(self.second_error_text.clone());
    }

    fn clear_second_error(&mut self) {
        self.second_error = None;
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

impl ViewApi for HelloWorldScreen {
    fn render<F: Fn(UiInputEvent) + ?Sized>(
        &mut self,
        publish: &F,
        ctx: &egui::Context,
    ) -> Result<()> {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.hello_text);
            ui.label(format!("screen #{}", self.generation));
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Toggle first error").clicked() {
                    publish(UiInputEvent::ToggleFirst);
                }
                if let Some(error) = &self.first_error {
                    ui.colored_label(Color32::RED, error);
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Toggle second error").clicked() {
                    publish(UiInputEvent::ToggleSecond);
                }
                if let Some(error) = &self.second_error {
                    ui.colored_label(Color32::RED, error);
                }
            });

            ui.separator();
            if ui.button("Recreate screen").clicked() {
                publish(UiInputEvent::RecreateScreen);
            }
            ui.small(&self.status);
        });
        Ok(())
    }
}
