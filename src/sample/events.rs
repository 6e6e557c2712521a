//! Sample Events
//!
//! Input events published by the sample's screen.

/// User input on the hello world screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiInputEvent {
    /// The "first error" button was clicked.
    ToggleFirst,
    /// The "second error" button was clicked.
    ToggleSecond,
    /// Throw the screen away and build a new one, keeping the presenter.
    RecreateScreen,
}
