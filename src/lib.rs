//! Rode
//!
//! A small Model-View-Presenter runtime. Presenters talk to their view only
//! through [`ViewCommand`](api::command::ViewCommand)s, which are executed
//! right away while a view is attached and remembered otherwise, so a view
//! that attaches later (or a freshly recreated one) is brought up to date.

/// Core utilities shared by every module.
pub mod core {
    /// Custom macros for code simplification.
    pub mod macros;
    /// Identity and shared ownership of attached views.
    pub mod view_handle;
}

/// Trait definitions of the runtime.
pub mod api {
    /// The view command capability.
    pub mod command;
    /// Executors that deliver commands to a view.
    pub mod executor;
    /// Lifecycle events and observers.
    pub mod lifecycle;
    /// Presenter hooks and providers.
    pub mod presenter;
}

/// Implementations of the runtime traits.
pub mod components {
    /// Immediate and UI-thread command executors.
    pub mod executor;
    /// Lifecycle registry and the presenter observer.
    pub mod lifecycle;
    /// Presenter state and lifecycle driving.
    pub mod presenter;
    /// Presenter retention across view recreation.
    pub mod retainer;
    /// History of commands sent to views.
    pub mod store;
}

/// Helpers to drive a presenter's lifecycle from unit tests.
pub mod test_utils;

pub use api::command::{view_command, SharedCommand, ViewCommand};
pub use api::executor::ViewCommandExecutor;
pub use api::lifecycle::{LifecycleEvent, LifecycleObserverApi, LifecycleState};
pub use api::presenter::{Presenter, PresenterProvider, SharedPresenter};
pub use components::executor::{ImmediateExecutor, QueuedExecutor, UiDispatcher};
pub use components::lifecycle::{Lifecycle, PresenterLifecycleObserver};
pub use components::presenter::{PresenterCore, PresenterLifecycle};
pub use components::retainer::PresenterRetainer;
pub use components::store::{CommandId, CommandTag, QueuedCommand, ViewCommandStore};
pub use crate::core::view_handle::{ViewHandle, ViewId};
