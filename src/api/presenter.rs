//! Presenter API
//!
//! This module defines the traits implemented by application presenters and by
//! whoever creates them.

use std::sync::{Arc, Mutex};

use crate::{components::presenter::PresenterCore, core::view_handle::ViewHandle};

/// Presenter trait
///
/// Base of every *presenter* in the MVP architecture. A presenter owns a
/// [`PresenterCore`] that tracks the attached *view* and remembers the commands
/// sent to it. The hooks below are called by
/// [`PresenterLifecycle`](crate::components::presenter::PresenterLifecycle);
/// all of them default to doing nothing.
pub trait Presenter: Send + 'static {
    /// The type of the *view* this presenter instructs, usually `dyn SomeView`.
    type View: ?Sized + Send + 'static;

    fn core(&self) -> &PresenterCore<Self::View>;

    fn core_mut(&mut self) -> &mut PresenterCore<Self::View>;

    /// Called right after this instance has been created.
    fn on_create(&mut self) {}

    /// Called when this instance is no longer needed. Stop any ongoing work that
    /// still refers to the presenter here.
    fn on_destroy(&mut self) {}

    /// Called after a *view* got attached and received its queued commands.
    fn on_view_attached(&mut self, _view: &ViewHandle<Self::View>) {}

    /// Called when the *view* got removed from this presenter.
    fn on_view_detached(&mut self) {}
}

/// A presenter shared between its lifecycle observer and the application.
pub type SharedPresenter<P> = Arc<Mutex<P>>;

/// PresenterProvider trait
///
/// Implemented by the component that knows how to build a presenter,
/// typically the screen hosting the view.
pub trait PresenterProvider {
    type Presenter: Presenter;

    /// Returns a new presenter instance.
    fn create_presenter(&self) -> Self::Presenter;
}
