//! Presenter Core
//!
//! State every presenter carries (attached view, command history and executor)
//! plus the blanket [`PresenterLifecycle`] that drives the hooks of a
//! [`Presenter`].

use std::{fmt, sync::Arc};

use anyhow::Result;
use log::{debug, trace};

use super::{
    executor::ImmediateExecutor,
    store::{CommandTag, ViewCommandStore},
};
use crate::{
    api::{
        command::SharedCommand,
        executor::ViewCommandExecutor,
        presenter::Presenter,
    },
    core::view_handle::ViewHandle,
};

/// Keeps the reference to the *view* of a presenter and the commands sent to it.
pub struct PresenterCore<V: ?Sized> {
    view: Option<ViewHandle<V>>,
    store: ViewCommandStore<V>,
    executor: Arc<dyn ViewCommandExecutor<V>>,
}

impl<V: ?Sized + 'static> Default for PresenterCore<V> {
    fn default() -> Self {
        Self::with_executor(Arc::new(ImmediateExecutor))
    }
}

impl<V: ?Sized> fmt::Debug for PresenterCore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterCore")
            .field("view", &self.view)
            .field("store", &self.store)
            .finish()
    }
}

impl<V: ?Sized + 'static> PresenterCore<V> {
    /// Creates a core that executes commands on the calling thread.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: ?Sized> PresenterCore<V> {
    pub fn with_executor(executor: Arc<dyn ViewCommandExecutor<V>>) -> Self {
        Self {
            view: None,
            store: ViewCommandStore::new(),
            executor,
        }
    }

    pub fn set_executor(&mut self, executor: Arc<dyn ViewCommandExecutor<V>>) {
        self.executor = executor;
    }

    /// The *view* currently attached, if any.
    pub fn view(&self) -> Option<&ViewHandle<V>> {
        self.view.as_ref()
    }

    pub fn is_view_attached(&self) -> bool {
        self.view.is_some()
    }

    pub fn store(&self) -> &ViewCommandStore<V> {
        &self.store
    }

    /// Sends `command` to the *view*, once.
    ///
    /// If a *view* is attached the command is executed right away, otherwise
    /// it runs as soon as the next *view* attaches and is forgotten after that.
    pub fn send_to_view_once<F>(&mut self, command: F) -> Result<()>
    where
        F: Fn(&mut V) + Send + Sync + 'static,
    {
        self.send_command_once(Arc::new(command))
    }

    /// Sends `command` to the *view* and remembers it for the lifetime of the
    /// presenter.
    ///
    /// If a *view* is attached the command is executed right away, otherwise
    /// it runs as soon as a *view* attaches. Every *view* attached later
    /// receives it as well.
    ///
    /// Commands sharing a [`CommandTag::Named`] tag are exclusive. With
    /// `show_error` and `clear_error` sent under the same tag, `clear_error`
    /// erases `show_error` from the history and a new *view* receives neither.
    /// [`CommandTag::Once`] behaves like [`send_to_view_once`](Self::send_to_view_once).
    pub fn send_to_view<F>(&mut self, tag: impl Into<CommandTag>, command: F) -> Result<()>
    where
        F: Fn(&mut V) + Send + Sync + 'static,
    {
        self.send_command(tag, Arc::new(command))
    }

    /// [`send_to_view_once`](Self::send_to_view_once) for an existing
    /// [`ViewCommand`](crate::api::command::ViewCommand).
    pub fn send_command_once(&mut self, command: SharedCommand<V>) -> Result<()> {
        match &self.view {
            Some(view) => self.executor.execute(command, view),
            None => {
                trace!("no view attached, queueing one-shot command");
                self.store.enqueue(CommandTag::Once, command);
                Ok(())
            }
        }
    }

    /// [`send_to_view`](Self::send_to_view) for an existing
    /// [`ViewCommand`](crate::api::command::ViewCommand).
    pub fn send_command(
        &mut self,
        tag: impl Into<CommandTag>,
        command: SharedCommand<V>,
    ) -> Result<()> {
        let tag = tag.into();
        if tag == CommandTag::Once {
            return self.send_command_once(command);
        }

        let stored = self.store.enqueue(tag, command.clone());
        if let Some(view) = &self.view {
            self.executor.execute(command, view)?;
            if let Some(id) = stored {
                self.store.notify_sent(&[id], view.id());
            }
        }
        Ok(())
    }

    /// Attaches `view` and delivers every command queued for it.
    ///
    /// If a command cannot be delivered, `view` is detached again. Commands
    /// delivered before the failing one are still marked as sent.
    pub(crate) fn bind(&mut self, view: ViewHandle<V>) -> Result<()> {
        let queued = self.store.queued_commands(view.id());
        debug!("attaching view {}, {} commands queued", view.id(), queued.len());
        self.view = Some(view.clone());

        let mut sent = Vec::with_capacity(queued.len());
        let mut result = Ok(());
        for entry in queued {
            if let Err(e) = self.executor.execute(entry.command, &view) {
                result = Err(e);
                break;
            }
            sent.push(entry.id);
        }
        self.store.notify_sent(&sent, view.id());
        if result.is_err() {
            debug!("replay to view {} failed, detaching it", view.id());
            self.view = None;
        }
        result
    }

    /// Drops the reference to the *view*.
    ///
    /// # Returns
    /// `true` if a *view* was attached before.
    pub(crate) fn unbind(&mut self) -> bool {
        self.view.take().is_some()
    }

    pub(crate) fn dispose(&mut self) {
        self.store.dispose();
    }
}

/// Drives the hooks of a [`Presenter`].
///
/// Implemented for every presenter; called by the lifecycle observer, the
/// test harness, or by hand when a host has no lifecycle of its own.
pub trait PresenterLifecycle: Presenter {
    /// The presenter was just created.
    fn created(&mut self);

    /// Attaches `view`, replacing any attached one.
    ///
    /// The previous *view* is detached first, then the queued commands are
    /// delivered to `view`, then [`Presenter::on_view_attached`] is called.
    /// If the delivery fails, no *view* stays attached and neither hook runs
    /// for `view`.
    fn attach_view(&mut self, view: ViewHandle<Self::View>) -> Result<()>;

    /// Detaches the current *view*.
    ///
    /// [`Presenter::on_view_detached`] is only called if a *view* was attached.
    fn detach_view(&mut self);

    /// The presenter is no longer needed: detaches the *view*, drops the
    /// command history and calls [`Presenter::on_destroy`].
    fn destroy(&mut self);
}

impl<P: Presenter> PresenterLifecycle for P {
    fn created(&mut self) {
        self.on_create();
    }

    fn attach_view(&mut self, view: ViewHandle<Self::View>) -> Result<()> {
        self.detach_view();
        self.core_mut().bind(view.clone())?;
        self.on_view_attached(&view);
        Ok(())
    }

    fn detach_view(&mut self) {
        if self.core_mut().unbind() {
            self.on_view_detached();
        }
    }

    fn destroy(&mut self) {
        self.detach_view();
        self.core_mut().dispose();
        self.on_destroy();
    }
}
