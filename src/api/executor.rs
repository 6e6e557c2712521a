//! Executor API
//!
//! This module defines how a presenter hands a [`ViewCommand`](super::command::ViewCommand)
//! over to the view. The presenter decides *what* to send, the executor decides
//! *where* (which thread) and *when* it runs.

use anyhow::Result;

use super::command::SharedCommand;
use crate::core::view_handle::ViewHandle;

/// ViewCommandExecutor trait
///
/// Delivers commands to a view.
pub trait ViewCommandExecutor<V: ?Sized>: Send + Sync {
    /// Executes `command` against `view`, now or at a later point.
    ///
    /// # Returns
    /// An error if the command could not be delivered; failures inside the
    /// command itself are not reported here.
    fn execute(&self, command: SharedCommand<V>, view: &ViewHandle<V>) -> Result<()>;
}
