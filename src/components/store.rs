//! View Command Store
//!
//! Keeps the commands a presenter sent to its views, together with the view
//! each command was delivered to. Commands that never reached a view, or only
//! reached a different one, are handed out again when a view attaches.

use std::{collections::VecDeque, fmt};

use log::trace;

use crate::{api::command::SharedCommand, core::view_handle::ViewId};

/// Groups commands in the store.
///
/// Commands with the same [`CommandTag::Named`] tag are exclusive: think of
/// `show_error` / `clear_error` pairs, where only the latest one matters to a
/// view that attaches later.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CommandTag {
    /// Remembered for the lifetime of the presenter and replayed to every new view.
    #[default]
    Untagged,
    /// Delivered to exactly one view, then forgotten.
    Once,
    /// Remembered, but replaced by the next command with the same name.
    Named(String),
}

impl From<&str> for CommandTag {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for CommandTag {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// Identifier of a command stored in a [`ViewCommandStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(u64);

/// A stored command together with its delivery state.
struct StoredCommand<V: ?Sized> {
    id: CommandId,
    tag: CommandTag,
    command: SharedCommand<V>,
    sent_to: Option<ViewId>,
}

impl<V: ?Sized> StoredCommand<V> {
    fn is_sent(&self) -> bool {
        self.sent_to.is_some()
    }
}

/// A command waiting to be delivered to a view.
pub struct QueuedCommand<V: ?Sized> {
    pub id: CommandId,
    pub tag: CommandTag,
    pub command: SharedCommand<V>,
}

impl<V: ?Sized> fmt::Debug for QueuedCommand<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedCommand")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .finish()
    }
}

/// History of commands sent to the views of one presenter, in FIFO order.
pub struct ViewCommandStore<V: ?Sized> {
    history: VecDeque<StoredCommand<V>>,
    next_id: u64,
}

impl<V: ?Sized> Default for ViewCommandStore<V> {
    fn default() -> Self {
        Self {
            history: VecDeque::new(),
            next_id: 0,
        }
    }
}

impl<V: ?Sized> fmt::Debug for ViewCommandStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewCommandStore")
            .field("len", &self.history.len())
            .finish()
    }
}

impl<V: ?Sized> ViewCommandStore<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `command` to the end of the history.
    ///
    /// For a [`CommandTag::Named`] tag the first stored command with the same
    /// tag is looked up. If it is still waiting for a view, both cancel each
    /// other out: the waiting command is removed and nothing is stored. If it
    /// was already sent, the new command is stored and both are dropped from
    /// the history once the new one reaches the same view.
    ///
    /// # Returns
    /// The id of the stored command, or `None` if nothing was stored.
    pub fn enqueue(&mut self, tag: CommandTag, command: SharedCommand<V>) -> Option<CommandId> {
        if let CommandTag::Named(_) = tag {
            let waiting = self
                .history
                .iter()
                .position(|stored| stored.tag == tag)
                .filter(|&idx| !self.history[idx].is_sent());
            if let Some(idx) = waiting {
                trace!("{:?} cancels the waiting command with the same tag", tag);
                self.history.remove(idx);
                return None;
            }
        }

        let id = CommandId(self.next_id);
        self.next_id += 1;
        self.history.push_back(StoredCommand {
            id,
            tag,
            command,
            sent_to: None,
        });
        Some(id)
    }

    /// Returns the commands to deliver to `view`.
    ///
    /// These are all commands that were never sent, plus those that were sent
    /// to a view other than `view`, in the order they were enqueued.
    pub fn queued_commands(&self, view: ViewId) -> Vec<QueuedCommand<V>> {
        self.history
            .iter()
            .filter(|stored| stored.sent_to != Some(view))
            .map(|stored| QueuedCommand {
                id: stored.id,
                tag: stored.tag.clone(),
                command: stored.command.clone(),
            })
            .collect()
    }

    /// Marks the commands identified by `sent` as delivered to `view`.
    ///
    /// * [`CommandTag::Once`] commands are removed from the history.
    /// * [`CommandTag::Untagged`] commands are kept.
    /// * A [`CommandTag::Named`] command is removed together with the first
    ///   other command of the same tag, if that one was sent as well.
    pub fn notify_sent(&mut self, sent: &[CommandId], view: ViewId) {
        for &id in sent {
            let Some(idx) = self.position(id) else {
                continue;
            };
            self.history[idx].sent_to = Some(view);

            match self.history[idx].tag {
                CommandTag::Once => {
                    self.history.remove(idx);
                }
                CommandTag::Untagged => {}
                CommandTag::Named(_) => {
                    let tag = &self.history[idx].tag;
                    let other = self
                        .history
                        .iter()
                        .position(|stored| stored.id != id && &stored.tag == tag);
                    if let Some(other) = other.filter(|&o| self.history[o].is_sent()) {
                        trace!("{:?} superseded, dropping both from history", tag);
                        // remove the later index first so the earlier one stays valid
                        let (first, second) = (idx.min(other), idx.max(other));
                        self.history.remove(second);
                        self.history.remove(first);
                    }
                }
            }
        }
    }

    /// Returns the view the command `id` was last delivered to, if any.
    ///
    /// `None` if the command is still waiting or no longer in the history.
    pub fn sent_to(&self, id: CommandId) -> Option<ViewId> {
        self.position(id)
            .and_then(|idx| self.history[idx].sent_to)
    }

    pub fn contains(&self, id: CommandId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Drops the whole history.
    pub fn dispose(&mut self) {
        self.history.clear();
    }

    fn position(&self, id: CommandId) -> Option<usize> {
        self.history.iter().position(|stored| stored.id == id)
    }
}
