//! Command Executors
//!
//! [`ImmediateExecutor`] runs commands on the calling thread.
//! [`QueuedExecutor`] posts them to a [`UiDispatcher`], which runs them on
//! whatever thread owns the UI, one frame or one `await` at a time.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use log::{error, trace};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::{
    api::{command::SharedCommand, executor::ViewCommandExecutor},
    core::view_handle::ViewHandle,
};

/// Executes commands right away on the current thread, under the view's lock.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateExecutor;

impl<V: ?Sized> ViewCommandExecutor<V> for ImmediateExecutor {
    fn execute(&self, command: SharedCommand<V>, view: &ViewHandle<V>) -> Result<()> {
        view.with(|v| command.execute(v))
    }
}

type Job = Box<dyn FnOnce() -> Result<()> + Send>;
type Waker = Arc<dyn Fn() + Send + Sync>;

/// Posts commands to a [`UiDispatcher`].
#[derive(Clone)]
pub struct QueuedExecutor {
    jobs: UnboundedSender<Job>,
    waker: Option<Waker>,
}

impl QueuedExecutor {
    /// Creates an executor and the dispatcher that runs its commands.
    pub fn channel() -> (Self, UiDispatcher) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                jobs: tx,
                waker: None,
            },
            UiDispatcher { jobs: rx },
        )
    }

    /// Calls `waker` after every posted command, e.g. to request a repaint.
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }
}

impl std::fmt::Debug for QueuedExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedExecutor")
            .field("closed", &self.jobs.is_closed())
            .finish()
    }
}

impl<V: ?Sized + Send + 'static> ViewCommandExecutor<V> for QueuedExecutor {
    fn execute(&self, command: SharedCommand<V>, view: &ViewHandle<V>) -> Result<()> {
        let view = view.clone();
        let job: Job = Box::new(move || view.with(|v| command.execute(v)));
        self.jobs
            .send(job)
            .map_err(|_| anyhow!("ui dispatcher is gone, command dropped"))?;
        if let Some(waker) = &self.waker {
            waker();
        }
        Ok(())
    }
}

/// Runs the commands posted by a [`QueuedExecutor`].
///
/// Owned by the UI thread.
pub struct UiDispatcher {
    jobs: UnboundedReceiver<Job>,
}

impl UiDispatcher {
    /// Runs every command posted so far, without waiting for new ones.
    ///
    /// # Returns
    /// The number of commands that were run.
    pub fn run_pending(&mut self) -> usize {
        let mut count = 0;
        loop {
            match self.jobs.try_recv() {
                Ok(job) => {
                    Self::run_job(job);
                    count += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if count > 0 {
            trace!("dispatched {} view commands", count);
        }
        count
    }

    /// Runs commands as they are posted until every executor is dropped.
    pub async fn run(mut self) {
        while let Some(job) = self.jobs.recv().await {
            Self::run_job(job);
        }
        trace!("all executors dropped, ui dispatcher stops");
    }

    fn run_job(job: Job) {
        if let Err(e) = job() {
            error!("failed to execute view command: {}", e);
        }
    }
}
