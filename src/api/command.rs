//! View Command
//!
//! A view command is a unit of deferred behavior: one action to run against a
//! view, handed to whoever currently owns the view instead of touching it
//! directly.

use std::sync::Arc;

/// An action to be executed against a view.
///
/// Closures of the form `Fn(&mut V)` are view commands as well, so most call
/// sites never implement this trait by hand.
pub trait ViewCommand<V: ?Sized>: Send + Sync {
    /// Runs the action against `view`.
    fn execute(&self, view: &mut V);
}

impl<V: ?Sized, F> ViewCommand<V> for F
where
    F: Fn(&mut V) + Send + Sync,
{
    fn execute(&self, view: &mut V) {
        self(view)
    }
}

/// A command that may be executed more than once, e.g. replayed to a new view.
pub type SharedCommand<V> = Arc<dyn ViewCommand<V>>;

/// Wraps a closure into a [`SharedCommand`].
///
/// Spelling the bound as `Fn(&mut V)` lets the compiler infer the closure's
/// argument type, which matters for trait-object views like `dyn SomeView`.
pub fn view_command<V, F>(f: F) -> SharedCommand<V>
where
    V: ?Sized,
    F: Fn(&mut V) + Send + Sync + 'static,
{
    Arc::new(f)
}
