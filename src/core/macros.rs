//! Core Macros
//!
//! This module defines utility macros used throughout the runtime.

/// `lock` macro.
///
/// Locks a `std::sync::Mutex` and turns a poisoned lock into an `anyhow::Error`,
/// so a panic inside one view command does not cascade into every later caller.
#[macro_export]
macro_rules! lock {
    ($mutex:expr) => {
        $mutex
            .lock()
            .map_err(|e| ::anyhow::anyhow!("lock poisoned: {}", e))
    };
}
