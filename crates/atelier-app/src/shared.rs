//! Shared, lockable state.
//!
//! Stores are shared between the app root and its controllers. Locks are
//! only ever held for synchronous reads and writes, never across an
//! `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A store shared between the app and its controllers.
pub type Shared<T> = Arc<Mutex<T>>;

pub(crate) fn shared<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}

/// Lock, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
