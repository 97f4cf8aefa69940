//! Shared handle that can be captured by state callbacks
//!
//! A [`StateManager`] borrowed mutably cannot be reached from its own
//! callbacks. A callback that needs to hold on to the manager captures a
//! [`WeakStateManager`] instead. Any call it makes through that handle while
//! its own transition is running, reads included, is rejected with
//! [`Error::ReentrantTransition`] rather than deadlocking or corrupting the
//! transition in progress. Calls from other threads wait for the transition
//! to finish.

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError, Weak};
use std::thread::{self, ThreadId};

use crate::{Error, Result, StateManager, Stateful};

#[derive(Debug, Default)]
struct Inner {
    manager: Mutex<StateManager>,
    // Thread currently holding `manager`
    holder: Mutex<Option<ThreadId>>,
}

impl Inner {
    fn set_holder(&self, holder: Option<ThreadId>) {
        *self.holder.lock().unwrap_or_else(PoisonError::into_inner) = holder;
    }

    fn held_by(&self, id: ThreadId) -> bool {
        *self.holder.lock().unwrap_or_else(PoisonError::into_inner) == Some(id)
    }
}

/// Exclusive access to the manager; clears the holder on drop
struct Held<'a> {
    inner: &'a Inner,
    guard: MutexGuard<'a, StateManager>,
}

impl Deref for Held<'_> {
    type Target = StateManager;

    fn deref(&self) -> &StateManager {
        &self.guard
    }
}

impl DerefMut for Held<'_> {
    fn deref_mut(&mut self) -> &mut StateManager {
        &mut self.guard
    }
}

impl Drop for Held<'_> {
    fn drop(&mut self) {
        self.inner.set_holder(None);
    }
}

/// Cloneable handle to a [`StateManager`] that can be shared across threads
#[derive(Debug, Clone, Default)]
pub struct SharedStateManager {
    inner: Arc<Inner>,
}

/// Non-owning handle, safe to store inside a state's own callbacks
#[derive(Debug, Clone, Default)]
pub struct WeakStateManager {
    inner: Weak<Inner>,
}

impl From<StateManager> for SharedStateManager {
    fn from(manager: StateManager) -> Self {
        Self {
            inner: Arc::new(Inner {
                manager: Mutex::new(manager),
                holder: Mutex::new(None),
            }),
        }
    }
}

impl SharedStateManager {
    /// Wrap a new, empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle that does not keep the manager alive
    pub fn downgrade(&self) -> WeakStateManager {
        WeakStateManager {
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn lock(&self, path: &str) -> Result<Held<'_>> {
        let current = thread::current().id();
        let guard = match self.inner.manager.try_lock() {
            Ok(guard) => guard,
            // A callback panicked mid-transition; the tree itself is still intact
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) if self.inner.held_by(current) => {
                tracing::warn!(path = %path, "rejected call during transition");
                return Err(Error::ReentrantTransition {
                    path: path.to_owned(),
                });
            }
            Err(TryLockError::WouldBlock) => self
                .inner
                .manager
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        };
        self.inner.set_holder(Some(current));
        Ok(Held {
            inner: &self.inner,
            guard,
        })
    }

    /// See [`StateManager::register_state`]
    pub fn register_state<T>(&self, path: &str, context: T) -> Result<()>
    where
        T: Stateful + 'static,
    {
        self.lock(path)?.register_state(path, context)
    }

    /// See [`StateManager::change_state`]
    pub fn change_state(&self, path: &str) -> Result<()> {
        self.lock(path)?.change_state(path)
    }

    /// See [`StateManager::force_change_state`]
    pub fn force_change_state(&self, path: &str) -> Result<()> {
        self.lock(path)?.force_change_state(path)
    }

    /// See [`StateManager::current_state`]
    pub fn current_state(&self) -> Result<String> {
        Ok(self.lock("")?.current_state())
    }

    /// Run `func` with exclusive access to the manager
    pub fn with<R>(&self, func: impl FnOnce(&mut StateManager) -> R) -> Result<R> {
        let mut held = self.lock("")?;
        Ok(func(&mut *held))
    }
}

impl WeakStateManager {
    /// Upgrade to a strong handle if the manager is still alive
    pub fn upgrade(&self) -> Option<SharedStateManager> {
        self.inner
            .upgrade()
            .map(|inner| SharedStateManager { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StateContext;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_shared_transitions() {
        let shared = SharedStateManager::new();
        shared.register_state("a", ()).unwrap();
        shared.register_state("a.b", ()).unwrap();

        let other = shared.clone();
        other.change_state("a.b").unwrap();

        assert_eq!(shared.current_state().unwrap(), "a.b");
        assert_eq!(shared.with(|manager| manager.len()).unwrap(), 2);
    }

    #[test]
    fn test_reentrant_change_is_rejected() {
        let shared = SharedStateManager::new();
        let weak = shared.downgrade();
        let outcome = Arc::new(Mutex::new(None));
        let seen = Arc::clone(&outcome);

        shared
            .register_state(
                "a",
                StateContext::new().with_enter(move |_| {
                    if let Some(manager) = weak.upgrade() {
                        *seen.lock().unwrap() = Some(manager.change_state("b"));
                    }
                }),
            )
            .unwrap();
        shared.register_state("b", ()).unwrap();

        shared.change_state("a").unwrap();

        assert_eq!(
            *outcome.lock().unwrap(),
            Some(Err(Error::ReentrantTransition {
                path: "b".to_string()
            }))
        );
        // The outer transition completed untouched
        assert_eq!(shared.current_state().unwrap(), "a");
    }

    #[test]
    fn test_with_gives_mutable_access() {
        let shared = SharedStateManager::new();
        shared
            .with(|manager| manager.register_state("idle", ()))
            .unwrap()
            .unwrap();
        shared.change_state("idle").unwrap();

        let state = shared.with(|manager| manager.current_state()).unwrap();
        assert_eq!(state, "idle");
    }

    #[test]
    fn test_other_thread_waits_for_transition() {
        let shared = SharedStateManager::new();
        shared.register_state("a", ()).unwrap();

        let (started, ready) = mpsc::channel();
        let other = shared.clone();
        let worker = thread::spawn(move || {
            other
                .with(|_| {
                    started.send(()).unwrap();
                    thread::sleep(Duration::from_millis(100));
                })
                .unwrap();
        });

        ready.recv().unwrap();
        // Blocks until the worker releases the manager instead of failing
        shared.change_state("a").unwrap();
        worker.join().unwrap();

        assert_eq!(shared.current_state().unwrap(), "a");
    }

    #[test]
    fn test_weak_handle_outlived() {
        let weak = SharedStateManager::new().downgrade();
        assert!(weak.upgrade().is_none());
    }
}
