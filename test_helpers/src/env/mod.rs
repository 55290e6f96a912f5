//! Guards for mutating process environment variables in tests.
//!
//! Every mutation takes a global re-entrant lock, records the previous
//! value, and returns an [`EnvVarGuard`] that puts it back on drop. Guards
//! for the same key restore in LIFO order. Tests that must see a stable
//! environment across several operations hold an [`EnvScope`], which keeps
//! the lock for its whole lifetime.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _scope = env::set_vars([("DB_HOST", "localhost"), ("DB_PORT", "5432")]);
//! assert_eq!(std::env::var("DB_HOST").ok().as_deref(), Some("localhost"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_set_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_remove_var(key: &str) {
    unsafe { env::remove_var(key) };
}

fn mutate_locked<F>(key: String, mutator: F, _guard: &ReentrantMutexGuard<'static, ()>) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// Restores one environment variable to its prior state on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        if let Some(value) = self.original.take() {
            // SAFETY: `ENV_MUTEX` is held.
            unsafe { env_set_var(&self.key, &value) };
        } else {
            // SAFETY: `ENV_MUTEX` is held.
            unsafe { env_remove_var(&self.key) };
        }
    }
}

/// Holds the global environment lock for its lifetime.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Set `key` while holding the lock.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        mutate_locked(
            key.into(),
            // SAFETY: the lock is held by `self`.
            |k| unsafe { env_set_var(k, value.as_ref()) },
            &self.guard,
        )
    }

    /// Remove `key` while holding the lock.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        // SAFETY: the lock is held by `self`.
        mutate_locked(key.into(), |k| unsafe { env_remove_var(k) }, &self.guard)
    }
}

/// Keeps the environment lock and a set of guards alive together.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    _lock: EnvVarLock,
    guards: Vec<EnvVarGuard>,
}

impl EnvScope {
    /// Build a scope by running `builder` under the lock.
    pub fn new_with<F>(builder: F) -> Self
    where
        F: FnOnce(&EnvVarLock) -> Vec<EnvVarGuard>,
    {
        let held = lock();
        let guards = builder(&held);
        Self {
            _lock: held,
            guards,
        }
    }

    /// Number of variables the scope restores on drop.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.guards.len()
    }

    /// Returns `true` when the scope guards no variables.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore in reverse so repeated keys unwind to their first original.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

/// Set `key` to `value`, restoring the prior value when the guard drops.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
///
/// let _g = env::set_var("CASCADE_HELPER_DOC", "on");
/// assert_eq!(std::env::var("CASCADE_HELPER_DOC").ok().as_deref(), Some("on"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    lock().set_var(key, value)
}

/// Remove `key`, restoring the prior value when the guard drops.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    lock().remove_var(key)
}

/// Set every `(key, value)` pair and hold the lock until the scope drops.
pub fn set_vars<I, K, V>(vars: I) -> EnvScope
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    EnvScope::new_with(|held| {
        vars.into_iter()
            .map(|(key, value)| held.set_var(key, value))
            .collect()
    })
}

/// Remove every variable whose name starts with `prefix` and hold the lock
/// until the scope drops.
///
/// Used to isolate loads from variables leaking in from the host.
pub fn clear_prefix(prefix: &str) -> EnvScope {
    EnvScope::new_with(|held| {
        env::vars_os()
            .filter_map(|(key, _)| key.into_string().ok())
            .filter(|key| key.starts_with(prefix))
            .map(|key| held.remove_var(key))
            .collect()
    })
}

/// Acquire the global environment lock.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        guard: ENV_MUTEX.lock(),
    }
}

#[cfg(test)]
mod tests;
