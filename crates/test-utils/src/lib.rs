//! Shared test utilities for chatterbox crates.
//!
//! clap reads `CHATTERBOX_*` variables from the process environment, so
//! tests that exercise those fallbacks have to change it. [`ScopedEnv`]
//! serializes such tests and puts every touched variable back afterwards.

use std::sync::{LazyLock, Mutex, MutexGuard};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Exclusive, self-restoring view of the process environment.
///
/// Holding a `ScopedEnv` blocks other tests from creating one. On drop the
/// original values are restored in reverse order and the lock is released.
///
/// ```
/// use chatterbox_test_utils::ScopedEnv;
///
/// let mut env = ScopedEnv::cleared(&["CHATTERBOX_API_ENDPOINT"]);
/// env.set("CHATTERBOX_API_KEY", "test-key");
/// assert!(std::env::var("CHATTERBOX_API_ENDPOINT").is_err());
/// assert_eq!(std::env::var("CHATTERBOX_API_KEY").as_deref(), Ok("test-key"));
/// ```
pub struct ScopedEnv {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    /// Takes the lock without touching any variable.
    pub fn new() -> Self {
        Self {
            saved: Vec::new(),
            _lock: ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner()),
        }
    }

    /// Takes the lock and unsets every variable in `keys`.
    pub fn cleared(keys: &[&'static str]) -> Self {
        let mut env = Self::new();
        for key in keys {
            env.remove(key);
        }
        env
    }

    pub fn set(&mut self, key: &'static str, value: &str) -> &mut Self {
        self.save(key);
        std::env::set_var(key, value);
        self
    }

    pub fn remove(&mut self, key: &'static str) -> &mut Self {
        self.save(key);
        std::env::remove_var(key);
        self
    }

    fn save(&mut self, key: &'static str) {
        self.saved.push((key, std::env::var(key).ok()));
    }
}

impl Default for ScopedEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}
