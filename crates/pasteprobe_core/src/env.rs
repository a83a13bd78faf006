//! Process-global environment mutation helpers used by tests.

use std::sync::{Mutex, OnceLock};

/// Process-wide lock serializing tests that touch environment variables.
pub fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Temporarily overrides one environment variable, restoring it on drop.
///
/// Hold [`env_lock`] while an override is alive when tests run in parallel.
pub struct EnvOverride {
    key: String,
    previous: Option<String>,
}

impl EnvOverride {
    pub fn set(key: &str, value: &str) -> Self {
        let guard = Self::capture(key);
        std::env::set_var(key, value);
        guard
    }

    pub fn remove(key: &str) -> Self {
        let guard = Self::capture(key);
        std::env::remove_var(key);
        guard
    }

    fn capture(key: &str) -> Self {
        Self {
            key: key.to_string(),
            previous: std::env::var(key).ok(),
        }
    }
}

impl Drop for EnvOverride {
    fn drop(&mut self) {
        match self.previous.as_deref() {
            Some(previous) => std::env::set_var(&self.key, previous),
            None => std::env::remove_var(&self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{env_lock, EnvOverride};

    #[test]
    fn nested_overrides_unwind_in_order() {
        let _lock = env_lock().lock().expect("env lock");
        let key = "PASTEPROBE_TEST_ENV_OVERRIDE";
        let _baseline = EnvOverride::set(key, "outer");
        {
            let _inner = EnvOverride::remove(key);
            assert!(std::env::var(key).is_err());
        }
        assert_eq!(std::env::var(key).ok().as_deref(), Some("outer"));
    }
}
