use std::sync::LazyLock;
use std::sync::Mutex;

static ENV_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// RAII guard for environment variables. Previous values are restored on drop.
/// Uses a global mutex so tests touching the same variables do not interleave.
pub struct EnvGuard {
    _lock: std::sync::MutexGuard<'static, ()>,
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn new(vars: Vec<(&str, &str)>) -> Self {
        let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let saved = vars
            .iter()
            .map(|(k, v)| {
                let previous = std::env::var(k).ok();
                std::env::set_var(k, v);
                (k.to_string(), previous)
            })
            .collect();
        Self { _lock: lock, saved }
    }

    /// Hold the lock with the given variables removed.
    pub fn unset(keys: Vec<&str>) -> Self {
        let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let saved = keys
            .iter()
            .map(|k| {
                let previous = std::env::var(k).ok();
                std::env::remove_var(k);
                (k.to_string(), previous)
            })
            .collect();
        Self { _lock: lock, saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in &self.saved {
            match previous {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

#[test]
fn test_env_guard_restores_previous_values() {
    const KEY: &str = "ACTIONS_ENV_GUARD_RESTORE_CHECK";
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var(KEY, "original");
    drop(_lock);

    {
        let _unset = EnvGuard::unset(vec![KEY]);
        assert!(std::env::var(KEY).is_err());
    }
    assert_eq!(std::env::var(KEY).as_deref(), Ok("original"));

    {
        let _set = EnvGuard::new(vec![(KEY, "override")]);
        assert_eq!(std::env::var(KEY).as_deref(), Ok("override"));
    }
    assert_eq!(std::env::var(KEY).as_deref(), Ok("original"));

    std::env::remove_var(KEY);
}
