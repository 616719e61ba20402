use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Prefix of every lock name; the device path is appended.
pub const GATE_COMPONENT: &str = "smartdiag.smartctl:";

static GLOBAL_GATE: Lazy<Arc<ExecutionGate>> = Lazy::new(|| Arc::new(ExecutionGate::new()));

/// Keyed lock registry allowing one smartctl run per device path at a time.
///
/// Concurrent runs against one ATA device bump the device's own error
/// counters, so callers for the same path queue up; distinct paths never
/// contend.
#[derive(Debug, Default)]
pub struct ExecutionGate {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ExecutionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry shared by engines that were not given their own.
    pub fn global() -> Arc<ExecutionGate> {
        Arc::clone(&GLOBAL_GATE)
    }

    pub fn lock_name(device_path: &str) -> String {
        format!("{}{}", GATE_COMPONENT, device_path)
    }

    fn lock_for(&self, device_path: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        Arc::clone(locks.entry(Self::lock_name(device_path)).or_default())
    }

    /// Run `body` while holding the lock for `device_path`. Blocks without a
    /// timeout; the lock is released when `body` returns or unwinds.
    pub fn with_exclusive_access<T>(&self, device_path: &str, body: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(device_path);
        let _guard = lock.lock();
        body()
    }
}
