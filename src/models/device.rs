use std::fs;
use std::path::Path;

const SYSFS_BLOCK: &str = "/sys/class/block";

/// The device a `SmartDevice` engine is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceHandle {
    /// Device path passed to smartctl, e.g. `/dev/sda`.
    pub path:        String,
    /// smartctl `-d` hint (`sat`, `nvme`, `megaraid,0`, ...).
    pub device_type: Option<String>,
    pub size_bytes:  u64,
}

impl DeviceHandle {
    pub fn new(path: impl Into<String>, size_bytes: u64) -> Self {
        Self { path: path.into(), device_type: None, size_bytes }
    }

    pub fn with_device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    /// Kernel name without the `/dev/` prefix: `/dev/sda` → `sda`.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Kernel block name after resolving symlinks, so `/dev/disk/by-id/ata-…`
    /// maps to `sda`. Falls back to [`DeviceHandle::name`] when the path
    /// cannot be resolved.
    pub fn kernel_name(&self) -> String {
        fs::canonicalize(&self.path)
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| self.name().to_string())
    }

    /// Build a handle sized from `/sys/class/block/<name>/size` (512-byte sectors).
    /// Size is 0 when sysfs has no entry for the device.
    pub fn probe(path: impl Into<String>) -> Self {
        Self::probe_in(path, Path::new(SYSFS_BLOCK))
    }

    fn probe_in(path: impl Into<String>, sysfs_block: &Path) -> Self {
        let mut handle = Self::new(path, 0);
        handle.size_bytes = read_sysfs_size(sysfs_block, &handle.kernel_name()).unwrap_or(0);
        handle
    }
}

fn read_sysfs_size(sysfs_block: &Path, name: &str) -> Option<u64> {
    let text = fs::read_to_string(sysfs_block.join(name).join("size")).ok()?;
    let sectors: u64 = text.trim().parse().ok()?;
    sectors.checked_mul(512)
}
