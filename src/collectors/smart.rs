use crate::collectors::gate::ExecutionGate;
use crate::collectors::runner::{render_command, CommandRunner, SystemRunner};
use crate::collectors::smart_cache::FetchCache;
use crate::error::{Result, SmartError};
use crate::health::overall;
use crate::models::device::DeviceHandle;
use crate::models::smart::{
    AssessmentVerdict, AttributeRecord, InfoKind, InformationMap, PowerStats, SelfTestLogEntry,
};
use crate::parsers::{attributes, information, self_test};
use crate::resolvers::{power, temperature};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Exit status bits of smartctl (see `man smartctl`, RETURN VALUES).
pub mod exit_status {
    /// Command line did not parse.
    pub const COMMAND_LINE: u8 = 0x01;
    /// Device open failed, or it did not return an IDENTIFY structure.
    pub const DEVICE_OPEN:  u8 = 0x02;
    /// Bits that invalidate the captured output.
    pub const FATAL_MASK:   u8 = COMMAND_LINE | DEVICE_OPEN;

    pub fn is_fatal(status: u8) -> bool {
        status & FATAL_MASK != 0
    }
}

pub const DEFAULT_SMARTCTL: &str = "smartctl";

/// smartctl arguments for one run, device path last.
pub fn build_args(
    kind:        InfoKind,
    nocheck:     Option<&str>,
    device_type: Option<&str>,
    device_path: &str,
) -> Vec<String> {
    let mut args: Vec<String> = match kind {
        InfoKind::All     => vec!["-x".into()],
        InfoKind::Default => ["-A", "-f", "brief", "-i", "-H", "-l", "selftest"]
            .into_iter()
            .map(String::from)
            .collect(),
    };
    if let Some(policy) = nocheck {
        args.push("-n".into());
        args.push(policy.into());
    }
    if let Some(t) = device_type {
        args.push("-d".into());
        args.push(t.into());
    }
    args.push(device_path.into());
    args
}

/// SMART engine bound to one device. Owns its output cache; runs of smartctl
/// are serialized per device path through the shared [`ExecutionGate`].
pub struct SmartDevice {
    device:   DeviceHandle,
    smartctl: String,
    nocheck:  Option<String>,
    runner:   Arc<dyn CommandRunner>,
    gate:     Arc<ExecutionGate>,
    cache:    FetchCache,
}

impl std::fmt::Debug for SmartDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartDevice")
            .field("device", &self.device)
            .field("smartctl", &self.smartctl)
            .field("nocheck", &self.nocheck)
            .field("cached", &self.cache.kind())
            .finish()
    }
}

impl SmartDevice {
    pub fn new(device: DeviceHandle) -> Self {
        Self {
            device,
            smartctl: DEFAULT_SMARTCTL.to_string(),
            nocheck:  None,
            runner:   Arc::new(SystemRunner),
            gate:     ExecutionGate::global(),
            cache:    FetchCache::default(),
        }
    }

    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_gate(mut self, gate: Arc<ExecutionGate>) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_smartctl(mut self, program: impl Into<String>) -> Self {
        self.smartctl = program.into();
        self
    }

    /// `-n <policy>` for every run, e.g. `standby` to avoid spinning up a sleeping disk.
    pub fn with_nocheck(mut self, policy: Option<String>) -> Self {
        self.nocheck = policy;
        self
    }

    pub fn device(&self) -> &DeviceHandle {
        &self.device
    }

    /// Which kind of output is cached, if any.
    pub fn cached_kind(&self) -> Option<InfoKind> {
        self.cache.kind()
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Raw output for `kind`, using the engine's no-check policy and the
    /// device's type hint.
    pub fn fetch(&mut self, kind: InfoKind) -> Result<&[String]> {
        let nocheck = self.nocheck.clone();
        let device_type = self.device.device_type.clone();
        self.fetch_with(kind, nocheck.as_deref(), device_type.as_deref())
    }

    /// Raw output for `kind`. A compatible cached result is returned without
    /// running smartctl again.
    pub fn fetch_with(
        &mut self,
        kind:        InfoKind,
        nocheck:     Option<&str>,
        device_type: Option<&str>,
    ) -> Result<&[String]> {
        if self.cache.lookup(kind).is_some() {
            debug!(device = %self.device.path, ?kind, "using cached smartctl output");
        } else {
            let lines = self.execute(kind, nocheck, device_type)?;
            self.cache.store(kind, lines);
        }
        Ok(self.cache.lookup(kind).unwrap_or(&[]))
    }

    /// Drop the cache and run smartctl again.
    pub fn refresh(&mut self, kind: InfoKind) -> Result<&[String]> {
        self.cache.clear();
        self.fetch(kind)
    }

    fn execute(
        &self,
        kind:        InfoKind,
        nocheck:     Option<&str>,
        device_type: Option<&str>,
    ) -> Result<Vec<String>> {
        let args = build_args(kind, nocheck, device_type, &self.device.path);
        let command = render_command(&self.smartctl, &args);
        debug!(device = %self.device.path, %command, "running smartctl");

        let output = self
            .gate
            .with_exclusive_access(&self.device.path, || self.runner.run(&self.smartctl, &args))?;

        if exit_status::is_fatal(output.status) {
            return Err(SmartError::Execution {
                command,
                output: output.lines,
                status: output.status,
            });
        }
        if output.status != 0 {
            warn!(
                device = %self.device.path,
                status = output.status,
                "smartctl reported a non-fatal status; output accepted"
            );
        }
        Ok(output.lines)
    }

    // ── Parsed views ─────────────────────────────────────────────────

    pub fn attributes(&mut self) -> Result<Vec<AttributeRecord>> {
        Ok(attributes::parse_attributes(self.fetch(InfoKind::Default)?))
    }

    /// First attribute with `id`, `None` if the table has no such row.
    pub fn attribute(&mut self, id: u32) -> Result<Option<AttributeRecord>> {
        Ok(self.attributes()?.into_iter().find(|a| a.id == id))
    }

    pub fn information(&mut self) -> Result<InformationMap> {
        Ok(information::parse_information(self.fetch(InfoKind::Default)?))
    }

    pub fn self_test_log(&mut self) -> Result<Vec<SelfTestLogEntry>> {
        Ok(self_test::parse_self_test_log(self.fetch(InfoKind::Default)?))
    }

    /// Full `-x` report as text.
    pub fn extended_information(&mut self) -> Result<String> {
        Ok(self.fetch(InfoKind::All)?.join("\n"))
    }

    // ── Derived values ───────────────────────────────────────────────

    /// Drive temperature in °C, `None` when the output has no usable reading.
    pub fn temperature(&mut self) -> Result<Option<i32>> {
        let lines = self.fetch(InfoKind::Default)?;
        let attrs = attributes::parse_attributes(lines);
        Ok(temperature::resolve(&attrs, lines))
    }

    pub fn temperature_or(&mut self, default: i32) -> Result<i32> {
        Ok(self.temperature()?.unwrap_or(default))
    }

    pub fn power_stats(&mut self) -> Result<PowerStats> {
        let lines = self.fetch(InfoKind::Default)?;
        let attrs = attributes::parse_attributes(lines);
        let info = information::parse_information(lines);
        Ok(power::power_stats(&attrs, &info))
    }

    /// Current power mode. Never fails: a failed smartctl run yields `"ERROR"`.
    pub fn power_mode(&mut self) -> String {
        let device = self.device.path.clone();
        match self.fetch(InfoKind::Default) {
            Ok(lines) => {
                let info = information::parse_information(lines);
                power::power_mode(&info, lines)
            }
            Err(e) => {
                error!(%device, error = %e, "failed to read power mode");
                power::POWER_MODE_ERROR.to_string()
            }
        }
    }

    /// Device-level health verdict.
    pub fn overall_status(&mut self) -> Result<AssessmentVerdict> {
        let size_bytes = self.device.size_bytes;
        if overall::sector_threshold(size_bytes).is_none() {
            warn!(
                device = %self.device.path,
                size_bytes,
                "device size unknown; bad-sector count rule skipped"
            );
        }
        let lines = self.fetch(InfoKind::Default)?;
        let attrs = attributes::parse_attributes(lines);
        Ok(overall::evaluate(&attrs, lines, size_bytes))
    }

    /// False only when smartctl reports the device lacks SMART capability.
    pub fn is_supported(&mut self) -> Result<bool> {
        let lines = self.fetch(InfoKind::Default)?;
        let info = information::parse_information(lines);
        Ok(match info.get("smartsupportis") {
            Some(v) => !v.to_lowercase().starts_with("unavailable"),
            None    => overall::has_health_line(lines),
        })
    }

    pub fn is_enabled(&mut self) -> Result<bool> {
        let lines = self.fetch(InfoKind::Default)?;
        let info = information::parse_information(lines);
        Ok(match info.get("smartsupportis") {
            Some(v) => v.to_lowercase().starts_with("enabled"),
            None    => overall::has_health_line(lines),
        })
    }
}
