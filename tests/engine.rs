mod common;

use assert_matches::assert_matches;
use common::{capture_warnings, FakeRunner, ATA_DEFAULT, SAS_DEFAULT};
use smartdiag::{
    AssessmentVerdict, DeviceHandle, ExecutionGate, InfoKind, SelfTestKind, SmartDevice,
    SmartError,
};
use std::sync::Arc;

const ONE_TB: u64 = 1_000_204_886_016;

fn engine(runner: Arc<FakeRunner>, path: &str) -> SmartDevice {
    SmartDevice::new(DeviceHandle::new(path, ONE_TB))
        .with_runner(runner)
        .with_gate(Arc::new(ExecutionGate::new()))
}

// ── Cache ────────────────────────────────────────────────────────────

#[test]
fn test_queries_share_one_run() {
    let runner = FakeRunner::new(0, ATA_DEFAULT);
    let mut dev = engine(runner.clone(), "/dev/sda");

    assert_eq!(dev.attributes().unwrap().len(), 6);
    assert_eq!(dev.information().unwrap().get("serialnumber"), Some("WD-WCC6Y0RXXXXX"));
    assert_eq!(dev.self_test_log().unwrap().len(), 2);
    assert_eq!(dev.temperature().unwrap(), Some(34));
    assert_eq!(runner.call_count(), 1);
    assert_eq!(dev.cached_kind(), Some(InfoKind::Default));
}

#[test]
fn test_all_answers_later_default_request() {
    let runner = FakeRunner::new(0, ATA_DEFAULT);
    let mut dev = engine(runner.clone(), "/dev/sda");

    dev.extended_information().unwrap();
    dev.attributes().unwrap();
    assert_eq!(runner.call_count(), 1);
    assert_eq!(runner.calls()[0], vec!["-x", "/dev/sda"]);
    assert_eq!(dev.cached_kind(), Some(InfoKind::All));
}

#[test]
fn test_default_then_all_runs_again() {
    let runner = FakeRunner::new(0, ATA_DEFAULT);
    let mut dev = engine(runner.clone(), "/dev/sda");

    dev.attributes().unwrap();
    dev.extended_information().unwrap();
    assert_eq!(runner.call_count(), 2);
    assert_eq!(runner.calls()[1][0], "-x");
    assert_eq!(dev.cached_kind(), Some(InfoKind::All));
}

#[test]
fn test_refresh_runs_again() {
    let runner = FakeRunner::new(0, ATA_DEFAULT);
    let mut dev = engine(runner.clone(), "/dev/sda");

    dev.fetch(InfoKind::Default).unwrap();
    dev.refresh(InfoKind::Default).unwrap();
    assert_eq!(runner.call_count(), 2);
}

#[test]
fn test_failed_run_leaves_cache_empty() {
    let runner = FakeRunner::new(0x02, "Smartctl open device: /dev/sdz failed: No such device");
    let mut dev = engine(runner.clone(), "/dev/sdz");

    assert!(dev.attributes().is_err());
    assert!(dev.attributes().is_err());
    assert_eq!(dev.cached_kind(), None);
    assert_eq!(runner.call_count(), 2);
}

// ── Arguments ────────────────────────────────────────────────────────

#[test]
fn test_nocheck_and_type_hint_reach_smartctl() {
    let runner = FakeRunner::new(0, ATA_DEFAULT);
    let handle = DeviceHandle::new("/dev/sdb", ONE_TB).with_device_type("sat");
    let mut dev = SmartDevice::new(handle)
        .with_runner(runner.clone())
        .with_gate(Arc::new(ExecutionGate::new()))
        .with_nocheck(Some("standby".into()));

    dev.attributes().unwrap();
    assert_eq!(
        runner.calls()[0],
        vec!["-A", "-f", "brief", "-i", "-H", "-l", "selftest", "-n", "standby", "-d", "sat", "/dev/sdb"]
    );
}

#[test]
fn test_fetch_with_overrides() {
    let runner = FakeRunner::new(0, ATA_DEFAULT);
    let mut dev = engine(runner.clone(), "/dev/sda");

    dev.fetch_with(InfoKind::All, Some("idle"), Some("nvme")).unwrap();
    assert_eq!(runner.calls()[0], vec!["-x", "-n", "idle", "-d", "nvme", "/dev/sda"]);
}

// ── Exit status ──────────────────────────────────────────────────────

#[test]
fn test_fatal_status_is_execution_error() {
    let runner = FakeRunner::new(0x01, "smartctl: invalid option");
    let mut dev = engine(runner, "/dev/sda");

    let err = dev.fetch(InfoKind::Default).unwrap_err();
    assert_matches!(err, SmartError::Execution { status: 0x01, ref output, .. }
        if output == &vec!["smartctl: invalid option".to_string()]);
}

#[test]
fn test_non_fatal_status_output_is_used() {
    // 0x04 checksum error, 0x08 disk failing
    let runner = FakeRunner::new(0x04 | 0x08, ATA_DEFAULT);
    let mut dev = engine(runner, "/dev/sda");

    assert_eq!(dev.attributes().unwrap().len(), 6);
    assert_eq!(dev.overall_status().unwrap(), AssessmentVerdict::Good);
}

#[test]
fn test_spawn_failure_propagates() {
    let mut dev = engine(FakeRunner::unspawnable(), "/dev/sda");
    assert_matches!(dev.information(), Err(SmartError::Spawn { .. }));
}

// ── Queries ──────────────────────────────────────────────────────────

#[test]
fn test_ata_queries() {
    let mut dev = engine(FakeRunner::new(0, ATA_DEFAULT), "/dev/sda");

    let info = dev.information().unwrap();
    assert_eq!(info.get("devicemodel"), Some("WDC WD10EZEX-08WN4A0"));
    assert_eq!(info.get("smartsupportis"), Some("Enabled"));

    let stats = dev.power_stats().unwrap();
    assert_eq!(stats.power_cycles, 412);
    assert_eq!(stats.power_on_hours, 9123);
    assert_eq!(dev.power_mode(), "ACTIVE or IDLE");

    let log = dev.self_test_log().unwrap();
    assert_eq!(log[1].description, SelfTestKind::ExtendedOffline);
    assert_eq!(log[1].status, "Completed: read failure");
    assert_eq!(log[1].remaining_percent, 90);
    assert_eq!(log[1].lba_of_first_error, "123456");

    let realloc = dev.attribute(5).unwrap().unwrap();
    assert!(realloc.is_prefailure);
    assert_eq!(realloc.threshold, 140);
    assert!(!realloc.description.is_empty());
    assert!(dev.attribute(231).unwrap().is_none());

    assert!(dev.is_supported().unwrap());
    assert!(dev.is_enabled().unwrap());
    assert_eq!(dev.overall_status().unwrap(), AssessmentVerdict::Good);
}

#[test]
fn test_sas_device_without_attribute_table() {
    let mut dev = engine(FakeRunner::new(0, SAS_DEFAULT), "/dev/sdc");

    assert!(dev.attributes().unwrap().is_empty());
    assert_eq!(dev.temperature().unwrap(), Some(32));
    assert_eq!(dev.overall_status().unwrap(), AssessmentVerdict::Good);
    assert_eq!(dev.information().unwrap().get("product"), Some("ST4000NM0023"));
    assert!(dev.is_supported().unwrap());

    let stats = dev.power_stats().unwrap();
    assert_eq!((stats.power_cycles, stats.power_on_hours), (-1, -1));
    assert_eq!(dev.power_mode(), "UNKNOWN");
}

#[test]
fn test_failed_health_line_without_table() {
    let text = "=== START OF READ SMART DATA SECTION ===\nSMART Health Status: FAILURE PREDICTION THRESHOLD EXCEEDED\n";
    let mut dev = engine(FakeRunner::new(0, text), "/dev/sdd");
    assert_eq!(dev.overall_status().unwrap(), AssessmentVerdict::BadStatus);
}

#[test]
fn test_pending_sectors_flag_device() {
    let text = ATA_DEFAULT.replace(
        "197 Current_Pending_Sector  -O--CK   200   200   000    -    0",
        "197 Current_Pending_Sector  -O--CK   200   200   000    -    8",
    );
    let mut dev = engine(FakeRunner::new(0, &text), "/dev/sda");
    assert_eq!(dev.overall_status().unwrap(), AssessmentVerdict::BadSector);
}

#[test]
fn test_many_bad_sectors_on_small_disk() {
    let text = ATA_DEFAULT.replace(
        "  5 Reallocated_Sector_Ct   PO--CK   200   200   140    -    0",
        "  5 Reallocated_Sector_Ct   PO--CK   200   200   140    -    30000",
    );
    let mut dev = engine(FakeRunner::new(0, &text), "/dev/sda");
    assert_eq!(dev.overall_status().unwrap(), AssessmentVerdict::BadSectorMany);
}

#[test]
fn test_unknown_size_skips_many_sectors_rule_with_warning() {
    let text = ATA_DEFAULT.replace(
        "  5 Reallocated_Sector_Ct   PO--CK   200   200   140    -    0",
        "  5 Reallocated_Sector_Ct   PO--CK   200   200   140    -    90000",
    );
    let runner = FakeRunner::new(0, &text);
    let mut dev = SmartDevice::new(DeviceHandle::new("/dev/sda", 0))
        .with_runner(runner)
        .with_gate(Arc::new(ExecutionGate::new()));

    let (verdict, logs) = capture_warnings(|| dev.overall_status().unwrap());
    assert_eq!(verdict, AssessmentVerdict::BadSector);
    assert!(logs.contains("bad-sector count rule skipped"), "logs: {logs}");
}

#[test]
fn test_known_size_does_not_warn_about_sector_rule() {
    let mut dev = engine(FakeRunner::new(0, ATA_DEFAULT), "/dev/sda");
    let (verdict, logs) = capture_warnings(|| dev.overall_status().unwrap());
    assert_eq!(verdict, AssessmentVerdict::Good);
    assert!(!logs.contains("bad-sector count rule skipped"));
}

#[test]
fn test_temperature_or_default() {
    let mut dev = engine(FakeRunner::new(0, "=== START OF INFORMATION SECTION ===\n"), "/dev/sde");
    assert_eq!(dev.temperature_or(-1).unwrap(), -1);
}

#[test]
fn test_extended_information_joins_lines() {
    let mut dev = engine(FakeRunner::new(0, "line one\nline two"), "/dev/sda");
    assert_eq!(dev.extended_information().unwrap(), "line one\nline two");
}

// ── Power mode ───────────────────────────────────────────────────────

#[test]
fn test_power_mode_error_on_failed_run() {
    let mut dev = engine(FakeRunner::new(0x02, "Device is in STANDBY mode, exit(2)"), "/dev/sda");
    assert_eq!(dev.power_mode(), "ERROR");
}

#[test]
fn test_power_mode_from_accepted_standby_run() {
    let text = "smartctl 7.3 2022-02-28 r5338 [x86_64-linux-6.1.0] (local build)\n\nDevice is in STANDBY mode, exit(0)\n";
    let mut dev = engine(FakeRunner::new(0, text), "/dev/sda").with_nocheck(Some("standby,0".into()));
    assert_eq!(dev.power_mode(), "STANDBY");
}

// ── Report ───────────────────────────────────────────────────────────

#[test]
fn test_report_snapshot_serializes() {
    let runner = FakeRunner::new(0, ATA_DEFAULT);
    let mut dev = engine(runner.clone(), "/dev/sda");

    let snapshot = smartdiag::util::report::collect(&mut dev).unwrap();
    assert_eq!(runner.call_count(), 1);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["verdict"], "GOOD");
    assert_eq!(json["temperature"], 34);
    assert_eq!(json["information"]["devicemodel"], "WDC WD10EZEX-08WN4A0");
    assert_eq!(json["attributes"][1]["id"], 5);
    assert_eq!(json["self_tests"][0]["description"], "Short offline");
    assert_eq!(json["power"]["power_on_hours"], 9123);

    let text = smartdiag::util::report::generate(&snapshot);
    assert!(text.contains("Health:      GOOD"));
}
