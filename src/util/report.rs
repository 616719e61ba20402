use crate::collectors::smart::SmartDevice;
use crate::error::Result;
use crate::models::smart::{
    AssessmentVerdict, AttributeRecord, InformationMap, PowerStats, SelfTestLogEntry,
};
use crate::util::human::{fmt_bytes, fmt_counter, fmt_temp};
use serde::Serialize;

/// Everything the engine knows about one device, from a single smartctl run.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub device:      String,
    pub size_bytes:  u64,
    pub supported:   bool,
    pub enabled:     bool,
    pub verdict:     AssessmentVerdict,
    pub temperature: Option<i32>,
    pub power:       PowerStats,
    pub power_mode:  String,
    pub information: InformationMap,
    pub attributes:  Vec<AttributeRecord>,
    pub self_tests:  Vec<SelfTestLogEntry>,
}

/// Query every view of `dev`. The engine's cache keeps this to one run.
pub fn collect(dev: &mut SmartDevice) -> Result<DeviceReport> {
    Ok(DeviceReport {
        device:      dev.device().path.clone(),
        size_bytes:  dev.device().size_bytes,
        supported:   dev.is_supported()?,
        enabled:     dev.is_enabled()?,
        verdict:     dev.overall_status()?,
        temperature: dev.temperature()?,
        power:       dev.power_stats()?,
        power_mode:  dev.power_mode(),
        information: dev.information()?,
        attributes:  dev.attributes()?,
        self_tests:  dev.self_test_log()?,
    })
}

/// Generate a human-readable health report to a String.
pub fn generate(report: &DeviceReport) -> String {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    render(report, &now)
}

fn render(report: &DeviceReport, stamp: &str) -> String {
    let info = &report.information;
    let mut out = String::new();

    out.push_str("═══════════════════════════════════════════════\n");
    out.push_str(&format!("  smartdiag report: {}  ({})\n", report.device, stamp));
    out.push_str("═══════════════════════════════════════════════\n\n");

    // ── Summary ────────────────────────────────────────────────────────
    out.push_str("── Summary ────────────────────────────────────\n");
    out.push_str(&format!("  Model:       {}\n", model(info)));
    out.push_str(&format!("  Serial:      {}\n", info.get("serialnumber").unwrap_or("—")));
    out.push_str(&format!("  Firmware:    {}\n", info.get("firmwareversion").unwrap_or("—")));
    out.push_str(&format!("  Capacity:    {}\n", fmt_bytes(report.size_bytes)));
    let smart = match (report.supported, report.enabled) {
        (false, _)    => "unsupported",
        (true, false) => "disabled",
        (true, true)  => "enabled",
    };
    out.push_str(&format!("  SMART:       {}\n", smart));
    out.push_str(&format!("  Health:      {}\n", report.verdict.label()));
    out.push_str(&format!("  Temperature: {}\n", fmt_temp(report.temperature)));
    out.push_str(&format!("  Power mode:  {}\n", report.power_mode));
    out.push_str(&format!(
        "  Power on:    {} h  |  Cycles: {}\n",
        fmt_counter(report.power.power_on_hours),
        fmt_counter(report.power.power_cycles),
    ));
    out.push('\n');

    // ── Attributes ─────────────────────────────────────────────────────
    if !report.attributes.is_empty() {
        out.push_str(&format!("── Attributes ({}) ─────────────────────────────\n", report.attributes.len()));
        out.push_str(&format!(
            "  {:>3} {:<26} {:>5} {:>5} {:>5}  {:<26} {}\n",
            "ID", "Name", "Val", "Worst", "Thr", "Status", "Raw"
        ));
        out.push_str(&format!("  {}\n", "─".repeat(84)));
        for a in &report.attributes {
            out.push_str(&format!(
                "  {:>3} {:<26} {:>5} {:>5} {:>5}  {:<26} {}\n",
                a.id, a.name, a.value, a.worst, a.threshold, a.verdict.label(), a.raw_value,
            ));
        }
        out.push('\n');
    }

    // ── Self-tests ─────────────────────────────────────────────────────
    out.push_str(&format!("── Self-test Log ({}) ──────────────────────────\n", report.self_tests.len()));
    if report.self_tests.is_empty() {
        out.push_str("  No self-tests logged\n");
    }
    for t in &report.self_tests {
        out.push_str(&format!(
            "  #{:<3} {:<17} {:<32} {:>3}%  {:>7} h  {}\n",
            t.num, t.description.label(), t.status, t.remaining_percent,
            t.lifetime_hours, t.lba_of_first_error,
        ));
    }
    out
}

/// ATA model, else NVMe/SAS product name.
fn model(info: &InformationMap) -> &str {
    ["devicemodel", "product", "modelfamily"]
        .iter()
        .find_map(|k| info.get(k).filter(|v| !v.is_empty()))
        .unwrap_or("Unknown")
}
