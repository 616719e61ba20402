use anyhow::{Context, Result};
use clap::Parser;
use smartdiag::config::Config;
use smartdiag::models::smart::AssessmentVerdict;
use smartdiag::util::{human, report};
use smartdiag::{logging, DeviceHandle, SmartDevice};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "smartdiag", about = "smartctl-based disk health assessment", version)]
struct Cli {
    /// Device to inspect, e.g. /dev/sda
    #[arg(required_unless_present = "config")]
    device: Option<String>,

    /// Device size in bytes for the bad-sector threshold (default: read from sysfs)
    #[arg(long)]
    size: Option<u64>,

    /// smartctl device type hint (-d), e.g. sat, nvme, megaraid,0
    #[arg(short = 'd', long)]
    device_type: Option<String>,

    /// smartctl power-state policy (-n): never, sleep, standby, idle
    #[arg(short = 'n', long)]
    nocheck: Option<String>,

    /// Print a JSON snapshot of everything known about the device and exit
    #[arg(long)]
    json: bool,

    /// Print the attribute table with per-attribute verdicts
    #[arg(long)]
    attributes: bool,

    /// Print the self-test log
    #[arg(long)]
    selftest: bool,

    /// Print the information section
    #[arg(long)]
    info: bool,

    /// Print the drive temperature
    #[arg(long)]
    temperature: bool,

    /// Print the current power mode
    #[arg(long)]
    power_mode: bool,

    /// Print the raw extended (-x) smartctl output
    #[arg(long)]
    extended: bool,

    /// One-shot health check: exit 0=GOOD, 1=WARNING, 2=FAILING (nagios/cron compatible)
    #[arg(long)]
    check: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = match &cli.config_file {
        Some(path) => Config::load_from(path)?,
        None       => Config::load(),
    };
    logging::init(&cfg.general.log_level);

    if cli.config {
        return run_print_config(&cfg, cli.config_file.as_deref());
    }

    let device = cli.device.clone().context("no device given")?;
    let mut dev = build_engine(&cli, &device, &cfg);

    if cli.json {
        return run_json(&mut dev);
    }
    if cli.check {
        return run_check(&mut dev);
    }
    if cli.attributes {
        return run_attributes(&mut dev);
    }
    if cli.selftest {
        return run_selftest(&mut dev);
    }
    if cli.info {
        return run_info(&mut dev);
    }
    if cli.temperature {
        println!("{}", human::fmt_temp(dev.temperature()?));
        return Ok(());
    }
    if cli.power_mode {
        println!("{}", dev.power_mode());
        return Ok(());
    }
    if cli.extended {
        println!("{}", dev.extended_information()?);
        return Ok(());
    }

    let snapshot = report::collect(&mut dev)?;
    print!("{}", report::generate(&snapshot));
    Ok(())
}

/// CLI flags win over the config file.
fn build_engine(cli: &Cli, device: &str, cfg: &Config) -> SmartDevice {
    let mut handle = match cli.size {
        Some(size) => DeviceHandle::new(device, size),
        None       => DeviceHandle::probe(device),
    };
    let device_type = cli
        .device_type
        .clone()
        .or_else(|| cfg.type_hint(device).map(str::to_string));
    if let Some(t) = device_type {
        handle = handle.with_device_type(t);
    }

    SmartDevice::new(handle)
        .with_smartctl(cfg.general.smartctl_path.clone())
        .with_nocheck(cli.nocheck.clone().or_else(|| cfg.general.nocheck.clone()))
}

fn run_json(dev: &mut SmartDevice) -> Result<()> {
    use serde_json::json;

    let snapshot = report::collect(dev)?;
    let out = json!({
        "smartdiag_version": env!("CARGO_PKG_VERSION"),
        "timestamp":         chrono::Local::now().to_rfc3339(),
        "device":            snapshot,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn run_check(dev: &mut SmartDevice) -> Result<()> {
    let path = dev.device().path.clone();
    let verdict = dev
        .overall_status()
        .with_context(|| format!("reading SMART data for {}", path))?;

    println!("{} {}", path, verdict.label());
    std::process::exit(check_exit_code(verdict));
}

fn check_exit_code(verdict: AssessmentVerdict) -> i32 {
    if verdict.is_failure() {
        2
    } else if verdict == AssessmentVerdict::Good {
        0
    } else {
        1
    }
}

fn run_attributes(dev: &mut SmartDevice) -> Result<()> {
    let attrs = dev.attributes()?;
    if attrs.is_empty() {
        println!("No SMART attribute table.");
        return Ok(());
    }
    println!("{:>3} {:<26} {:<7} {:>5} {:>5} {:>5}  {:<26} {}",
        "ID", "Name", "Flags", "Val", "Worst", "Thr", "Status", "Raw");
    for a in &attrs {
        println!("{:>3} {:<26} {:<7} {:>5} {:>5} {:>5}  {:<26} {}",
            a.id, a.name, a.flags, a.value, a.worst, a.threshold, a.verdict.label(), a.raw_value);
    }
    Ok(())
}

fn run_selftest(dev: &mut SmartDevice) -> Result<()> {
    let log = dev.self_test_log()?;
    if log.is_empty() {
        println!("No self-tests logged.");
        return Ok(());
    }
    for t in &log {
        println!("#{:<3} {:<17} {:<32} {:>3}%  {:>7} h  {}",
            t.num, t.description.label(), t.status, t.remaining_percent,
            t.lifetime_hours, t.lba_of_first_error);
    }
    Ok(())
}

fn run_info(dev: &mut SmartDevice) -> Result<()> {
    let info = dev.information()?;
    let width = info.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (k, v) in info.iter() {
        println!("{:<width$}  {}", k, v, width = width);
    }
    Ok(())
}

fn run_print_config(cfg: &Config, explicit: Option<&std::path::Path>) -> Result<()> {
    let path = explicit
        .map(|p| p.to_path_buf())
        .or_else(Config::config_path)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  smartctl_path = {}", cfg.general.smartctl_path);
    println!("  nocheck       = {}", cfg.general.nocheck.as_deref().unwrap_or("(not set)"));
    println!("  log_level     = {}", cfg.general.log_level);
    println!();
    println!("[devices]");
    if cfg.devices.type_hints.is_empty() {
        println!("  type_hints = (none)");
    } else {
        let mut hints: Vec<_> = cfg.devices.type_hints.iter().collect();
        hints.sort();
        for (path, hint) in hints {
            println!("  type_hint: {} → -d {}", path, hint);
        }
    }
    Ok(())
}
