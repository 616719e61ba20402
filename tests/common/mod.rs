//! Scripted `CommandRunner` and smartctl fixtures shared by the integration tests.
#![allow(dead_code)]

use parking_lot::Mutex;
use smartdiag::{CommandOutput, CommandRunner, Result, SmartError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const ATA_DEFAULT: &str = "\
smartctl 7.3 2022-02-28 r5338 [x86_64-linux-6.1.0] (local build)
Copyright (C) 2002-22, Bruce Allen, Christian Franke, www.smartmontools.org

=== START OF INFORMATION SECTION ===
Model Family:     Western Digital Blue
Device Model:     WDC WD10EZEX-08WN4A0
Serial Number:    WD-WCC6Y0RXXXXX
Firmware Version: 01.01A01
User Capacity:    1,000,204,886,016 bytes [1.00 TB]
SMART support is: Available - device has SMART capability.
SMART support is: Enabled
Power mode is:    ACTIVE or IDLE

=== START OF READ SMART DATA SECTION ===
SMART overall-health self-assessment test result: PASSED

SMART Attributes Data Structure revision number: 16
Vendor Specific SMART Attributes with Thresholds:
ID# ATTRIBUTE_NAME          FLAGS    VALUE WORST THRESH FAIL RAW_VALUE
  1 Raw_Read_Error_Rate     POSR-K   200   200   051    -    0
  5 Reallocated_Sector_Ct   PO--CK   200   200   140    -    0
  9 Power_On_Hours          -O--CK   088   088   000    -    9123
 12 Power_Cycle_Count       -O--CK   100   100   000    -    412
194 Temperature_Celsius     -O---K   109   097   000    -    34
197 Current_Pending_Sector  -O--CK   200   200   000    -    0
                            ||||||_ K auto-keep
                            |||||__ C event count
                            ||||___ R error rate
                            |||____ S speed/performance
                            ||_____ O updated online
                            |______ P prefailure warning

SMART Self-test log structure revision number 1
Num  Test_Description    Status                  Remaining  LifeTime(hours)  LBA_of_first_error
# 1  Short offline       Completed without error       00%      9100         -
# 2  Extended offline    Completed: read failure       90%      8000         123456
";

pub const SAS_DEFAULT: &str = "\
smartctl 7.3 2022-02-28 r5338 [x86_64-linux-6.1.0] (local build)

=== START OF INFORMATION SECTION ===
Vendor:               SEAGATE
Product:              ST4000NM0023
Revision:             0003
User Capacity:        4,000,787,030,016 bytes [4.00 TB]
Device type:          disk

=== START OF READ SMART DATA SECTION ===
SMART Health Status: OK

Current Drive Temperature:     32 C
Drive Trip Temperature:        68 C
";

pub fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Returns the same scripted output for every run and records each invocation.
pub struct FakeRunner {
    status:     u8,
    output:     Vec<String>,
    delay:      Duration,
    calls:      Mutex<Vec<Vec<String>>>,
    inside:     AtomicUsize,
    max_inside: AtomicUsize,
    fail_spawn: bool,
}

impl FakeRunner {
    pub fn new(status: u8, text: &str) -> Arc<Self> {
        Arc::new(Self::build(status, text, Duration::ZERO, false))
    }

    /// Each run sleeps for `delay` so overlapping runs can be observed.
    pub fn slow(text: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self::build(0, text, delay, false))
    }

    /// Every run fails as if the program were missing.
    pub fn unspawnable() -> Arc<Self> {
        Arc::new(Self::build(0, "", Duration::ZERO, true))
    }

    fn build(status: u8, text: &str, delay: Duration, fail_spawn: bool) -> Self {
        Self {
            status,
            output:     lines(text),
            delay,
            calls:      Mutex::new(Vec::new()),
            inside:     AtomicUsize::new(0),
            max_inside: AtomicUsize::new(0),
            fail_spawn,
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Highest number of runs that were in flight at the same time.
    pub fn max_concurrent(&self) -> usize {
        self.max_inside.load(Ordering::SeqCst)
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        self.calls.lock().push(args.to_vec());
        if self.fail_spawn {
            return Err(SmartError::Spawn {
                command: program.to_string(),
                source:  std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }

        let now = self.inside.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_inside.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.inside.fetch_sub(1, Ordering::SeqCst);

        Ok(CommandOutput { status: self.status, lines: self.output.clone() })
    }
}

/// In-memory log sink for asserting on emitted events.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `body` with WARN-and-above events captured; returns its result and the log text.
pub fn capture_warnings<T>(body: impl FnOnce() -> T) -> (T, String) {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, body);
    (out, logs.contents())
}
