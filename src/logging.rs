//! Browser Console Logger
//!
//! `log` backend writing to `console.*`. Our own crates log at Debug when
//! debug logging is on; everything else stays at Warn.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::JsValue;

static DEBUG: AtomicBool = AtomicBool::new(false);
static LOGGER: ConsoleLogger = ConsoleLogger;

const OWN_TARGETS: &[&str] = &["gift_registry_ui", "gift_registry_lib"];

struct ConsoleLogger;

impl ConsoleLogger {
    fn max_level(target: &str) -> Level {
        let own = OWN_TARGETS.iter().any(|t| target.starts_with(t));
        match (own, DEBUG.load(Ordering::Relaxed)) {
            (true, true) => Level::Debug,
            (true, false) => Level::Info,
            (false, _) => Level::Warn,
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Self::max_level(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from(format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Safe to call more than once.
pub fn init(debug: bool) {
    DEBUG.store(debug, Ordering::Relaxed);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}
