//! Logging setup.
//!
//! In the browser records go to the developer console through a small `log`
//! backend. Native builds (tests, tooling) use `env_logger`, where `RUST_LOG`
//! may override the configured level.

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
use log::{Log, Metadata};

#[cfg(any(target_arch = "wasm32", test))]
use log::Record;

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
static LOGGER: ConsoleLogger = ConsoleLogger;

#[cfg(any(target_arch = "wasm32", test))]
fn format_record(record: &Record) -> String {
    format!("[{}] {}: {}", record.level(), record.target(), record.args())
}

#[cfg(target_arch = "wasm32")]
impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let value = format_record(record).into();
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&value),
            log::Level::Warn => web_sys::console::warn_1(&value),
            _ => web_sys::console::log_1(&value),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. A second call only updates the level.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("logger already installed");
    }
    log::set_max_level(level);
}

/// Install `env_logger` on stderr. A second call only updates the global
/// maximum, so it can tighten the first call's level but not loosen it.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    let installed = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .is_test(cfg!(test))
        .try_init();
    if installed.is_err() {
        log::debug!("logger already installed");
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn record_format_has_level_and_target() {
        assert_eq!(
            format_record(
                &Record::builder()
                    .args(format_args!("menu-nav: region {}", 2))
                    .level(Level::Debug)
                    .target("nexus_map_menu::menu::navigation")
                    .build()
            ),
            "[DEBUG] nexus_map_menu::menu::navigation: menu-nav: region 2"
        );
    }

    #[test]
    fn init_twice_keeps_last_level() {
        init(LevelFilter::Debug);
        init(LevelFilter::Warn);
        assert_eq!(log::max_level(), LevelFilter::Warn);
        assert!(!log::log_enabled!(target: "nexus_map_menu", Level::Info));
    }
}
