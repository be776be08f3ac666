//! Logger initialization for the pipeline binary.

use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Install the global logger. Defaults to `info`; `RUST_LOG` overrides.
pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:>5}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}
