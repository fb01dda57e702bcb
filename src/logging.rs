//! Logger setup shared by the binaries.

use log::LevelFilter;

/// Initialize terminal logging.
///
/// `verbosity` 0 shows warnings, 1 info, 2 or more debug. `RUST_LOG`, when
/// set, overrides the level. Calling this twice is harmless.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .parse_default_env()
        .try_init();
}
