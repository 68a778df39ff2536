//! Logging utilities

pub use log::{debug, info, warn, error, trace};

/// Initialize logging at `Info`, or `Debug` when `verbose` is set
pub fn init_with_level(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}
