//! This module sets up logging.

use tracing_subscriber::{filter::LevelFilter, fmt::Layer, prelude::*, EnvFilter};
use tracing_unwrap::ResultExt;

cfg_if::cfg_if! {
    if #[cfg(debug_assertions)] {
        /// The default level to log at, unless overridden by `RUST_LOG`.
        const DEFAULT_LEVEL: LevelFilter = LevelFilter::DEBUG;
    } else {
        /// The default level to log at, unless overridden by `RUST_LOG`.
        const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;
    }
}

/// Crates that are far too chatty at the default level.
const QUIET_CRATES: &[&str] = &["wgpu=warn", "naga=warn", "bevy_render=info", "winit=warn"];

/// Initialise a subscriber for tracing to log to `stdout`.
///
/// Bevy's own `LogPlugin` is disabled, so this is the only subscriber.
pub fn init_tracing() {
    let filter = QUIET_CRATES.iter().fold(
        EnvFilter::builder()
            .with_default_directive(DEFAULT_LEVEL.into())
            .from_env_lossy(),
        |filter, directive| {
            filter.add_directive(
                directive
                    .parse()
                    .expect_or_log("Quiet crate directives should be valid"),
            )
        },
    );

    let subscriber = tracing_subscriber::registry().with(
        Layer::new()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_filter(filter),
    );

    tracing::subscriber::set_global_default(subscriber)
        .expect_or_log("Setting the global default for tracing should be okay");
}
