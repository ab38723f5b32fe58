use std::sync::Once;

use env_logger::Env;

/// Logger configuration.
///
/// `filter` overrides `RUST_LOG` when set, using the `env_logger` filter
/// syntax (e.g. "info", "scoot_engine=debug,wgpu=warn"). `write_style`
/// controls ANSI coloring.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Idempotent; subsequent calls are ignored. Intended usage is early in `main`.
/// Defaults to `info` so the runtime toggles show up without `RUST_LOG` set.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

        if let Some(filter) = &config.filter {
            builder.parse_filters(filter);
        }

        builder.write_style(config.write_style).init();

        log::debug!("logging initialized");
    });
}
