//! Tracing subscriber initialization.

use darkroom_core::Config;
use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Production (or
/// `LOG_FORMAT=json`) emits JSON lines for log shippers; development
/// keeps a compact human-readable format.
pub fn init_telemetry(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "darkroom_api=debug,darkroom_db=debug,darkroom_storage=debug,darkroom_processing=debug,tower_http=debug"
            .into()
    });

    let json_output = config.is_production()
        || std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json_output {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        let console_fmt = tracing_subscriber::fmt::layer()
            .event_format(Format::default().compact().with_target(false).without_time());
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_fmt)
            .init();
    }
}
