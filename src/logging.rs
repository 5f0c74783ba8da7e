use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs de diagnóstico a stderr. `--verbose` sube el nivel a DEBUG; `RUST_LOG` manda.
pub fn setup_tracing(verbose: bool) -> Result<(), tracing_subscriber::util::TryInitError> {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let stderr_log = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(env_filter)
        .try_init()
}
