use std::{io, path::Path};

use tracing::{level_filters::LevelFilter, subscriber::SetGlobalDefaultError};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global tracing subscriber.
///
/// - `RUST_LOG` takes precedence over `default_level` when it is set and valid
/// - Events always go to stderr, leaving stdout to ffmpeg and to dry runs
/// - With `log_file`, events are also written there without ANSI colors
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// until the program exits.
pub fn init_logging(
    default_level: LevelFilter,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>, SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path.file_name().unwrap_or(path.as_os_str());
            let appender = tracing_appender::rolling::never(dir.unwrap_or(Path::new(".")), name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        },
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::Layer::new().with_writer(io::stderr).with_target(false))
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(path) = log_file {
        tracing::debug!("Logging to {:?}", path);
    }
    Ok(guard)
}
