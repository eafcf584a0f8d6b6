/// File logging into the data directory.
///
/// Logs land in `{data_dir}/logs/woodshed.log`; each invocation appends a
/// separator line so interleaved runs stay readable.
use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(data_dir: &Path) -> Result<()> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "woodshed.log");

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI codes in log files
        .with_target(true)
        .with_line_number(true);

    // Default to INFO, overridable via RUST_LOG.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .ok(); // Ignore error if already initialized

    // Separator so consecutive runs are easy to tell apart.
    use std::io::Write;
    if let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("woodshed.log"))
    {
        let _ = writeln!(
            file,
            "---- {} ----",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}
