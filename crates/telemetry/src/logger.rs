use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TelemetryError;

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Custom time formatter that displays time as "YYYY-MM-DD HH:MM:SS.micros"
struct CustomTimeFormat;

impl FormatTime for CustomTimeFormat {
	fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
		let now = std::time::SystemTime::now();
		let datetime: chrono::DateTime<chrono::Local> = now.into();
		write!(w, "{}", datetime.format("[%Y-%m-%d %H:%M:%S%.6f]"))
	}
}

/// Check that `level` names one of the supported log levels and return it in
/// lowercase.
pub fn validate_log_level(level: &str) -> Result<String, TelemetryError> {
	let level_lower = level.to_lowercase();
	if !VALID_LEVELS.contains(&level_lower.as_str()) {
		return Err(TelemetryError::InvalidLogLevel(level.to_string()));
	}
	Ok(level_lower)
}

/// Initialize the console logger at the provided level.
///
/// Records emitted through either the `log` or the `tracing` macros end up in
/// the same formatter, with timestamps in the form `YYYY-MM-DD HH:MM:SS.micros`
/// and the id of the emitting thread.
///
/// # Example
///
/// ```no_run
/// telemetry::init("info")?;
/// # Ok::<(), telemetry::TelemetryError>(())
/// ```
///
/// # Errors
///
/// Fails if the level is not one of trace, debug, info, warn, error, or if a
/// global logger was already installed.
pub fn init(level: &str) -> Result<(), TelemetryError> {
	let level = validate_log_level(level)?;
	let env_filter = EnvFilter::new(level);

	tracing_subscriber::registry()
		.with(env_filter)
		.with(
			fmt::layer()
				.with_timer(CustomTimeFormat)
				.with_target(false)
				.with_thread_ids(true)
				.with_line_number(false)
				.with_file(false),
		)
		.try_init()
		.map_err(|e| TelemetryError::InitFailed(e.to_string()))
}
