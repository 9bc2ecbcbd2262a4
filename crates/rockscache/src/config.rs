//! Configuration for the rockscache server.
//!
//! Settings come from three layers, later ones winning: built-in defaults, an
//! optional configuration file (TOML, JSON or YAML), and command-line flags.
//!
//! # Example
//!
//! ```no_run
//! use rockscache::config::{Cli, Parser, setup};
//!
//! let args = Cli::parse();
//! let config = setup(args)?;
//! println!("Server address: {}", config.addr());
//! # Ok::<(), rockscache::config::ConfigError>(())
//! ```

use std::path::Path;
use std::time::Duration;

pub use clap::Parser;
use resp::DEFAULT_MAX_ARRAY_LEN;
use resp::DEFAULT_MAX_BULK_LEN;
use resp::DEFAULT_MAX_DEPTH;
use resp::DEFAULT_MAX_LINE_LEN;
use resp::DecoderLimits;
use serde::Deserialize;
use serde::Serialize;
use telemetry::TelemetryError;
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("Failed to read configuration file '{path}': {source}")]
	Io {
		source: std::io::Error,
		path: String,
	},

	#[error("Failed to parse TOML configuration: {0}")]
	TomlParse(#[from] toml::de::Error),

	#[error("Failed to parse JSON configuration: {0}")]
	JsonParse(#[from] serde_json::Error),

	#[error("Failed to parse YAML configuration: {0}")]
	YamlParse(#[from] serde_yaml::Error),

	#[error("Unsupported configuration format: {0}")]
	UnsupportedFormat(String),

	#[error("Configuration file has no extension")]
	NoExtension,

	#[error(transparent)]
	Telemetry(#[from] TelemetryError),
}

/// Command-line arguments for the server
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
	/// Configuration file path (TOML, JSON, or YAML).
	/// Defaults to conf/config.toml if it exists.
	#[arg(short, long)]
	pub config: Option<String>,

	/// Port to listen on
	#[arg(short, long)]
	pub port: Option<u16>,

	/// Host to bind to
	#[arg(long)]
	pub host: Option<String>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long)]
	pub log_level: Option<String>,

	/// Number of worker threads (default: number of CPU cores)
	#[arg(long)]
	pub worker_threads: Option<usize>,

	/// Close connections idle for this many seconds (0 disables)
	#[arg(long)]
	pub timeout: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	pub log_level: String,
	pub worker_threads: usize,
	/// Idle client timeout in seconds, 0 means never.
	pub timeout: u64,
	/// Key count cap for the in-memory cache, 0 means unlimited.
	pub max_keys: usize,
	// Protocol limits, named after their Redis counterparts where one exists.
	pub proto_max_bulk_len: usize,
	pub max_multibulk_len: usize,
	pub max_nesting_depth: usize,
	pub max_inline_len: usize,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".into(),
			port: 6379,
			log_level: "info".into(),
			worker_threads: num_cpus::get(),
			timeout: 0,
			max_keys: 0,
			proto_max_bulk_len: DEFAULT_MAX_BULK_LEN,
			max_multibulk_len: DEFAULT_MAX_ARRAY_LEN,
			max_nesting_depth: DEFAULT_MAX_DEPTH,
			max_inline_len: DEFAULT_MAX_LINE_LEN,
		}
	}
}

impl ServerConfig {
	/// Listen address in `host:port` form.
	pub fn addr(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}

	pub fn decoder_limits(&self) -> DecoderLimits {
		DecoderLimits::new()
			.max_depth(self.max_nesting_depth)
			.max_bulk_len(self.proto_max_bulk_len)
			.max_array_len(self.max_multibulk_len)
			.max_line_len(self.max_inline_len)
	}

	pub fn idle_timeout(&self) -> Option<Duration> {
		(self.timeout > 0).then(|| Duration::from_secs(self.timeout))
	}

	/// Override fields with the flags that were given on the command line.
	pub fn apply_cli(&mut self, args: &Cli) {
		if let Some(host) = &args.host {
			self.host = host.clone();
		}
		if let Some(port) = args.port {
			self.port = port;
		}
		if let Some(log_level) = &args.log_level {
			self.log_level = log_level.clone();
		}
		if let Some(t) = args.worker_threads {
			self.worker_threads = t;
		}
		if let Some(timeout) = args.timeout {
			self.timeout = timeout;
		}
	}
}

/// Resolve the final configuration without touching global state.
pub fn resolve(args: &Cli) -> Result<ServerConfig, ConfigError> {
	let mut config = match args.config.as_deref() {
		Some(p) => load_from_file(p)?,
		None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH)?,
		None => ServerConfig::default(),
	};

	config.apply_cli(args);
	config.log_level = telemetry::validate_log_level(&config.log_level)?;
	if config.worker_threads == 0 {
		config.worker_threads = num_cpus::get();
	}
	Ok(config)
}

/// Resolve the configuration and initialise logging from it.
pub fn setup(args: Cli) -> Result<ServerConfig, ConfigError> {
	let config = resolve(&args)?;
	telemetry::init(&config.log_level)?;
	Ok(config)
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ServerConfig, ConfigError> {
	let path_ref = path.as_ref();
	let content = std::fs::read_to_string(path_ref).map_err(|source| ConfigError::Io {
		path: path_ref.display().to_string(),
		source,
	})?;

	let extension = path_ref
		.extension()
		.and_then(|ext| ext.to_str())
		.ok_or(ConfigError::NoExtension)?;

	match extension.to_lowercase().as_str() {
		"toml" => Ok(toml::from_str(&content)?),
		"json" => Ok(serde_json::from_str(&content)?),
		"yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
		_ => Err(ConfigError::UnsupportedFormat(extension.to_string())),
	}
}
