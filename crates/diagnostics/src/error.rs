use std::path::PathBuf;

/// Failure reported by a [`ComponentsLogger`](crate::ComponentsLogger).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
	/// The logger refused the event.
	#[error("event rejected: {0}")]
	Rejected(String),
	/// The logging backend is not reachable.
	#[error("logger unavailable")]
	Unavailable,
}

/// Failure loading a [`DiagnosticsConfig`](crate::DiagnosticsConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid config: {0}")]
	Parse(#[from] toml::de::Error),
}
