use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default number of frames kept in a collision trace.
fn default_max_frames() -> usize {
	12
}

fn default_capture() -> bool {
	true
}

/// Diagnostics settings, usually read from a `[diagnostics]`-style TOML file.
///
/// ```toml
/// capture_stack_traces = true
/// max_frames = 8
/// blacklist = ["std::rt", "core::ops::function"]
/// keywords = ["my_app::screens"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
	/// Whether collision events carry a captured stack trace at all.
	#[serde(default = "default_capture")]
	pub capture_stack_traces: bool,
	/// Upper bound on frames attached to one event.
	#[serde(default = "default_max_frames")]
	pub max_frames: usize,
	/// Frame patterns that are always dropped.
	pub blacklist: Vec<String>,
	/// Frame patterns that are kept first when trimming.
	pub keywords: Vec<String>,
}

impl Default for DiagnosticsConfig {
	fn default() -> Self {
		Self {
			capture_stack_traces: default_capture(),
			max_frames: default_max_frames(),
			blacklist: Vec::new(),
			keywords: Vec::new(),
		}
	}
}

impl DiagnosticsConfig {
	/// Parses a config from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses a config file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&text)
	}
}
