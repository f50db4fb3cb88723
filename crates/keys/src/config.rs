use std::path::Path;

use loom_diagnostics::{ConfigError, DiagnosticsConfig};
use serde::{Deserialize, Serialize};

use crate::ResolveOptions;

/// Combined settings for resolution and collision reporting.
///
/// ```toml
/// [resolve]
/// max_depth = 512
///
/// [diagnostics]
/// max_frames = 8
/// keywords = ["my_app::screens"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeysConfig {
	pub resolve: ResolveOptions,
	pub diagnostics: DiagnosticsConfig,
}

impl KeysConfig {
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&text)
	}
}
