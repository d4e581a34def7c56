use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::OutletError;
use crate::OutletResult;
use crate::SlotAssignment;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["outlet.toml", ".outlet.toml", ".config/outlet.toml"];

/// Configuration loaded from an `outlet.toml` file.
///
/// ```toml
/// [slots]
/// title = "Demo"
/// body = "@content/body.md"
///
/// [output]
/// path = "readme.md"
/// ```
///
/// Slot values follow the same rules as command line assignments: a leading
/// `@` makes the value a file reference resolved against the working
/// directory.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutletConfig {
	/// Default slot assignments. Command line assignments override these.
	#[serde(default)]
	pub slots: BTreeMap<String, String>,
	/// Output configuration.
	#[serde(default)]
	pub output: OutputConfig,
}

/// Where the composed document is written when `--output` isn't given.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
	/// Destination file, relative to the working directory. When absent the
	/// document goes to stdout.
	#[serde(default)]
	pub path: Option<PathBuf>,
}

impl OutletConfig {
	/// Find the first config file candidate that exists under `root`.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no candidate exists.
	pub fn load(root: &Path) -> OutletResult<Option<(PathBuf, OutletConfig)>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let config = Self::load_file(&config_path)?;
		Ok(Some((config_path, config)))
	}

	/// Load the config from an explicit path.
	pub fn load_file(path: &Path) -> OutletResult<OutletConfig> {
		let content = std::fs::read_to_string(path).map_err(|source| {
			OutletError::ConfigRead {
				path: path.to_path_buf(),
				source,
			}
		})?;

		Self::parse(&content)
	}

	pub fn parse(content: &str) -> OutletResult<OutletConfig> {
		toml::from_str(content).map_err(|e| OutletError::ConfigParse(e.to_string()))
	}

	/// The configured slots as assignments. Names are validated the same way
	/// as `NAME=VALUE` arguments.
	pub fn assignments(&self) -> OutletResult<Vec<SlotAssignment>> {
		self.slots
			.iter()
			.map(|(name, value)| {
				if name.trim().is_empty() {
					return Err(OutletError::InvalidAssignment(format!("{name}={value}")));
				}
				Ok(SlotAssignment::new(name.trim(), value.as_str()))
			})
			.collect()
	}
}
