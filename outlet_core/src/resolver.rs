use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use derive_more::Deref;

use crate::assignment::FILE_REFERENCE_PREFIX;
use crate::assignment::SlotAssignment;
use crate::assignment::effective_assignments;

/// Port for reading referenced files. The resolver never touches the file
/// system directly.
pub trait FileReader {
	/// Read the full text content of the file at `path`.
	fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// Reads files from the operating system's file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileReader;

impl FileReader for OsFileReader {
	fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
		std::fs::read_to_string(path)
	}
}

/// In-memory file reader keyed by absolute path. Useful for tests and for
/// callers that already hold file contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileReader {
	files: HashMap<PathBuf, String>,
}

impl MemoryFileReader {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a file, builder style.
	#[must_use]
	pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
		self.insert(path, content);
		self
	}

	pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
		self.files.insert(path.into(), content.into());
	}
}

impl FileReader for MemoryFileReader {
	fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
		self.files.get(path).cloned().ok_or_else(|| {
			std::io::Error::new(
				std::io::ErrorKind::NotFound,
				format!("no such file: {}", path.display()),
			)
		})
	}
}

/// Everything the resolver needs from its environment. The working directory
/// is explicit so relative references never depend on process state.
pub struct ResolveContext<'a> {
	/// Directory that relative `@path` references resolve against.
	pub working_dir: &'a Path,
	/// Collaborator used to load referenced files.
	pub reader: &'a dyn FileReader,
}

impl<'a> ResolveContext<'a> {
	pub fn new(working_dir: &'a Path, reader: &'a dyn FileReader) -> Self {
		Self {
			working_dir,
			reader,
		}
	}
}

/// Where a slot's value comes from, decided from the raw assignment string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotSource<'v> {
	/// The value is used verbatim.
	Inline(&'v str),
	/// The value names a file whose content is used.
	File(&'v Path),
}

impl<'v> SlotSource<'v> {
	pub fn classify(raw: &'v str) -> Self {
		match raw.strip_prefix(FILE_REFERENCE_PREFIX) {
			Some(path) => Self::File(Path::new(path)),
			None => Self::Inline(raw),
		}
	}
}

/// The outcome of resolving a single slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
	/// An inline value.
	Inline(String),
	/// Content loaded from a referenced file.
	File { path: PathBuf, content: String },
	/// The referenced file could not be read.
	Failed { path: PathBuf, reason: String },
}

impl Resolution {
	/// The resolved content, or `None` when resolution failed.
	pub fn content(&self) -> Option<&str> {
		match self {
			Self::Inline(content) | Self::File { content, .. } => Some(content),
			Self::Failed { .. } => None,
		}
	}

	pub fn is_failed(&self) -> bool {
		matches!(self, Self::Failed { .. })
	}
}

/// Resolved slot values keyed by slot name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct SlotTable(BTreeMap<String, Resolution>);

impl SlotTable {
	/// Slots whose file reference could not be read, in name order.
	pub fn failures(&self) -> impl Iterator<Item = (&str, &Resolution)> {
		self.0
			.iter()
			.filter(|(_, resolution)| resolution.is_failed())
			.map(|(name, resolution)| (name.as_str(), resolution))
	}
}

impl FromIterator<(String, Resolution)> for SlotTable {
	fn from_iter<T: IntoIterator<Item = (String, Resolution)>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

/// Resolve a reference path against the working directory. Absolute paths are
/// returned unchanged; `.` components are dropped from relative ones.
pub fn resolve_path(working_dir: &Path, reference: &Path) -> PathBuf {
	if reference.is_absolute() {
		return reference.to_path_buf();
	}

	let mut resolved = working_dir.to_path_buf();
	for component in reference.components() {
		if !matches!(component, Component::CurDir) {
			resolved.push(component);
		}
	}

	resolved
}

/// Resolve a single raw slot value. Never fails: an unreadable file becomes
/// [`Resolution::Failed`].
pub fn resolve_slot(name: &str, raw: &str, ctx: &ResolveContext<'_>) -> Resolution {
	match SlotSource::classify(raw) {
		SlotSource::Inline(value) => {
			tracing::debug!(slot = name, "resolved inline slot value");
			Resolution::Inline(value.to_string())
		}
		SlotSource::File(reference) => {
			let path = resolve_path(ctx.working_dir, reference);
			match ctx.reader.read_to_string(&path) {
				Ok(content) => {
					tracing::debug!(slot = name, path = %path.display(), bytes = content.len(), "loaded slot file");
					Resolution::File { path, content }
				}
				Err(error) => {
					tracing::debug!(slot = name, path = %path.display(), %error, "could not read slot file");
					Resolution::Failed {
						path,
						reason: error.to_string(),
					}
				}
			}
		}
	}
}

/// Resolve every assignment. Duplicates collapse first (last wins) so a
/// superseded file reference is never read.
pub fn resolve_assignments(assignments: &[SlotAssignment], ctx: &ResolveContext<'_>) -> SlotTable {
	effective_assignments(assignments)
		.into_iter()
		.map(|(name, raw)| (name.to_string(), resolve_slot(name, raw, ctx)))
		.collect()
}
