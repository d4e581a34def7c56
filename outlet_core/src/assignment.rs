use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::OutletError;
use crate::OutletResult;

/// Prefix that turns a slot value into a file reference.
pub const FILE_REFERENCE_PREFIX: char = '@';

/// A raw `(name, value)` pair exactly as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
	pub name: String,
	pub value: String,
}

impl SlotAssignment {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}

	/// Parse a `NAME=VALUE` string. The split happens at the first `=`, so
	/// values may contain `=` and may be empty. The name is trimmed and must
	/// not be empty.
	pub fn parse(input: &str) -> OutletResult<Self> {
		let Some((name, value)) = input.split_once('=') else {
			return Err(OutletError::InvalidAssignment(input.to_string()));
		};

		let name = name.trim();
		if name.is_empty() {
			return Err(OutletError::InvalidAssignment(input.to_string()));
		}

		Ok(Self::new(name, value))
	}

	/// Returns true when the value is a `@path` file reference.
	pub fn is_file_reference(&self) -> bool {
		self.value.starts_with(FILE_REFERENCE_PREFIX)
	}
}

impl FromStr for SlotAssignment {
	type Err = OutletError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl Display for SlotAssignment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}={}", self.name, self.value)
	}
}

/// Collapse duplicate assignments so each slot name maps to a single raw
/// value. The last assignment for a name wins.
pub fn effective_assignments(assignments: &[SlotAssignment]) -> BTreeMap<&str, &str> {
	let mut effective = BTreeMap::new();

	for assignment in assignments {
		if let Some(previous) = effective.insert(assignment.name.as_str(), assignment.value.as_str())
		{
			tracing::debug!(
				slot = %assignment.name,
				previous,
				"slot assigned more than once, the last assignment wins"
			);
		}
	}

	effective
}
