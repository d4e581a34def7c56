use std::io::Write;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::Marker;
use crate::MarkerOutcome;
use crate::OutletError;
use crate::OutletResult;
use crate::Resolution;
use crate::ResolveContext;
use crate::SlotAssignment;
use crate::compose;
use crate::resolve_assignments;
use crate::scan;

/// A slot whose file reference could not be resolved. Reported to the caller
/// but never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDiagnostic {
	/// Name of the slot.
	pub slot: String,
	/// The resolved path that failed to load.
	pub path: PathBuf,
	/// The I/O error message.
	pub reason: String,
	/// Number of markers in the template left untouched because of this
	/// failure. Zero when the slot isn't used by the template.
	pub occurrences: usize,
}

impl SlotDiagnostic {
	/// Convert into an [`OutletError`] for rendering through miette.
	pub fn to_error(&self) -> OutletError {
		OutletError::SlotFile {
			slot: self.slot.clone(),
			path: self.path.clone(),
			reason: self.reason.clone(),
		}
	}
}

/// The result of composing a template: the document plus everything a caller
/// needs to report on it.
#[derive(Debug, Clone)]
pub struct Composition {
	/// The composed document text.
	pub output: String,
	/// The markers found in the template, in document order.
	pub markers: Vec<Marker>,
	/// What happened to each marker, parallel to `markers`.
	pub outcomes: Vec<MarkerOutcome>,
	/// Per-slot file resolution failures.
	pub diagnostics: Vec<SlotDiagnostic>,
}

impl Composition {
	pub fn substituted_count(&self) -> usize {
		self.count(MarkerOutcome::Substituted)
	}

	pub fn unmatched_count(&self) -> usize {
		self.count(MarkerOutcome::Unmatched)
	}

	pub fn failed_count(&self) -> usize {
		self.count(MarkerOutcome::Failed)
	}

	/// Returns true if there are slot file failures.
	pub fn has_warnings(&self) -> bool {
		!self.diagnostics.is_empty()
	}

	/// Distinct names of markers that had no assignment, in first-seen order.
	pub fn unmatched_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = Vec::new();
		for (marker, outcome) in self.markers.iter().zip(&self.outcomes) {
			if *outcome == MarkerOutcome::Unmatched && !names.contains(&marker.name.as_str()) {
				names.push(&marker.name);
			}
		}
		names
	}

	fn count(&self, outcome: MarkerOutcome) -> usize {
		self.outcomes.iter().filter(|o| **o == outcome).count()
	}
}

/// Run the whole pipeline: scan markers, resolve assignments, compose, and
/// collect diagnostics. Per-slot failures never abort composition.
#[tracing::instrument(skip_all, fields(markers = tracing::field::Empty, slots = assignments.len()))]
pub fn compose_document(
	template: &str,
	assignments: &[SlotAssignment],
	ctx: &ResolveContext<'_>,
) -> Composition {
	let markers = scan(template);
	tracing::Span::current().record("markers", markers.len());

	let slots = resolve_assignments(assignments, ctx);
	let composed = compose(template, &markers, &slots);

	let diagnostics = slots
		.failures()
		.filter_map(|(name, resolution)| {
			let Resolution::Failed { path, reason } = resolution else {
				return None;
			};
			let occurrences = markers.iter().filter(|m| m.name == name).count();

			Some(SlotDiagnostic {
				slot: name.to_string(),
				path: path.clone(),
				reason: reason.clone(),
				occurrences,
			})
		})
		.collect();

	for name in slots.keys() {
		if !markers.iter().any(|m| &m.name == name) {
			tracing::debug!(slot = %name, "slot is not used by the template");
		}
	}

	Composition {
		output: composed.text,
		markers,
		outcomes: composed.outcomes,
		diagnostics,
	}
}

/// Where the composed document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
	/// Write to the caller-supplied stdout handle.
	Stdout,
	/// Write to a file, replacing any existing content.
	File(PathBuf),
}

/// Deliver the composed document to `target`. `stdout` is only used for
/// [`OutputTarget::Stdout`]. Failures here are fatal to the run.
pub fn deliver(
	composition: &Composition,
	target: &OutputTarget,
	stdout: &mut impl Write,
) -> OutletResult<()> {
	match target {
		OutputTarget::Stdout => {
			stdout.write_all(composition.output.as_bytes())?;
			stdout.flush()?;
		}
		OutputTarget::File(path) => {
			std::fs::write(path, &composition.output).map_err(|source| {
				OutletError::WriteOutput {
					path: path.clone(),
					source,
				}
			})?;
			tracing::debug!(path = %path.display(), "wrote composed document");
		}
	}

	Ok(())
}
