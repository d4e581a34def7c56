use crate::Marker;
use crate::Resolution;
use crate::SlotTable;

/// What happened to a single marker during composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerOutcome {
	/// Replaced with resolved content.
	Substituted,
	/// No assignment for the slot; the marker was kept.
	Unmatched,
	/// The slot's file could not be read; the marker was kept.
	Failed,
}

/// The output of a single composition pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composed {
	/// The composed document.
	pub text: String,
	/// One outcome per marker, in document order.
	pub outcomes: Vec<MarkerOutcome>,
}

/// Replace each marker span with its slot's resolved content.
///
/// `markers` must come from scanning `template` (ordered and
/// non-overlapping). Markers with no assignment or a failed file reference are
/// copied through unchanged. Text between markers is never touched. A marker
/// that overlaps an earlier one or lies outside `template` is skipped and
/// reported as [`MarkerOutcome::Unmatched`].
pub fn compose(template: &str, markers: &[Marker], slots: &SlotTable) -> Composed {
	let mut text = String::with_capacity(template.len());
	let mut outcomes = Vec::with_capacity(markers.len());
	let mut cursor = 0;

	for marker in markers {
		let span = marker.span();
		// Overlapping or out-of-range spans are not spliced but still get an
		// outcome so `outcomes` stays parallel to `markers`.
		if span.start < cursor || span.end > template.len() {
			outcomes.push(MarkerOutcome::Unmatched);
			continue;
		}

		text.push_str(&template[cursor..span.start]);

		let outcome = match slots.get(&marker.name) {
			Some(Resolution::Inline(content) | Resolution::File { content, .. }) => {
				text.push_str(content);
				MarkerOutcome::Substituted
			}
			Some(Resolution::Failed { .. }) => {
				text.push_str(&template[span.clone()]);
				MarkerOutcome::Failed
			}
			None => {
				text.push_str(&template[span.clone()]);
				MarkerOutcome::Unmatched
			}
		};

		outcomes.push(outcome);
		cursor = span.end;
	}

	text.push_str(&template[cursor..]);

	Composed { text, outcomes }
}
