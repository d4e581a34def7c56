use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

use crate::Position;
use crate::lexer::RawToken;
use crate::lexer::lex;
use crate::position::LineTable;

/// A single `<!-- outlet: NAME -->` occurrence in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
	/// The slot name, trimmed of surrounding whitespace. Case-sensitive.
	pub name: String,
	/// Span of the whole marker, from `<!--` through `-->`.
	pub position: Position,
}

impl Marker {
	/// The byte range of the marker in the template it was scanned from.
	pub fn span(&self) -> Range<usize> {
		self.position.range()
	}
}

/// States for the marker state machine.
#[derive(Debug, Clone, Copy)]
enum ScanState {
	/// Not inside any html comment.
	Outside,
	/// After `<!--`, expecting the `outlet` keyword.
	Opened,
	/// After the keyword, expecting `:`.
	Keyword,
	/// After `:`; everything up to `-->` is the name.
	Name { name_start: usize },
	/// Inside an ordinary html comment, waiting for `-->`.
	Comment,
}

/// Walks the raw token stream and collects markers.
struct MarkerWalker<'a> {
	source: &'a str,
	tokens: Vec<(RawToken, Range<usize>)>,
	state: ScanState,
	/// Byte offset of the `<!--` that opened the current candidate.
	open_at: usize,
	spans: Vec<(String, Range<usize>)>,
}

impl<'a> MarkerWalker<'a> {
	fn new(source: &'a str) -> Self {
		Self {
			source,
			tokens: lex(source),
			state: ScanState::Outside,
			open_at: 0,
			spans: vec![],
		}
	}

	fn process(&mut self) {
		let tokens = std::mem::take(&mut self.tokens);

		for (token, span) in tokens {
			// A fresh opener always abandons the current candidate.
			if token == RawToken::CommentOpen {
				self.open_at = span.start;
				self.state = ScanState::Opened;
				continue;
			}

			self.state = match (self.state, token) {
				(ScanState::Outside, _) => ScanState::Outside,
				(ScanState::Opened | ScanState::Keyword, RawToken::Whitespace) => self.state,
				(ScanState::Opened, RawToken::Keyword) => ScanState::Keyword,
				(ScanState::Keyword, RawToken::Colon) => {
					ScanState::Name {
						name_start: span.end,
					}
				}
				(ScanState::Name { name_start }, RawToken::CommentClose) => {
					let name = self.source[name_start..span.start].trim();
					if name.is_empty() {
						tracing::trace!(offset = self.open_at, "skipping outlet marker without a name");
					} else {
						self.spans.push((name.to_string(), self.open_at..span.end));
					}
					ScanState::Outside
				}
				(ScanState::Name { .. }, _) => self.state,
				(_, RawToken::CommentClose) => ScanState::Outside,
				_ => ScanState::Comment,
			};
		}
	}
}

/// Scan a template for outlet markers, in document order.
///
/// Malformed markers (unterminated, missing keyword or colon, empty name) are
/// not reported and stay literal text.
pub fn scan(template: &str) -> Vec<Marker> {
	let mut walker = MarkerWalker::new(template);
	walker.process();

	let lines = LineTable::new(template);
	let markers: Vec<Marker> = walker
		.spans
		.into_iter()
		.map(|(name, range)| {
			Marker {
				name,
				position: lines.position(range),
			}
		})
		.collect();

	tracing::debug!(count = markers.len(), "scanned template for outlet markers");
	markers
}

/// Returns true if the template still contains at least one outlet marker.
pub fn has_markers(template: &str) -> bool {
	!scan(template).is_empty()
}
