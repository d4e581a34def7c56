use serde::Deserialize;
use serde::Serialize;

/// A single location in a template. `line` and `column` are 1-indexed,
/// `offset` is the 0-indexed byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
	pub line: usize,
	pub column: usize,
	pub offset: usize,
}

impl Point {
	pub fn new(line: usize, column: usize, offset: usize) -> Self {
		Self {
			line,
			column,
			offset,
		}
	}
}

/// The span of a marker in a template. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
	pub start: Point,
	pub end: Point,
}

impl Position {
	pub fn new(
		start_line: usize,
		start_column: usize,
		start_offset: usize,
		end_line: usize,
		end_column: usize,
		end_offset: usize,
	) -> Self {
		Self {
			start: Point::new(start_line, start_column, start_offset),
			end: Point::new(end_line, end_column, end_offset),
		}
	}

	/// The byte range covered by this position.
	pub fn range(&self) -> std::ops::Range<usize> {
		self.start.offset..self.end.offset
	}
}

/// Pre-computed table of line-start byte offsets for offset-to-point
/// conversion. Built once per template in O(n), then each lookup is a binary
/// search.
pub(crate) struct LineTable<'a> {
	content: &'a str,
	/// Byte offsets of the start of each line. `line_starts[0]` is always 0.
	line_starts: Vec<usize>,
}

impl<'a> LineTable<'a> {
	pub(crate) fn new(content: &'a str) -> Self {
		let mut line_starts = vec![0];
		for (i, byte) in content.bytes().enumerate() {
			if byte == b'\n' {
				line_starts.push(i + 1);
			}
		}
		Self {
			content,
			line_starts,
		}
	}

	/// Columns count characters, not bytes, so multi-byte text before a
	/// marker doesn't skew the reported column.
	pub(crate) fn point(&self, offset: usize) -> Point {
		let line_idx = match self.line_starts.binary_search(&offset) {
			Ok(exact) => exact,
			Err(insert) => insert.saturating_sub(1),
		};
		let line_start = self.line_starts[line_idx];
		let column = self.content[line_start..offset].chars().count() + 1;

		Point::new(line_idx + 1, column, offset)
	}

	pub(crate) fn position(&self, range: std::ops::Range<usize>) -> Position {
		Position {
			start: self.point(range.start),
			end: self.point(range.end),
		}
	}
}
