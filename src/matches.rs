use std::ops::Range;

use serde::Serialize;

use crate::error::MatchError;

/// A single candidate result and the part of it that matched the query.
///
/// The range is expressed in bytes and is guaranteed to be a valid sub-range
/// of [`Match::text`] that starts and ends on character boundaries, so
/// slicing with it never panics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Match {
	text: String,
	#[serde(flatten)]
	range: MatchedRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
struct MatchedRange {
	start: usize,
	end: usize,
}

impl Match {
	/// Build a match, validating that `range` lies within `text`.
	pub fn new(text: impl Into<String>, range: Range<usize>) -> Result<Self, MatchError> {
		let text = text.into();
		let Range { start, end } = range;
		if start > end || end > text.len() {
			return Err(MatchError::OutOfBounds {
				start,
				end,
				len: text.len(),
			});
		}
		for offset in [start, end] {
			if !text.is_char_boundary(offset) {
				return Err(MatchError::NotCharBoundary { offset });
			}
		}
		Ok(Self {
			text,
			range: MatchedRange { start, end },
		})
	}

	/// Build a match whose first `len` bytes matched.
	pub fn prefix(text: impl Into<String>, len: usize) -> Result<Self, MatchError> {
		Self::new(text, 0..len)
	}

	/// Full candidate text.
	#[must_use]
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Byte range of the matched part.
	#[must_use]
	pub fn range(&self) -> Range<usize> {
		self.range.start..self.range.end
	}

	/// The matched part of the text.
	#[must_use]
	pub fn matched(&self) -> &str {
		&self.text[self.range()]
	}

	/// Split the text into `(before, matched, after)`.
	#[must_use]
	pub fn segments(&self) -> (&str, &str, &str) {
		let MatchedRange { start, end } = self.range;
		(
			&self.text[..start],
			&self.text[start..end],
			&self.text[end..],
		)
	}

	/// Take ownership of the candidate text.
	#[must_use]
	pub fn into_text(self) -> String {
		self.text
	}
}
