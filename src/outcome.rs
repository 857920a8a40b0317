use crate::error::LookupError;
use crate::matches::Match;

/// Result of one lookup, as produced by a provider.
pub type LookupResult = Result<Vec<Match>, LookupError>;

/// The success or failure of one query's lookup.
///
/// An empty `Success` means "no results" and is deliberately distinct from a
/// `Failure`.
#[derive(Debug, Clone)]
pub enum Outcome {
	/// Ordered matches for the query.
	Success(Vec<Match>),
	/// The provider failed; the stream carrying this value stays open.
	Failure(LookupError),
}

/// Coarse classification of an [`Outcome`] for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultState {
	/// At least one match, with the number of matches.
	Matches(usize),
	/// The lookup succeeded without any match.
	NoResults,
	/// The lookup failed.
	Failed,
}

impl Outcome {
	/// A successful outcome without matches.
	#[must_use]
	pub fn empty() -> Self {
		Self::Success(Vec::new())
	}

	/// Matches carried by a successful outcome.
	#[must_use]
	pub fn matches(&self) -> Option<&[Match]> {
		match self {
			Self::Success(matches) => Some(matches),
			Self::Failure(_) => None,
		}
	}

	/// Error carried by a failed outcome.
	#[must_use]
	pub fn error(&self) -> Option<&LookupError> {
		match self {
			Self::Success(_) => None,
			Self::Failure(error) => Some(error),
		}
	}

	#[must_use]
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success(_))
	}

	#[must_use]
	pub fn is_failure(&self) -> bool {
		matches!(self, Self::Failure(_))
	}

	/// Classify the outcome.
	#[must_use]
	pub fn state(&self) -> ResultState {
		match self {
			Self::Success(matches) if matches.is_empty() => ResultState::NoResults,
			Self::Success(matches) => ResultState::Matches(matches.len()),
			Self::Failure(_) => ResultState::Failed,
		}
	}

	/// Matches of a successful outcome, or an empty list for failures.
	#[must_use]
	pub fn matches_or_empty(&self) -> &[Match] {
		self.matches().unwrap_or(&[])
	}

	pub fn into_result(self) -> LookupResult {
		match self {
			Self::Success(matches) => Ok(matches),
			Self::Failure(error) => Err(error),
		}
	}
}

impl From<LookupResult> for Outcome {
	fn from(result: LookupResult) -> Self {
		match result {
			Ok(matches) => Self::Success(matches),
			Err(error) => Self::Failure(error),
		}
	}
}

impl From<LookupError> for Outcome {
	fn from(error: LookupError) -> Self {
		Self::Failure(error)
	}
}
