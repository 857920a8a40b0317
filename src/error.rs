use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Opaque cause attached to a failed lookup.
pub type LookupCause = Arc<dyn StdError + Send + Sync>;

/// The only failure a coordinator ever surfaces, always wrapped in
/// [`Outcome::Failure`](crate::Outcome::Failure) rather than ending a stream.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
	/// The provider reported an error while looking up a query.
	#[error("provider lookup failed: {0}")]
	ProviderLookupFailed(#[source] LookupCause),
}

impl LookupError {
	/// Wrap any error (or message) reported by a provider.
	pub fn new(cause: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
		Self::ProviderLookupFailed(Arc::from(cause.into()))
	}

	/// The error reported by the provider.
	#[must_use]
	pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
		match self {
			Self::ProviderLookupFailed(cause) => cause.as_ref(),
		}
	}
}

/// Fault raised by the input source itself, as opposed to a provider.
#[derive(Debug, Clone, Error)]
#[error("input source failed: {message}")]
pub struct InputFault {
	message: String,
}

impl InputFault {
	/// Describe why the input source stopped.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	/// Human readable reason.
	#[must_use]
	pub fn message(&self) -> &str {
		&self.message
	}
}

impl From<io::Error> for InputFault {
	fn from(err: io::Error) -> Self {
		Self::new(err.to_string())
	}
}

/// Rejected [`Match`](crate::Match) construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatchError {
	/// The range does not fit inside the candidate text.
	#[error("matched range {start}..{end} is not within a text of {len} bytes")]
	OutOfBounds {
		start: usize,
		end: usize,
		len: usize,
	},

	/// An offset splits a UTF-8 character.
	#[error("offset {offset} is not on a character boundary")]
	NotCharBoundary { offset: usize },
}

/// Failure loading a candidate catalog for the prefix provider.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// Reading the catalog file failed.
	#[error("failed to read catalog {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The catalog file exists but holds no entries.
	#[error("catalog {} contains no entries", .path.display())]
	Empty { path: PathBuf },
}
