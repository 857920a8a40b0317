use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Shared supersession counter.
///
/// One owner calls [`Epoch::advance`] whenever a new request replaces the
/// previous one; any clone may ask whether a token is still current. Tokens
/// start at `1`, so `0` never identifies a live request.
#[derive(Clone, Debug, Default)]
pub struct Epoch {
	latest: Arc<AtomicU64>,
}

impl Epoch {
	/// Create a counter with no request issued yet.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Mint the token for a new request, superseding every earlier token.
	pub fn advance(&self) -> u64 {
		self.latest
			.fetch_add(1, AtomicOrdering::AcqRel)
			.wrapping_add(1)
	}

	/// Token of the most recent request, `0` if none was issued.
	#[must_use]
	pub fn current(&self) -> u64 {
		self.latest.load(AtomicOrdering::Acquire)
	}

	/// Check whether `token` still identifies the most recent request.
	#[must_use]
	pub fn is_current(&self, token: u64) -> bool {
		token != 0 && self.current() == token
	}

	/// Check if `token` has been superseded by a newer request.
	#[must_use]
	pub fn is_stale(&self, token: u64) -> bool {
		!self.is_current(token)
	}
}
