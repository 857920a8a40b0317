//! The lookup capability consumed by the coordinator.
//!
//! A [`Provider`] turns a [`Query`] into a [`Lookup`]: a one-shot handle that
//! is either answered on the spot ([`Lookup::resolved`], [`Lookup::failed`])
//! or later, from any thread, through the [`Responder`] returned by
//! [`Lookup::pending`]. Providers do not need to support cancellation; the
//! coordinator simply ignores answers for superseded queries.

use std::sync::Arc;

use typeahead_stream::{Deferred, Resolver, deferred};

use crate::error::LookupError;
use crate::matches::Match;
use crate::outcome::LookupResult;
use crate::query::Query;

/// Backend performing the text-to-match lookup.
///
/// The coordinator calls `lookup` from its driver thread, once per accepted
/// query, and never concurrently for the same coordinator. Long running work
/// should be moved off that thread and answered through a [`Responder`].
pub trait Provider: Send + 'static {
	fn lookup(&self, query: &Query) -> Lookup;
}

impl<P> Provider for Arc<P>
where
	P: Provider + Sync + ?Sized,
{
	fn lookup(&self, query: &Query) -> Lookup {
		(**self).lookup(query)
	}
}

impl Provider for Box<dyn Provider> {
	fn lookup(&self, query: &Query) -> Lookup {
		(**self).lookup(query)
	}
}

/// Pending answer of a provider for one query.
#[derive(Debug)]
pub struct Lookup {
	inner: Deferred<LookupResult>,
}

impl Lookup {
	/// A lookup answered synchronously with `matches`.
	#[must_use]
	pub fn resolved(matches: Vec<Match>) -> Self {
		Self::settled(Ok(matches))
	}

	/// A lookup that failed synchronously.
	#[must_use]
	pub fn failed(error: impl Into<LookupError>) -> Self {
		Self::settled(Err(error.into()))
	}

	/// A lookup answered synchronously with `result`.
	#[must_use]
	pub fn settled(result: LookupResult) -> Self {
		Self {
			inner: Deferred::ready(result),
		}
	}

	/// A lookup that will be answered later through the returned responder.
	#[must_use]
	pub fn pending() -> (Responder, Self) {
		let (resolver, inner) = deferred();
		(Responder { inner: resolver }, Self { inner })
	}

	/// Whether the provider already answered.
	#[must_use]
	pub fn is_settled(&self) -> bool {
		self.inner.is_ready()
	}

	/// Block until the provider answers; `None` if the responder was dropped.
	pub fn wait(self) -> Option<LookupResult> {
		self.inner.wait()
	}

	pub(crate) fn into_deferred(self) -> Deferred<LookupResult> {
		self.inner
	}
}

/// Answers a [`Lookup`] created by [`Lookup::pending`].
///
/// Every method consumes the responder, so a lookup is answered at most once.
/// Dropping it unanswered abandons the lookup: no outcome is delivered for the
/// query and the busy indicator stays raised, as if the provider never
/// completed.
#[derive(Debug)]
pub struct Responder {
	inner: Resolver<LookupResult>,
}

impl Responder {
	/// Answer with the matches for the query.
	pub fn resolve(self, matches: Vec<Match>) {
		self.settle(Ok(matches));
	}

	/// Report that the lookup failed.
	pub fn fail(self, error: impl Into<LookupError>) {
		self.settle(Err(error.into()));
	}

	pub fn settle(self, result: LookupResult) {
		self.inner.resolve(result);
	}
}
