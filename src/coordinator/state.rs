use typeahead_stream::{Envelope, Epoch};

use crate::outcome::{LookupResult, Outcome};
use crate::query::Query;

/// Whether a lookup is outstanding, and for which token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
	Idle,
	Loading(u64),
}

/// Inputs of the transition function.
pub(crate) enum Signal {
	/// A query was admitted from the input source.
	Accept(Query),
	/// A provider answered, or abandoned, the lookup with the given token.
	Settled(Envelope<Option<LookupResult>>),
	/// The input source faulted.
	Fault,
}

/// Effects requested by the transition function.
#[derive(Debug)]
pub(crate) enum Step {
	/// Raise the busy flag and invoke the provider.
	Lookup { token: u64, query: Query },
	/// Publish the outcome and lower the busy flag.
	Deliver(Outcome),
	/// The current lookup will never answer.
	Stall(u64),
	/// An answer for a superseded lookup, to be dropped.
	Discard(u64),
}

/// Per-coordinator state machine: `Idle` or `Loading(token)`.
///
/// Only the driver thread mutates it, and the epoch it advances is the single
/// source of truth for which token is current.
pub(crate) struct QueryState {
	phase: Phase,
	epoch: Epoch,
}

impl QueryState {
	pub(crate) fn new(epoch: Epoch) -> Self {
		Self {
			phase: Phase::Idle,
			epoch,
		}
	}

	pub(crate) fn phase(&self) -> Phase {
		self.phase
	}

	pub(crate) fn is_idle(&self) -> bool {
		self.phase == Phase::Idle
	}

	pub(crate) fn apply(&mut self, signal: Signal) -> Step {
		match signal {
			Signal::Accept(query) => {
				let token = self.epoch.advance();
				self.phase = Phase::Loading(token);
				Step::Lookup { token, query }
			}
			Signal::Settled(Envelope { id, payload }) => {
				if self.phase != Phase::Loading(id) {
					return Step::Discard(id);
				}
				self.phase = Phase::Idle;
				match payload {
					Some(result) => Step::Deliver(Outcome::from(result)),
					None => Step::Stall(id),
				}
			}
			Signal::Fault => {
				self.epoch.advance();
				self.phase = Phase::Idle;
				Step::Deliver(Outcome::empty())
			}
		}
	}
}
