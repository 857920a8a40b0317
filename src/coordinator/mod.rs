//! Latest-wins coordination between an input source and a [`Provider`].
//!
//! [`QueryCoordinator::coordinate`] spawns two threads once the
//! [`ResultStream`] is first subscribed:
//!
//! - `typeahead-input` forwards the input iterator into the driver;
//! - `typeahead-driver` owns the `Idle`/`Loading(token)` state machine, calls
//!   the provider and publishes to the [`ResultStream`] and [`BusyStream`].
//!
//! Each accepted query mints a new token. Answers carry the token of the
//! query that requested them and are dropped unless it is still current, so
//! a slow early lookup can never overwrite a fresh one. A failed lookup is an
//! ordinary [`Outcome::Failure`](crate::Outcome::Failure) value and never
//! ends the streams.

mod driver;
pub(crate) mod input;
mod shared;
mod state;


use std::thread;

use typeahead_stream::Broadcast;

use self::driver::{Driver, pump_input};
pub use self::input::{InputEvent, InputReceiver, InputSender};
use self::shared::Ignition;
pub use self::shared::{BusyStream, ResultStream, SharedStream};
use crate::provider::Provider;
use crate::query::EmptyQueryPolicy;

/// Tunables for a [`QueryCoordinator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinatorOptions {
	/// What to do with input events carrying an empty string.
	pub empty_queries: EmptyQueryPolicy,
}

impl CoordinatorOptions {
	#[must_use]
	pub fn with_empty_queries(mut self, policy: EmptyQueryPolicy) -> Self {
		self.empty_queries = policy;
		self
	}
}

/// Turns a stream of text inputs into a stream of outcomes and a busy flag.
pub struct QueryCoordinator<P> {
	provider: P,
	options: CoordinatorOptions,
}

impl<P: Provider> QueryCoordinator<P> {
	/// Create a coordinator with default options.
	pub fn new(provider: P) -> Self {
		Self {
			provider,
			options: CoordinatorOptions::default(),
		}
	}

	#[must_use]
	pub fn with_options(mut self, options: CoordinatorOptions) -> Self {
		self.options = options;
		self
	}

	/// Wire `inputs` to the provider.
	///
	/// Nothing runs until the result stream is subscribed for the first time;
	/// subscribe to the busy stream before that to observe every transition.
	/// From then on the provider is invoked once per accepted query no
	/// matter how many subscribers exist. Both streams close once `inputs` is
	/// exhausted and the last outstanding lookup has been delivered, or right
	/// after the input faults.
	pub fn coordinate<I>(self, inputs: I) -> (ResultStream, BusyStream)
	where
		I: IntoIterator<Item = InputEvent>,
		I::IntoIter: Send + 'static,
	{
		let results = Broadcast::new();
		let busy = Broadcast::new();
		let driver = Driver::new(
			self.provider,
			self.options.empty_queries,
			results.clone(),
			busy.clone(),
		);
		let inputs = inputs.into_iter();

		let ignition = Ignition::new(move || {
			let events = driver.sender();
			thread::Builder::new()
				.name("typeahead-driver".into())
				.spawn(move || driver.run())
				.expect("failed to spawn typeahead driver thread");
			thread::Builder::new()
				.name("typeahead-input".into())
				.spawn(move || pump_input(inputs, events))
				.expect("failed to spawn typeahead input thread");
		});

		(
			SharedStream::igniting(results, ignition.clone()),
			SharedStream::passive(busy, ignition),
		)
	}
}

/// Coordinate `inputs` with `provider` using default options.
pub fn coordinate<I, P>(inputs: I, provider: P) -> (ResultStream, BusyStream)
where
	I: IntoIterator<Item = InputEvent>,
	I::IntoIter: Send + 'static,
	P: Provider,
{
	QueryCoordinator::new(provider).coordinate(inputs)
}
