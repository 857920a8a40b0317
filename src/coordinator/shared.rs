use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use typeahead_stream::{Broadcast, Subscription};

use crate::outcome::Outcome;

type Launch = Box<dyn FnOnce() + Send>;

/// Starts a coordinator's threads the first time anybody subscribes.
pub(crate) struct Ignition {
	launch: Mutex<Option<Launch>>,
}

impl Ignition {
	pub(crate) fn new(launch: impl FnOnce() + Send + 'static) -> Arc<Self> {
		Arc::new(Self {
			launch: Mutex::new(Some(Box::new(launch))),
		})
	}

	pub(crate) fn fire(&self) {
		let launch = self
			.launch
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.take();
		if let Some(launch) = launch {
			launch();
		}
	}

	pub(crate) fn is_fired(&self) -> bool {
		self.launch
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.is_none()
	}
}

/// Hot stream shared by every subscriber of one coordinator.
///
/// Subscribing never re-runs the pipeline: all subscriptions are fed by the
/// same driver thread, and a late subscriber only sees values published after
/// it joined. The first subscription to the [`ResultStream`] starts the
/// driver; the [`BusyStream`] only reports on a running pipeline, so subscribe
/// to it first when every transition matters.
pub struct SharedStream<T> {
	hub: Broadcast<T>,
	ignition: Arc<Ignition>,
	ignites: bool,
}

/// Latest outcome of every surviving query.
pub type ResultStream = SharedStream<Outcome>;

/// `true` while a lookup is outstanding.
pub type BusyStream = SharedStream<bool>;

impl<T> SharedStream<T> {
	/// A stream whose first subscription starts the pipeline.
	pub(crate) fn igniting(hub: Broadcast<T>, ignition: Arc<Ignition>) -> Self {
		Self {
			hub,
			ignition,
			ignites: true,
		}
	}

	/// A stream that observes the pipeline without starting it.
	pub(crate) fn passive(hub: Broadcast<T>, ignition: Arc<Ignition>) -> Self {
		Self {
			hub,
			ignition,
			ignites: false,
		}
	}

	/// Register a subscriber.
	pub fn subscribe(&self) -> Subscription<T> {
		let subscription = self.hub.subscribe();
		if self.ignites {
			self.ignition.fire();
		}
		subscription
	}

	/// Number of live subscribers.
	#[must_use]
	pub fn subscriber_count(&self) -> usize {
		self.hub.subscriber_count()
	}

	/// Whether the coordinator has been started by a subscription.
	#[must_use]
	pub fn is_connected(&self) -> bool {
		self.ignition.is_fired()
	}

	/// Whether the coordinator finished and disconnected its subscribers.
	#[must_use]
	pub fn is_closed(&self) -> bool {
		self.hub.is_closed()
	}
}

impl<T> Clone for SharedStream<T> {
	fn clone(&self) -> Self {
		Self {
			hub: self.hub.clone(),
			ignition: Arc::clone(&self.ignition),
			ignites: self.ignites,
		}
	}
}

impl<T> fmt::Debug for SharedStream<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SharedStream")
			.field("hub", &self.hub)
			.field("connected", &self.is_connected())
			.finish()
	}
}
