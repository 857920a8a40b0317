//! Streaming primitives for delivering results across threads.
//!
//! The crate is deliberately small and dependency free. It provides:
//!
//! - [`Broadcast`] / [`Subscription`]: publish a value once and deliver a clone
//!   to every live subscriber, each backed by its own [`mpsc`] channel.
//! - [`Deferred`] / [`Resolver`]: a one-shot value that may be produced on any
//!   thread and consumed through a callback, without parking a thread per
//!   pending value.
//! - [`Epoch`]: a monotonically increasing token used to recognise superseded
//!   work.
//! - [`Envelope`]: a payload tagged with the token of the request that produced
//!   it.
//!
//! Basic usage:
//! ```
//! use std::time::Duration;
//!
//! use typeahead_stream::{Broadcast, Epoch, deferred};
//!
//! let hub = Broadcast::new();
//! let first = hub.subscribe();
//! let second = hub.subscribe();
//!
//! let epoch = Epoch::new();
//! let token = epoch.advance();
//!
//! let (resolver, pending) = deferred::<String>();
//! let publisher = hub.clone();
//! pending.on_settle(move |value| {
//!     if epoch.is_current(token) {
//!         if let Some(value) = value {
//!             publisher.publish(value);
//!         }
//!     }
//! });
//! resolver.resolve("hello".to_string());
//!
//! assert_eq!(first.recv_timeout(Duration::from_secs(1)).unwrap(), "hello");
//! assert_eq!(second.recv_timeout(Duration::from_secs(1)).unwrap(), "hello");
//! ```
//! [`mpsc`]: std::sync::mpsc

mod broadcast;
mod deferred;
mod epoch;

pub use broadcast::{Broadcast, Subscription};
pub use deferred::{Deferred, Resolver, deferred};
pub use epoch::Epoch;

/// Payload correlated with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<P> {
	/// Identifier of the originating request, usually minted by an [`Epoch`].
	pub id: u64,
	/// Payload delivered to the consumer.
	pub payload: P,
}

impl<P> Envelope<P> {
	/// Wrap `payload` for request `id`.
	#[must_use]
	pub fn new(id: u64, payload: P) -> Self {
		Self { id, payload }
	}

	/// Whether this envelope still belongs to the current request of `epoch`.
	#[must_use]
	pub fn is_current(&self, epoch: &Epoch) -> bool {
		epoch.is_current(self.id)
	}
}
