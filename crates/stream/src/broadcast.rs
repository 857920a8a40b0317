use std::fmt;
use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

struct Hub<T> {
	subscribers: Vec<Sender<T>>,
	closed: bool,
}

/// Publish-once, deliver-to-all fan-out.
///
/// Every [`Subscription`] owns an unbounded channel, so a slow subscriber
/// never blocks the publisher or its siblings. Subscribers only observe values
/// published after they joined. Dropped subscriptions are pruned on the next
/// publish.
pub struct Broadcast<T> {
	hub: Arc<Mutex<Hub<T>>>,
}

impl<T> Broadcast<T> {
	/// Create a hub without subscribers.
	#[must_use]
	pub fn new() -> Self {
		Self {
			hub: Arc::new(Mutex::new(Hub {
				subscribers: Vec::new(),
				closed: false,
			})),
		}
	}

	fn lock(&self) -> MutexGuard<'_, Hub<T>> {
		self.hub.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Register a new subscriber.
	///
	/// Subscribing to a closed hub yields a subscription that is already
	/// disconnected.
	pub fn subscribe(&self) -> Subscription<T> {
		let (tx, rx) = mpsc::channel();
		let mut hub = self.lock();
		if !hub.closed {
			hub.subscribers.push(tx);
		}
		Subscription { rx }
	}

	/// Number of subscribers that were alive at the last publish.
	#[must_use]
	pub fn subscriber_count(&self) -> usize {
		self.lock().subscribers.len()
	}

	/// Stop delivering values and disconnect every subscriber.
	///
	/// Values that were already published stay buffered in the subscriptions.
	pub fn close(&self) {
		let mut hub = self.lock();
		hub.closed = true;
		hub.subscribers.clear();
	}

	/// Whether [`Broadcast::close`] was called.
	#[must_use]
	pub fn is_closed(&self) -> bool {
		self.lock().closed
	}
}

impl<T: Clone> Broadcast<T> {
	/// Deliver `value` to every live subscriber, returning how many received it.
	pub fn publish(&self, value: T) -> usize {
		let mut hub = self.lock();
		hub.subscribers.retain(|tx| tx.send(value.clone()).is_ok());
		hub.subscribers.len()
	}
}

impl<T> Clone for Broadcast<T> {
	fn clone(&self) -> Self {
		Self {
			hub: Arc::clone(&self.hub),
		}
	}
}

impl<T> Default for Broadcast<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> fmt::Debug for Broadcast<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let hub = self.lock();
		f.debug_struct("Broadcast")
			.field("subscribers", &hub.subscribers.len())
			.field("closed", &hub.closed)
			.finish()
	}
}

/// Receiving end of a [`Broadcast`].
pub struct Subscription<T> {
	rx: Receiver<T>,
}

impl<T> Subscription<T> {
	/// Block until the next value arrives or the hub closes.
	pub fn recv(&self) -> Result<T, RecvError> {
		self.rx.recv()
	}

	/// Block for at most `timeout` waiting for the next value.
	pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
		self.rx.recv_timeout(timeout)
	}

	/// Return a buffered value without blocking.
	pub fn try_recv(&self) -> Result<T, TryRecvError> {
		self.rx.try_recv()
	}

	/// Blocking iterator that ends once the hub closes and the buffer drains.
	pub fn iter(&self) -> mpsc::Iter<'_, T> {
		self.rx.iter()
	}

	/// Drain every value that is already buffered.
	pub fn drain(&self) -> Vec<T> {
		self.rx.try_iter().collect()
	}
}

impl<T> IntoIterator for Subscription<T> {
	type Item = T;
	type IntoIter = mpsc::IntoIter<T>;

	fn into_iter(self) -> Self::IntoIter {
		self.rx.into_iter()
	}
}

impl<T> fmt::Debug for Subscription<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Subscription(..)")
	}
}
