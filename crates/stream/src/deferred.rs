use std::fmt;
use std::mem;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Watcher<T> = Box<dyn FnOnce(Option<T>) + Send>;

enum Slot<T> {
	/// Nobody resolved or watched the value yet.
	Pending,
	/// The value arrived before a watcher was attached.
	Ready(T),
	/// The resolver was dropped before producing a value.
	Abandoned,
	/// A watcher is waiting for the value.
	Watched(Watcher<T>),
	/// The watcher has been invoked.
	Done,
}

type SharedSlot<T> = Arc<Mutex<Slot<T>>>;

fn lock<T>(slot: &SharedSlot<T>) -> MutexGuard<'_, Slot<T>> {
	slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Create a connected one-shot pair.
///
/// The [`Resolver`] may be sent to another thread and consumed exactly once;
/// the [`Deferred`] hands the value to a callback as soon as both sides are
/// in place.
#[must_use]
pub fn deferred<T: Send + 'static>() -> (Resolver<T>, Deferred<T>) {
	let slot = Arc::new(Mutex::new(Slot::Pending));
	(
		Resolver {
			slot: Some(Arc::clone(&slot)),
		},
		Deferred { slot },
	)
}

/// Consuming side of a one-shot value.
pub struct Deferred<T> {
	slot: SharedSlot<T>,
}

impl<T: Send + 'static> Deferred<T> {
	/// A value that is available immediately.
	#[must_use]
	pub fn ready(value: T) -> Self {
		Self {
			slot: Arc::new(Mutex::new(Slot::Ready(value))),
		}
	}

	/// Whether the value has already been produced.
	#[must_use]
	pub fn is_ready(&self) -> bool {
		matches!(*lock(&self.slot), Slot::Ready(_))
	}

	/// Invoke `watcher` once the value settles.
	///
	/// The watcher receives `Some(value)` when the resolver produced a value
	/// and `None` when it was dropped without one. If the outcome is already
	/// known the watcher runs immediately on the calling thread; otherwise it
	/// runs on whichever thread settles the resolver. No lock is held while it
	/// runs.
	pub fn on_settle(self, watcher: impl FnOnce(Option<T>) + Send + 'static) {
		let mut slot = lock(&self.slot);
		match mem::replace(&mut *slot, Slot::Done) {
			Slot::Pending => *slot = Slot::Watched(Box::new(watcher)),
			Slot::Ready(value) => {
				drop(slot);
				watcher(Some(value));
			}
			Slot::Abandoned => {
				drop(slot);
				watcher(None);
			}
			Slot::Watched(_) | Slot::Done => {}
		}
	}

	/// Take the outcome if it is already known, handing the deferred back
	/// while it is still pending.
	pub fn try_take(self) -> Result<Option<T>, Self> {
		let mut slot = lock(&self.slot);
		match mem::replace(&mut *slot, Slot::Done) {
			Slot::Ready(value) => Ok(Some(value)),
			Slot::Abandoned => Ok(None),
			other => {
				*slot = other;
				drop(slot);
				Err(self)
			}
		}
	}

	/// Block the calling thread until the value settles.
	pub fn wait(self) -> Option<T> {
		let (tx, rx) = mpsc::channel();
		self.on_settle(move |value| {
			let _ = tx.send(value);
		});
		rx.recv().ok().flatten()
	}
}

impl<T> fmt::Debug for Deferred<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Deferred(..)")
	}
}

/// Producing side of a one-shot value.
///
/// Dropping a resolver without calling [`Resolver::resolve`] settles the
/// paired [`Deferred`] as abandoned.
pub struct Resolver<T> {
	slot: Option<SharedSlot<T>>,
}

impl<T> Resolver<T> {
	/// Produce the value, waking the watcher if one is attached.
	pub fn resolve(mut self, value: T) {
		if let Some(slot) = self.slot.take() {
			settle(&slot, Some(value));
		}
	}
}

fn settle<T>(slot: &SharedSlot<T>, value: Option<T>) {
	let mut guard = lock(slot);
	match mem::replace(&mut *guard, Slot::Done) {
		Slot::Pending => {
			*guard = match value {
				Some(value) => Slot::Ready(value),
				None => Slot::Abandoned,
			};
		}
		Slot::Watched(watcher) => {
			drop(guard);
			watcher(value);
		}
		other => *guard = other,
	}
}

impl<T> Drop for Resolver<T> {
	fn drop(&mut self) {
		if let Some(slot) = self.slot.take() {
			settle(&slot, None);
		}
	}
}

impl<T> fmt::Debug for Resolver<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Resolver(..)")
	}
}
