use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::InputFault;

/// One event of the raw input source: a present text, an absent value, or a
/// fault that ends the source.
pub type InputEvent = Result<Option<String>, InputFault>;

/// Create a push-style input source.
///
/// The receiver is an iterator that ends once every sender has been dropped,
/// which is how the coordinator learns that no more queries will arrive.
#[must_use]
pub fn channel() -> (InputSender, InputReceiver) {
	let (tx, rx) = mpsc::channel();
	(InputSender { tx }, InputReceiver { rx })
}

/// Feeds text into an [`InputReceiver`], typically from a text field's change
/// handler.
#[derive(Clone, Debug)]
pub struct InputSender {
	tx: Sender<InputEvent>,
}

impl InputSender {
	/// Submit the current text.
	pub fn send_text(&self, text: impl Into<String>) -> bool {
		self.send(Some(text.into()))
	}

	/// Submit a raw, possibly absent, value.
	pub fn send(&self, text: Option<String>) -> bool {
		self.tx.send(Ok(text)).is_ok()
	}

	/// Report that the source broke; the coordinator stops after this.
	pub fn fail(self, fault: InputFault) -> bool {
		self.tx.send(Err(fault)).is_ok()
	}
}

/// Receiving half of [`channel`], consumed by the coordinator.
#[derive(Debug)]
pub struct InputReceiver {
	rx: Receiver<InputEvent>,
}

impl Iterator for InputReceiver {
	type Item = InputEvent;

	fn next(&mut self) -> Option<Self::Item> {
		self.rx.recv().ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn receiver_yields_events_until_senders_drop() {
		let (tx, rx) = channel();
		let second = tx.clone();
		assert!(tx.send_text("It"));
		assert!(second.send(None));
		assert!(tx.fail(InputFault::new("gone")));
		drop(second);

		let events: Vec<_> = rx.collect();
		assert_eq!(events.len(), 3);
		assert_eq!(events[0].as_ref().unwrap().as_deref(), Some("It"));
		assert_eq!(events[1].as_ref().unwrap(), &None);
		assert!(events[2].is_err());
	}
}
