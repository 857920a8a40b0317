//! Scripted provider shared by the coordinator integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use typeahead::{Lookup, Match, Provider, Query, Responder, Subscription};

pub const WAIT: Duration = Duration::from_secs(2);
pub const QUIET: Duration = Duration::from_millis(100);

/// Parks every lookup until the test answers it through [`Script`].
pub struct ScriptedProvider {
	parked: Mutex<Sender<(String, Responder)>>,
	calls: Arc<AtomicUsize>,
}

/// Test-side handle of a [`ScriptedProvider`].
pub struct Script {
	parked: Receiver<(String, Responder)>,
	calls: Arc<AtomicUsize>,
}

pub fn scripted() -> (ScriptedProvider, Script) {
	let (tx, rx) = mpsc::channel();
	let calls = Arc::new(AtomicUsize::new(0));
	(
		ScriptedProvider {
			parked: Mutex::new(tx),
			calls: Arc::clone(&calls),
		},
		Script { parked: rx, calls },
	)
}

impl Provider for ScriptedProvider {
	fn lookup(&self, query: &Query) -> Lookup {
		self.calls.fetch_add(1, Ordering::SeqCst);
		let (responder, lookup) = Lookup::pending();
		self.parked
			.lock()
			.unwrap()
			.send((query.to_string(), responder))
			.unwrap();
		lookup
	}
}

impl Script {
	/// Wait for the next lookup and check which query it is for.
	pub fn expect(&self, query: &str) -> Responder {
		let (seen, responder) = self
			.parked
			.recv_timeout(WAIT)
			.unwrap_or_else(|err| panic!("no lookup for {query:?}: {err}"));
		assert_eq!(seen, query);
		responder
	}

	/// Assert that no further lookup is issued for a while.
	pub fn expect_none(&self) {
		if let Ok((query, _)) = self.parked.recv_timeout(QUIET) {
			panic!("unexpected lookup for {query:?}");
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

/// Prefix match of `len` bytes on `text`.
pub fn hit(text: &str, len: usize) -> Match {
	Match::prefix(text, len).unwrap()
}

/// Drain a subscription until its stream closes.
pub fn collect<T>(subscription: Subscription<T>) -> Vec<T> {
	subscription.into_iter().collect()
}
