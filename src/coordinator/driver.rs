use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, trace, warn};
use typeahead_stream::{Broadcast, Envelope, Epoch};

use super::input::InputEvent;
use super::state::{QueryState, Signal, Step};
use crate::error::InputFault;
use crate::outcome::{LookupResult, Outcome};
use crate::provider::Provider;
use crate::query::EmptyQueryPolicy;

/// Messages processed by the driver thread, in arrival order.
pub(crate) enum Event {
	Input(Option<String>),
	InputFault(InputFault),
	InputEnded,
	Settled(Envelope<Option<LookupResult>>),
}

/// Single owner of a coordinator's state machine and provider.
pub(crate) struct Driver<P> {
	provider: P,
	policy: EmptyQueryPolicy,
	state: QueryState,
	epoch: Epoch,
	events_tx: Sender<Event>,
	events_rx: Receiver<Event>,
	results: Broadcast<Outcome>,
	busy: Broadcast<bool>,
	input_open: bool,
}

impl<P: Provider> Driver<P> {
	pub(crate) fn new(
		provider: P,
		policy: EmptyQueryPolicy,
		results: Broadcast<Outcome>,
		busy: Broadcast<bool>,
	) -> Self {
		let (events_tx, events_rx) = mpsc::channel();
		let epoch = Epoch::new();
		Self {
			provider,
			policy,
			state: QueryState::new(epoch.clone()),
			epoch,
			events_tx,
			events_rx,
			results,
			busy,
			input_open: true,
		}
	}

	/// Handle used to feed input events into the driver.
	pub(crate) fn sender(&self) -> Sender<Event> {
		self.events_tx.clone()
	}

	/// Process events until the input is exhausted and no lookup is
	/// outstanding, or the input faults. Both broadcasts are closed on exit,
	/// including when a provider panics.
	pub(crate) fn run(mut self) {
		let _closing = CloseOnExit {
			results: self.results.clone(),
			busy: self.busy.clone(),
		};
		while let Ok(event) = self.events_rx.recv() {
			if !self.handle(event) {
				break;
			}
			if !self.input_open && self.state.is_idle() {
				break;
			}
		}
		debug!("query session closed after {} lookups", self.epoch.current());
	}

	fn handle(&mut self, event: Event) -> bool {
		match event {
			Event::Input(text) => {
				match self.policy.admit(text) {
					Some(query) => {
						let step = self.state.apply(Signal::Accept(query));
						self.perform(step);
					}
					None => trace!("skipping absent or empty input"),
				}
				true
			}
			Event::Settled(envelope) => {
				let step = self.state.apply(Signal::Settled(envelope));
				self.perform(step);
				true
			}
			Event::InputEnded => {
				debug!("input exhausted while {:?}", self.state.phase());
				self.input_open = false;
				true
			}
			Event::InputFault(fault) => {
				warn!("{fault}; closing query session");
				self.input_open = false;
				let step = self.state.apply(Signal::Fault);
				self.perform(step);
				false
			}
		}
	}

	fn perform(&mut self, step: Step) {
		match step {
			Step::Lookup { token, query } => {
				debug!("lookup {token} started for {query:?}");
				self.busy.publish(true);
				let lookup = self.provider.lookup(&query);
				match lookup.into_deferred().try_take() {
					Ok(answer) => {
						let step = self.state.apply(Signal::Settled(Envelope::new(token, answer)));
						self.perform(step);
					}
					Err(pending) => {
						let events = self.events_tx.clone();
						let epoch = self.epoch.clone();
						pending.on_settle(move |answer| {
							if epoch.is_stale(token) {
								trace!("lookup {token} answered after being superseded");
								return;
							}
							let _ = events.send(Event::Settled(Envelope::new(token, answer)));
						});
					}
				}
			}
			Step::Deliver(outcome) => {
				self.results.publish(outcome);
				self.busy.publish(false);
			}
			Step::Stall(token) => {
				warn!("provider dropped lookup {token} without answering");
			}
			Step::Discard(token) => {
				trace!("discarding superseded answer for lookup {token}");
			}
		}
	}
}

/// Disconnects every subscriber when the driver loop ends, however it ends.
struct CloseOnExit {
	results: Broadcast<Outcome>,
	busy: Broadcast<bool>,
}

impl Drop for CloseOnExit {
	fn drop(&mut self) {
		self.results.close();
		self.busy.close();
	}
}

/// Reports a fault if the input thread unwinds before the source ended.
struct InputWatch {
	events: Sender<Event>,
	finished: bool,
}

impl InputWatch {
	fn forward(&self, text: Option<String>) -> bool {
		self.events.send(Event::Input(text)).is_ok()
	}

	fn finish(mut self, event: Event) {
		self.finished = true;
		let _ = self.events.send(event);
	}
}

impl Drop for InputWatch {
	fn drop(&mut self) {
		if !self.finished {
			warn!("input thread stopped without ending the source");
			let fault = InputFault::new("input source panicked");
			let _ = self.events.send(Event::InputFault(fault));
		}
	}
}

/// Forward the input source into the driver until it ends or faults.
pub(crate) fn pump_input<I>(inputs: I, events: Sender<Event>)
where
	I: Iterator<Item = InputEvent>,
{
	let mut watch = InputWatch {
		events,
		finished: false,
	};
	for event in inputs {
		match event {
			Ok(text) => {
				if !watch.forward(text) {
					watch.finished = true;
					return;
				}
			}
			Err(fault) => return watch.finish(Event::InputFault(fault)),
		}
	}
	watch.finish(Event::InputEnded);
}
