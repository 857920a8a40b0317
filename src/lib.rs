//! Latest-wins typeahead coordination.
//!
//! The crate turns a stream of raw text inputs into a stream of up-to-date
//! lookup [`Outcome`]s plus a busy flag. Lookups are delegated to a
//! [`Provider`]; answers for superseded queries are never delivered and a
//! failing lookup is reported as a value instead of ending the stream.
//!
//! ```no_run
//! use typeahead::providers::PrefixProvider;
//! use typeahead::{coordinate, input_channel};
//!
//! let (input, source) = input_channel();
//! let (results, busy) = coordinate(source, PrefixProvider::countries());
//! let busy = busy.subscribe();
//! let results = results.subscribe();
//!
//! input.send_text("It");
//! assert_eq!(busy.recv(), Ok(true));
//! let outcome = results.recv().unwrap();
//! assert_eq!(outcome.matches_or_empty()[0].text(), "Italy");
//! ```

pub mod app_dirs;
pub mod coordinator;
pub mod error;
pub mod logging;
mod matches;
mod outcome;
pub mod provider;
pub mod providers;
mod query;

pub use typeahead_stream::Subscription;

pub use crate::coordinator::input::channel as input_channel;
pub use crate::coordinator::{
	BusyStream, CoordinatorOptions, InputEvent, InputReceiver, InputSender, QueryCoordinator,
	ResultStream, SharedStream, coordinate,
};
pub use crate::error::{CatalogError, InputFault, LookupError, MatchError};
pub use crate::matches::Match;
pub use crate::outcome::{LookupResult, Outcome, ResultState};
pub use crate::provider::{Lookup, Provider, Responder};
pub use crate::query::{EmptyQueryPolicy, Query};
