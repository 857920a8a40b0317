//! Prefix matching over an in-memory catalog.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::trace;

use super::countries::COUNTRIES;
use crate::error::{CatalogError, LookupError};
use crate::matches::Match;
use crate::outcome::LookupResult;
use crate::provider::{Lookup, Provider};
use crate::query::Query;

/// Returns every catalog entry that starts with the query, in catalog order.
///
/// Each match covers the leading part of the entry that matched, so `"it"`
/// against `"Italy"` yields `Italy` with range `0..2` when comparison is case
/// insensitive. With a non-zero [`latency`](Self::latency) lookups answer from
/// a background thread, which makes the provider handy for exercising
/// supersession by hand.
#[derive(Debug, Clone)]
pub struct PrefixProvider {
	entries: Arc<Vec<String>>,
	case_sensitive: bool,
	limit: Option<usize>,
	latency: Duration,
}

impl PrefixProvider {
	pub fn new<I, S>(entries: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			entries: Arc::new(entries.into_iter().map(Into::into).collect()),
			case_sensitive: false,
			limit: None,
			latency: Duration::ZERO,
		}
	}

	/// Provider over the built-in list of country names.
	pub fn countries() -> Self {
		Self::new(COUNTRIES.iter().copied())
	}

	/// Load a catalog with one entry per line.
	///
	/// Surrounding whitespace is trimmed; blank lines and lines starting with
	/// `#` are ignored.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
		let path = path.as_ref();
		let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let entries: Vec<&str> = contents
			.lines()
			.map(str::trim)
			.filter(|line| !line.is_empty() && !line.starts_with('#'))
			.collect();
		if entries.is_empty() {
			return Err(CatalogError::Empty {
				path: path.to_path_buf(),
			});
		}
		Ok(Self::new(entries))
	}

	#[must_use]
	pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
		self.case_sensitive = case_sensitive;
		self
	}

	/// Cap the number of matches returned per lookup.
	#[must_use]
	pub fn limit(mut self, limit: Option<usize>) -> Self {
		self.limit = limit;
		self
	}

	/// Delay every answer by `latency`.
	#[must_use]
	pub fn latency(mut self, latency: Duration) -> Self {
		self.latency = latency;
		self
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn entries(&self) -> &[String] {
		&self.entries
	}

	/// Compute the matches for `query` on the calling thread.
	pub fn search(&self, query: &str) -> LookupResult {
		let limit = self.limit.unwrap_or(usize::MAX);
		self.entries
			.iter()
			.filter_map(|entry| {
				prefix_len(entry, query, self.case_sensitive)
					.map(|len| Match::prefix(entry.as_str(), len))
			})
			.take(limit)
			.collect::<Result<Vec<_>, _>>()
			.map_err(LookupError::new)
	}
}

impl Provider for PrefixProvider {
	fn lookup(&self, query: &Query) -> Lookup {
		if self.latency.is_zero() {
			return Lookup::settled(self.search(query));
		}

		let (responder, lookup) = Lookup::pending();
		let provider = self.clone();
		let query = query.clone();
		thread::spawn(move || {
			thread::sleep(provider.latency);
			trace!("answering {query:?} after {:?}", provider.latency);
			responder.settle(provider.search(&query));
		});
		lookup
	}
}

/// Byte length of the part of `entry` matching `query`, if `entry` starts with it.
fn prefix_len(entry: &str, query: &str, case_sensitive: bool) -> Option<usize> {
	if case_sensitive {
		return entry.starts_with(query).then_some(query.len());
	}

	let mut chars = entry.char_indices();
	let mut end = 0;
	for wanted in query.chars() {
		let (offset, found) = chars.next()?;
		if !found.to_lowercase().eq(wanted.to_lowercase()) {
			return None;
		}
		end = offset + found.len_utf8();
	}
	Some(end)
}
