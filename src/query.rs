use std::fmt;
use std::ops::Deref;

/// One submitted text input to be looked up.
///
/// A query carries no identity beyond the lookup it triggers; the coordinator
/// tags it with a token when it is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
	/// Wrap `text` as a query without applying any admission policy.
	pub fn new(text: impl Into<String>) -> Self {
		Self(text.into())
	}

	/// The query text.
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Deref for Query {
	type Target = str;

	fn deref(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for Query {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Query {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Query {
	fn from(text: &str) -> Self {
		Self::new(text)
	}
}

impl From<String> for Query {
	fn from(text: String) -> Self {
		Self(text)
	}
}

/// How the coordinator treats an input event carrying an empty string.
///
/// Absent values are always skipped; this only decides the fate of `""`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyQueryPolicy {
	/// Drop empty strings like absent values.
	#[default]
	Skip,
	/// Look up empty strings like any other query.
	Lookup,
}

impl EmptyQueryPolicy {
	/// Turn a raw input event into a query, or `None` when it must be skipped.
	#[must_use]
	pub fn admit(self, text: Option<String>) -> Option<Query> {
		let text = text?;
		match self {
			Self::Skip if text.is_empty() => None,
			_ => Some(Query(text)),
		}
	}

	/// Parse the configuration spelling of the policy.
	#[must_use]
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"skip" => Some(Self::Skip),
			"lookup" => Some(Self::Lookup),
			_ => None,
		}
	}

	/// Configuration spelling of the policy.
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Skip => "skip",
			Self::Lookup => "lookup",
		}
	}
}
