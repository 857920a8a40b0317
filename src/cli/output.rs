use std::io::{self, Write};

use anyhow::Result;
use serde_json::json;
use typeahead::{Match, Outcome};

use super::OutputFormat;

/// Render a match with its matched segment in brackets, e.g. `[It]aly`.
fn format_match(found: &Match) -> String {
	let (before, matched, after) = found.segments();
	format!("{before}[{matched}]{after}")
}

/// Format an outcome as plain text lines.
pub(crate) fn format_plain(outcome: &Outcome) -> String {
	match outcome {
		Outcome::Success(matches) if matches.is_empty() => "No results".to_string(),
		Outcome::Success(matches) => matches
			.iter()
			.map(format_match)
			.collect::<Vec<_>>()
			.join("\n"),
		Outcome::Failure(error) => format!("Error: {error}"),
	}
}

/// Format an outcome as a single-line JSON object.
pub(crate) fn format_outcome_json(outcome: &Outcome) -> Result<String> {
	let payload = match outcome {
		Outcome::Success(matches) => json!({
			"status": "success",
			"matches": matches,
		}),
		Outcome::Failure(error) => json!({
			"status": "failure",
			"error": error.to_string(),
		}),
	};

	Ok(serde_json::to_string(&payload)?)
}

/// Writes delivered outcomes in the selected format.
pub(crate) struct OutcomePrinter<W> {
	format: OutputFormat,
	out: W,
	printed: usize,
}

impl<W: Write> OutcomePrinter<W> {
	pub(crate) fn new(format: OutputFormat, out: W) -> Self {
		Self {
			format,
			out,
			printed: 0,
		}
	}

	pub(crate) fn print(&mut self, outcome: &Outcome) -> Result<()> {
		match self.format {
			OutputFormat::Plain => {
				if self.printed > 0 {
					writeln!(self.out)?;
				}
				writeln!(self.out, "{}", format_plain(outcome))?;
			}
			OutputFormat::Json => writeln!(self.out, "{}", format_outcome_json(outcome)?)?,
		}
		self.out.flush()?;
		self.printed += 1;
		Ok(())
	}

	pub(crate) fn printed(&self) -> usize {
		self.printed
	}

	#[cfg(test)]
	pub(crate) fn into_inner(self) -> W {
		self.out
	}
}

/// Report a busy transition on stderr.
pub(crate) fn print_busy(busy: bool) {
	let _ = writeln!(io::stderr(), "busy: {busy}");
}

#[cfg(test)]
mod tests {
	use serde_json::Value;
	use typeahead::LookupError;

	use super::*;

	fn italy() -> Outcome {
		Outcome::Success(vec![Match::prefix("Italy", 2).unwrap()])
	}

	#[test]
	fn plain_format_brackets_matched_segment() {
		assert_eq!(format_plain(&italy()), "[It]aly");
		assert_eq!(format_plain(&Outcome::empty()), "No results");
		let failure = Outcome::Failure(LookupError::new("offline"));
		assert_eq!(format_plain(&failure), "Error: provider lookup failed: offline");
	}

	#[test]
	fn json_format_includes_match_ranges() {
		let json = format_outcome_json(&italy()).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["status"], "success");
		assert_eq!(value["matches"][0]["text"], "Italy");
		assert_eq!(value["matches"][0]["start"], 0);
		assert_eq!(value["matches"][0]["end"], 2);

		let failure = Outcome::Failure(LookupError::new("offline"));
		let value: Value = serde_json::from_str(&format_outcome_json(&failure).unwrap()).unwrap();
		assert_eq!(value["status"], "failure");
		assert_eq!(value["error"], "provider lookup failed: offline");
	}

	#[test]
	fn plain_outcomes_are_separated_by_blank_lines() {
		let mut printer = OutcomePrinter::new(OutputFormat::Plain, Vec::new());
		printer.print(&italy()).unwrap();
		printer.print(&Outcome::empty()).unwrap();
		assert_eq!(printer.printed(), 2);
		let text = String::from_utf8(printer.into_inner()).unwrap();
		assert_eq!(text, "[It]aly\n\nNo results\n");
	}
}
