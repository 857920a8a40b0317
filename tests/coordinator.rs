mod common;

use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use common::{QUIET, WAIT, collect, hit, scripted};
use typeahead::providers::PrefixProvider;
use typeahead::{LookupError, Match, Outcome, ResultState, coordinate, input_channel};

fn texts(outcome: &Outcome) -> Vec<String> {
	outcome
		.matches_or_empty()
		.iter()
		.map(|found| found.text().to_string())
		.collect()
}

#[test]
fn single_query_delivers_its_matches() {
	let (provider, script) = scripted();
	let (input, source) = input_channel();
	let (results, busy) = coordinate(source, provider);
	let busy_sub = busy.subscribe();
	let result_sub = results.subscribe();

	input.send_text("It");
	script.expect("It").resolve(vec![hit("Italy", 2)]);
	drop(input);

	let delivered = collect(result_sub);
	assert_eq!(delivered.len(), 1);
	assert_eq!(delivered[0].matches(), Some(&[hit("Italy", 2)][..]));
	assert_eq!(delivered[0].matches().unwrap()[0].range(), 0..2);
	assert_eq!(collect(busy_sub), vec![true, false]);
}

#[test]
fn failing_lookup_is_delivered_as_a_value() {
	let (provider, script) = scripted();
	let (input, source) = input_channel();
	let (results, busy) = coordinate(source, provider);
	let busy_sub = busy.subscribe();
	let result_sub = results.subscribe();

	input.send_text("It");
	script.expect("It").fail(LookupError::new("E1"));
	drop(input);

	let delivered = collect(result_sub);
	assert_eq!(delivered.len(), 1);
	assert_eq!(delivered[0].state(), ResultState::Failed);
	assert_eq!(delivered[0].error().unwrap().cause().to_string(), "E1");
	assert_eq!(collect(busy_sub), vec![true, false]);
}

#[test]
fn newer_query_supersedes_pending_one() {
	let (provider, script) = scripted();
	let (input, source) = input_channel();
	let (results, busy) = coordinate(source, provider);
	let busy_sub = busy.subscribe();
	let result_sub = results.subscribe();

	input.send_text("I");
	let first = script.expect("I");
	input.send_text("It");
	script.expect("It").resolve(vec![hit("Italy", 2)]);

	first.resolve(vec![hit("India", 1), hit("Italy", 1)]);
	drop(input);

	let delivered = collect(result_sub);
	assert_eq!(delivered.len(), 1);
	assert_eq!(texts(&delivered[0]), vec!["Italy"]);
	assert_eq!(collect(busy_sub), vec![true, true, false]);
}

#[test]
fn failure_does_not_stop_later_queries() {
	let (provider, script) = scripted();
	let (input, source) = input_channel();
	let (results, busy) = coordinate(source, provider);
	let busy_sub = busy.subscribe();
	let result_sub = results.subscribe();

	input.send_text("Ita");
	script.expect("Ita").fail(LookupError::new("E1"));
	assert!(result_sub.recv_timeout(WAIT).unwrap().is_failure());

	input.send_text("Ital");
	script.expect("Ital").resolve(vec![hit("Italy", 4)]);
	assert!(result_sub.recv_timeout(WAIT).unwrap().is_success());

	input.send_text("Italy");
	script.expect("Italy").resolve(vec![hit("Italy", 5)]);
	drop(input);

	let rest = collect(result_sub);
	assert_eq!(rest.len(), 1);
	assert_eq!(rest[0].matches().unwrap()[0].matched(), "Italy");

	let flags = collect(busy_sub);
	assert_eq!(flags.iter().filter(|busy| **busy).count(), 3);
	assert_eq!(flags.iter().filter(|busy| !**busy).count(), 3);
}

#[test]
fn only_the_last_of_a_burst_is_delivered() {
	let (provider, script) = scripted();
	let (input, source) = input_channel();
	let (results, busy) = coordinate(source, provider);
	let busy_sub = busy.subscribe();
	let result_sub = results.subscribe();

	let queries = ["C", "Ch", "Chi", "Chil", "Chile"];
	let mut parked = Vec::new();
	for query in queries {
		input.send_text(query);
		parked.push(script.expect(query));
	}

	// Answer newest first so every older answer arrives after it.
	for (responder, query) in parked.into_iter().zip(queries).rev() {
		responder.resolve(vec![hit("Chile", query.len())]);
	}
	drop(input);

	let delivered = collect(result_sub);
	assert_eq!(delivered.len(), 1);
	assert_eq!(delivered[0].matches().unwrap()[0].matched(), "Chile");

	let flags = collect(busy_sub);
	assert_eq!(flags, vec![true, true, true, true, true, false]);
}

#[test]
fn subscribers_share_one_lookup_per_query() {
	let (provider, script) = scripted();
	let (input, source) = input_channel();
	let (results, busy) = coordinate(source, provider);
	let busy_a = busy.subscribe();
	let busy_b = busy.subscribe();
	let results_a = results.subscribe();
	let results_b = results.clone().subscribe();
	assert_eq!(results.subscriber_count(), 2);

	input.send_text("Pe");
	script.expect("Pe").resolve(vec![hit("Peru", 2)]);
	input.send_text("Po");
	script.expect("Po").resolve(vec![hit("Poland", 2), hit("Portugal", 2)]);
	drop(input);
	script.expect_none();
	assert_eq!(script.calls(), 2);

	let seen_a = collect(results_a);
	let seen_b = collect(results_b);
	assert_eq!(seen_a.len(), 2);
	let texts_a: Vec<_> = seen_a.iter().map(texts).collect();
	let texts_b: Vec<_> = seen_b.iter().map(texts).collect();
	assert_eq!(texts_a, texts_b);
	assert_eq!(texts_a[1], vec!["Poland", "Portugal"]);
	assert_eq!(collect(busy_a), collect(busy_b));
}

#[test]
fn late_subscriber_sees_only_later_outcomes() {
	let (provider, script) = scripted();
	let (input, source) = input_channel();
	let (results, _busy) = coordinate(source, provider);
	let early = results.subscribe();

	input.send_text("Ke");
	script.expect("Ke").resolve(vec![hit("Kenya", 2)]);
	assert_eq!(texts(&early.recv_timeout(WAIT).unwrap()), vec!["Kenya"]);

	let late = results.subscribe();
	assert_eq!(late.recv_timeout(QUIET).unwrap_err(), RecvTimeoutError::Timeout);
	assert_eq!(script.calls(), 1);

	input.send_text("Ki");
	script.expect("Ki").resolve(vec![hit("Kiribati", 2)]);
	drop(input);

	assert_eq!(collect(early).len(), 1);
	let late_seen = collect(late);
	assert_eq!(late_seen.len(), 1);
	assert_eq!(texts(&late_seen[0]), vec!["Kiribati"]);
}

#[test]
fn absent_values_never_reach_the_provider() {
	let (provider, script) = scripted();
	let (input, source) = input_channel();
	let (results, _busy) = coordinate(source, provider);
	let result_sub = results.subscribe();

	input.send(None);
	input.send_text("");
	script.expect_none();

	input.send_text("Om");
	script.expect("Om").resolve(vec![hit("Oman", 2)]);
	drop(input);

	assert_eq!(collect(result_sub).len(), 1);
	assert_eq!(script.calls(), 1);
}

#[test]
fn delayed_provider_only_answers_the_latest_query() {
	let provider = PrefixProvider::countries().latency(Duration::from_millis(200));
	let (input, source) = input_channel();
	let (results, busy) = coordinate(source, provider);
	let busy_sub = busy.subscribe();
	let result_sub = results.subscribe();

	for query in ["S", "Sw", "Swe"] {
		input.send_text(query);
	}
	drop(input);

	let delivered = collect(result_sub);
	assert_eq!(delivered.len(), 1);
	let found: Vec<&str> = delivered[0].matches_or_empty().iter().map(Match::text).collect();
	assert_eq!(found, vec!["Sweden"]);
	assert_eq!(collect(busy_sub), vec![true, true, true, false]);
}
