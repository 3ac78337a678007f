//! Test harness for running fixture cases with stochastic variations

use crate::common::generators::NOISE_PREFIX;
use crate::common::{Gen, TestCase};
use isccfg_core::{parse_with, to_value, ParseOptions};
use serde_json::Value;

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub seed: u64,
    pub errors: Vec<String>,
}

/// Outcome of a parse, reduced to something comparable with a fixture.
#[derive(Debug)]
enum Outcome {
    Tree(Value),
    Error(String),
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Tree(value) => write!(f, "{}", value),
            Outcome::Error(code) => write!(f, "error {}", code),
        }
    }
}

fn options_for(case: &TestCase) -> ParseOptions {
    if case.strict {
        ParseOptions::strict()
    } else {
        ParseOptions::default()
    }
}

fn run_parser(input: &str, options: &ParseOptions) -> Outcome {
    match parse_with(input.as_bytes(), options) {
        Ok(root) => match to_value(&root) {
            Ok(value) => Outcome::Tree(value),
            Err(err) => Outcome::Error(format!("{:?}", err.code())),
        },
        Err(err) => Outcome::Error(format!("{:?}", err.code())),
    }
}

fn expected_outcome(case: &TestCase) -> Outcome {
    match (&case.json, &case.error) {
        (Some(json), _) => Outcome::Tree(
            serde_json::from_str(json)
                .unwrap_or_else(|e| panic!("fixture {:?} has invalid json: {}", case.id, e)),
        ),
        (None, Some(code)) => Outcome::Error(code.clone()),
        (None, None) => unreachable!("loader rejects cases without expectation"),
    }
}

/// Drop the generated noise statements from a parsed tree.
fn strip_noise(outcome: Outcome) -> Outcome {
    match outcome {
        Outcome::Tree(Value::Object(mut map)) => {
            map.retain(|key, _| !key.starts_with(NOISE_PREFIX));
            Outcome::Tree(Value::Object(map))
        }
        other => other,
    }
}

/// Compare rendered outcomes, so key order counts as well as content.
fn compare(expected: &Outcome, actual: &Outcome) -> Vec<String> {
    if expected.to_string() == actual.to_string() {
        Vec::new()
    } else {
        vec![format!("expected {}, got {}", expected, actual)]
    }
}

/// Run a single test case (canonical, no variations)
pub fn run_test(case: &TestCase) -> TestResult {
    let expected = expected_outcome(case);
    let actual = run_parser(&case.isc, &options_for(case));
    let errors = compare(&expected, &actual);

    TestResult {
        passed: errors.is_empty(),
        input: case.isc.clone(),
        expected: expected.to_string(),
        actual: actual.to_string(),
        seed: 0,
        errors,
    }
}

/// Run test with stochastic variations
///
/// Applies independent variations that must not change the result:
/// - 40% chance of a noise statement above
/// - random indentation per line
/// - random blank lines (sometimes CRLF)
/// - 30% chance of a trailing comment per line
pub fn run_with_variations(case: &TestCase, gen: &mut Gen) -> TestResult {
    let mut input = String::new();

    if gen.chance(0.4) {
        input.push_str(&gen.noise_statement());
    }

    for line in case.isc.split('\n') {
        input.push_str(&gen.blank_lines());
        if !line.is_empty() {
            input.push_str(&gen.indent());
            input.push_str(line);
            if gen.chance(0.3) {
                input.push_str(&gen.comment());
            }
        }
        input.push('\n');
    }

    let expected = expected_outcome(case);
    let actual = strip_noise(run_parser(&input, &options_for(case)));
    let errors = compare(&expected, &actual);

    TestResult {
        passed: errors.is_empty(),
        input,
        expected: expected.to_string(),
        actual: actual.to_string(),
        seed: gen.seed,
        errors,
    }
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!("Seed: {} (set ISCCFG_TEST_SEED={} to reproduce)", self.seed, self.seed);
        eprintln!("\nInput:");
        eprintln!("{}", self.input);
        eprintln!("\nExpected: {}", self.expected);
        eprintln!("Actual:   {}", self.actual);
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
