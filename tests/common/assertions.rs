//! Domain-specific assertion macros for pulse harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *what* query invariant was violated.

// ---------------------------------------------------------------------------
// Result-set assertions
// ---------------------------------------------------------------------------

/// Assert that a filtered result set contains exactly the given vmids, in
/// order.
///
/// ```rust
/// assert_ids!(results, [101, 102]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($results:expr, [$($vmid:expr),* $(,)?]) => {{
        let results: &[pulse_core::Guest] = &$results;
        let actual: Vec<&str> = results.iter().map(|g| g.vmid.as_str()).collect();
        let expected: Vec<String> = vec![$($vmid.to_string()),*];
        let expected_refs: Vec<&str> = expected.iter().map(String::as_str).collect();
        pretty_assertions::assert_eq!(
            actual, expected_refs,
            "filtered result set did not match expected vmids"
        );
    }};
}

/// Assert that a result set contains exactly the given vmids, ignoring
/// order. Use when the query has no sort and no ordering is promised.
#[macro_export]
macro_rules! assert_ids_unordered {
    ($results:expr, [$($vmid:expr),* $(,)?]) => {{
        let results: &[pulse_core::Guest] = &$results;
        let mut actual: Vec<&str> = results.iter().map(|g| g.vmid.as_str()).collect();
        actual.sort_unstable();
        let mut expected: Vec<String> = vec![$($vmid.to_string()),*];
        expected.sort_unstable();
        let expected_refs: Vec<&str> = expected.iter().map(String::as_str).collect();
        pretty_assertions::assert_eq!(
            actual, expected_refs,
            "filtered result set did not match expected vmids (order ignored)"
        );
    }};
}

/// Assert that every guest in a result set satisfies a predicate.
///
/// ```rust
/// assert_results_all!(results, |g| g.role() == Role::Primary);
/// ```
#[macro_export]
macro_rules! assert_results_all {
    ($results:expr, $pred:expr) => {{
        let results: &[pulse_core::Guest] = &$results;
        let pred = $pred;
        let failing: Vec<&str> = results
            .iter()
            .filter(|g| !pred(g))
            .map(|g| g.name.as_str())
            .collect();
        if !failing.is_empty() {
            panic!(
                "assert_results_all! failed: {} of {} guests did not satisfy predicate: {:?}",
                failing.len(),
                results.len(),
                failing
            );
        }
    }};
}

/// Assert that no guest in a result set satisfies a predicate.
#[macro_export]
macro_rules! assert_results_none {
    ($results:expr, $pred:expr) => {{
        let results: &[pulse_core::Guest] = &$results;
        let pred = $pred;
        let matching: Vec<&str> = results
            .iter()
            .filter(|g| pred(g))
            .map(|g| g.name.as_str())
            .collect();
        if !matching.is_empty() {
            panic!(
                "assert_results_none! failed: {} guests unexpectedly matched: {:?}",
                matching.len(),
                matching
            );
        }
    }};
}
