//! Shared test utilities for `ripple-core`.

use proptest::test_runner::Config as ProptestConfig;
use ripple_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::Graph;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `RIPPLE_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a `usize` graph whose node ids equal their positions.
pub(crate) fn indexed_graph(node_count: usize, edges: &[(usize, usize)]) -> Graph<usize> {
    Graph::build(0..node_count, edges.iter().copied()).expect("indexed graphs are valid")
}

/// Triangle `A-B-C` with a tail `C-D-E-F-G`, declared so the smallest label
/// has to travel the whole tail.
pub(crate) fn triangle_with_tail() -> Graph<&'static str> {
    Graph::build(
        ["A", "B", "C", "D", "E", "F", "G"],
        [
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("C", "D"),
            ("D", "E"),
            ("E", "F"),
            ("F", "G"),
        ],
    )
    .expect("fixture graph is valid")
}

/// Twenty-three single-character nodes forming one component whose minimum
/// `A` sits ten hops from the farthest node.
pub(crate) fn letter_web() -> Graph<char> {
    Graph::build(
        [
            'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'M', 'O', 'P', 'Q', 'R', 'S', 'T', 'V',
            'W', 'X', 'Y', '[', '\\', ']',
        ],
        [
            ('A', 'Q'),
            ('A', '['),
            ('C', 'G'),
            ('D', 'P'),
            ('E', 'F'),
            ('F', 'T'),
            ('F', '\\'),
            ('G', 'H'),
            ('G', 'M'),
            ('G', 'W'),
            ('H', 'R'),
            ('I', 'Q'),
            ('I', 'V'),
            ('K', '\\'),
            ('M', 'S'),
            ('M', ']'),
            ('O', 'Y'),
            ('P', 'W'),
            ('P', 'X'),
            ('R', 'Y'),
            ('S', 'W'),
            ('T', ']'),
            ('V', ']'),
        ],
    )
    .expect("fixture graph is valid")
}
