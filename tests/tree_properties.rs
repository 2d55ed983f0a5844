//! Property tests checking the tree against brute-force string scans.

use gstree::{Occurrence, SuffixTree, TreeConfig};
use proptest::prelude::*;
use std::collections::HashSet;

/// Build a tree that validates itself after every insert
fn checked_tree(docs: &[String]) -> SuffixTree {
    let mut tree = SuffixTree::with_config(TreeConfig {
        validate_on_insert: true,
        ..Default::default()
    });
    for doc in docs {
        tree.insert(doc).unwrap();
    }
    tree
}

/// All occurrences of `pattern` found by scanning every document
fn scan(docs: &[String], pattern: &str) -> Vec<Occurrence> {
    let pattern: Vec<char> = pattern.chars().collect();
    let mut hits = Vec::new();
    for (id, doc) in docs.iter().enumerate() {
        let chars: Vec<char> = doc.chars().collect();
        if pattern.len() > chars.len() {
            continue;
        }
        for offset in 0..=chars.len() - pattern.len() {
            if chars[offset..offset + pattern.len()] == pattern[..] {
                hits.push(Occurrence::new(id as u32, offset));
            }
        }
    }
    hits
}

fn substrings(doc: &str) -> Vec<String> {
    let chars: Vec<char> = doc.chars().collect();
    let mut out = Vec::new();
    for start in 0..chars.len() {
        for end in start + 1..=chars.len() {
            out.push(chars[start..end].iter().collect());
        }
    }
    out
}

fn is_common(docs: &[String], s: &str) -> bool {
    docs.iter().all(|d| d.contains(s))
}

/// Length in characters of the longest substring common to every document
fn brute_force_lcs_len(docs: &[String]) -> usize {
    substrings(&docs[0])
        .into_iter()
        .filter(|s| is_common(docs, s))
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0)
}

fn dna() -> impl Strategy<Value = String> {
    "[ACGT]{0,40}"
}

fn small_alphabet() -> impl Strategy<Value = String> {
    "[ab日]{1,24}"
}

proptest! {
    #[test]
    fn contains_every_substring(docs in prop::collection::vec(small_alphabet(), 1..4)) {
        let tree = checked_tree(&docs);
        for doc in &docs {
            for s in substrings(doc) {
                prop_assert!(tree.contains(&s), "missing {:?}", s);
            }
        }
    }

    #[test]
    fn find_all_matches_scan(
        docs in prop::collection::vec(dna(), 1..5),
        pattern in "[ACGT]{1,4}",
    ) {
        let tree = checked_tree(&docs);
        let found = tree.find_all(&pattern);
        let expected = scan(&docs, &pattern);

        prop_assert_eq!(tree.contains(&pattern), !expected.is_empty());
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn find_all_has_no_duplicates(docs in prop::collection::vec(small_alphabet(), 1..4)) {
        let tree = checked_tree(&docs);
        let hits = tree.find_all("a");
        let unique: HashSet<_> = hits.iter().collect();
        prop_assert_eq!(unique.len(), hits.len());
    }

    #[test]
    fn lcs_is_common_and_maximal(docs in prop::collection::vec("[ACG]{1,16}", 2..4)) {
        let tree = checked_tree(&docs);
        let lcs = tree.longest_common_substring();

        prop_assert!(is_common(&docs, &lcs));
        prop_assert_eq!(lcs.chars().count(), brute_force_lcs_len(&docs));

        // Ties resolve to the smallest common substring of that length
        if !lcs.is_empty() {
            let smallest = substrings(&docs[0])
                .into_iter()
                .filter(|s| s.chars().count() == lcs.chars().count() && is_common(&docs, s))
                .min()
                .unwrap();
            prop_assert_eq!(lcs, smallest);
        }
    }

    #[test]
    fn str_round_trips(docs in prop::collection::vec(small_alphabet(), 0..4)) {
        let tree = checked_tree(&docs);
        for (id, doc) in docs.iter().enumerate() {
            prop_assert_eq!(tree.str(id as u32).unwrap(), doc.as_str());
        }
        let all: Vec<&str> = tree.strings().collect();
        prop_assert_eq!(all, docs.iter().map(String::as_str).collect::<Vec<_>>());
    }
}

#[test]
fn gattaca_scenario() {
    let tree = SuffixTree::from_documents(["GATTACA"]).unwrap();
    assert!(tree.contains("TTAC"));
    assert!(!tree.contains("GGG"));

    let hits: HashSet<_> = tree.find_all("A").into_iter().collect();
    let expected: HashSet<_> = [(0, 1), (0, 4), (0, 6)]
        .into_iter()
        .map(|(d, o)| Occurrence::new(d, o))
        .collect();
    assert_eq!(hits, expected);
}

#[test]
fn two_document_lcs_scenario() {
    let tree = SuffixTree::from_documents(["ABCDEFXNARFO", "XBCDYYFNBARFX"]).unwrap();
    let lcs = tree.longest_common_substring();
    assert_eq!(lcs.len(), 3);
    assert!(lcs == "BCD" || lcs == "ARF");
}

#[test]
fn empty_tree_scenario() {
    let tree = SuffixTree::new();
    assert!(!tree.contains("x"));
    assert!(tree.find_all("x").is_empty());
    assert_eq!(tree.longest_common_substring(), "");
}

#[test]
fn every_suffix_scenario() {
    let text = "cdddcdc";
    let tree = SuffixTree::from_documents([text]).unwrap();
    tree.must_be_valid();
    for start in 0..=text.len() {
        assert!(tree.contains(&text[start..]));
    }
}

#[test]
fn identical_documents_are_attributed_separately() {
    let docs = vec!["ACGTACGT".to_string(), "ACGTACGT".to_string()];
    let tree = checked_tree(&docs);
    assert_eq!(tree.find_all("GTA"), scan(&docs, "GTA"));
    assert_eq!(tree.find_all("GTA").len(), 2);
    assert_eq!(tree.longest_common_substring(), "ACGTACGT");
}

#[test]
fn long_repetitive_document() {
    let doc = "ab".repeat(500) + &"a".repeat(300);
    let docs = vec![doc];
    let tree = checked_tree(&docs);
    assert_eq!(tree.find_all("aab").len(), 0);
    assert_eq!(tree.find_all("ba"), scan(&docs, "ba"));
}
