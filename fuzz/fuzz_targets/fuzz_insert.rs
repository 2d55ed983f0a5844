#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // One document per line; rejected lines must leave the tree intact
    let mut tree = gstree::SuffixTree::new();
    for chunk in data.split(|&b| b == b'\n') {
        let _ = tree.insert_bytes(chunk);
    }
    tree.must_be_valid();

    for doc in tree.strings() {
        let chars: Vec<char> = doc.chars().collect();
        for start in 0..=chars.len() {
            let suffix: String = chars[start..].iter().collect();
            assert!(tree.contains(&suffix));
        }
    }

    let lcs = tree.longest_common_substring();
    assert!(tree.strings().all(|doc| doc.contains(&lcs)));
});
