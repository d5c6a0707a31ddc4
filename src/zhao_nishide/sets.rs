//! Feature-string generators.
//!
//! A keyword `w` is encoded as the multiset `S_K(w)` and a query `q` as
//! the multiset `S_T(q)`. The encodings are built so that `S_T(q)` is a
//! sub-multiset of `S_K(w)` whenever `q` matches `w`, which lets a server
//! test candidate matches through Bloom-filter membership alone.
//!
//! Multiplicity is encoded inside the strings themselves: a character
//! pair occurring `c` times contributes the occurrence-tagged entries
//! `1:...` through `c:...`. Deduplicating before the tagging step would
//! break the sub-multiset relation for keywords with repeated characters.

use std::collections::HashMap;

/// `S_K(w)`: concatenation of the order, pair-with-distance and
/// pair-without-distance encodings of a keyword.
pub fn s_k(w: &str) -> Vec<String> {
    let mut set = s_k_o(w);
    set.extend(s_k_p1(w));
    set.extend(s_k_p2(w));
    set
}

/// `S_K^(o)(w)`: one `"{position}:{character}"` entry per character,
/// positions 1-based.
pub fn s_k_o(w: &str) -> Vec<String> {
    w.chars()
        .enumerate()
        .map(|(n, c)| format!("{}:{}", n + 1, c))
        .collect()
}

/// `S_K^(p1)(w)`: occurrence-tagged
/// `"{occurrence}:{distance}:{char1},{char2}"` entries, one per ordered
/// character pair.
pub fn s_k_p1(w: &str) -> Vec<String> {
    let chars: Vec<char> = w.chars().collect();
    let mut pairs = Vec::new();
    for c1 in 0..chars.len() {
        for c2 in c1 + 1..chars.len() {
            pairs.push(format!("{}:{},{}", c2 - c1, chars[c1], chars[c2]));
        }
    }
    tag_occurrences(pairs)
}

/// `S_K^(p2)(w)`: occurrence-tagged `"{occurrence}:{char1},{char2}"`
/// entries, one per ordered character pair, distances dropped.
pub fn s_k_p2(w: &str) -> Vec<String> {
    let chars: Vec<char> = w.chars().collect();
    let mut pairs = Vec::new();
    for c1 in 0..chars.len() {
        for c2 in c1 + 1..chars.len() {
            pairs.push(format!("{},{}", chars[c1], chars[c2]));
        }
    }
    tag_occurrences(pairs)
}

/// `S_T(q)`: concatenation of the order, pair-with-distance and
/// pair-without-distance encodings of a query.
pub fn s_t(q: &str) -> Vec<String> {
    let mut set = s_t_o(q);
    set.extend(s_t_p1(q));
    set.extend(s_t_p2(q));
    set
}

/// `S_T^(o)(q)`: position entries for the concrete characters before the
/// first `*`. Positions past a `*` are unknown and contribute nothing.
pub fn s_t_o(q: &str) -> Vec<String> {
    q.chars()
        .take_while(|c| *c != '*')
        .enumerate()
        .filter(|(_, c)| *c != '_')
        .map(|(n, c)| format!("{}:{}", n + 1, c))
        .collect()
}

/// `S_T^(p1)(q)`: occurrence-tagged pair-with-distance entries for every
/// pair of concrete characters within a `*`-free segment of the query.
/// Pair counts pool across segments.
pub fn s_t_p1(q: &str) -> Vec<String> {
    let mut pairs = Vec::new();
    for group in q.split('*') {
        let chars: Vec<char> = group.chars().collect();
        for c1 in 0..chars.len() {
            if chars[c1] == '_' {
                continue;
            }
            for c2 in c1 + 1..chars.len() {
                if chars[c2] == '_' {
                    continue;
                }
                pairs.push(format!("{}:{},{}", c2 - c1, chars[c1], chars[c2]));
            }
        }
    }
    tag_occurrences(pairs)
}

/// `S_T^(p2)(q)`: the keyword pair encoding applied to the query with all
/// wildcard characters removed.
pub fn s_t_p2(q: &str) -> Vec<String> {
    let stripped: String = q.chars().filter(|c| *c != '*' && *c != '_').collect();
    s_k_p2(&stripped)
}

/// Prefixes each entry with its 1-based running occurrence count, so a
/// key appearing `c` times yields the tags `1:` through `c:` exactly once
/// each.
fn tag_occurrences(pairs: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    pairs
        .into_iter()
        .map(|pair| {
            let count = counts.entry(pair.clone()).or_insert(0);
            *count += 1;
            format!("{}:{}", *count, pair)
        })
        .collect()
}
