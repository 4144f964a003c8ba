//! Response header collapsing
//!
//! Origin responses may carry several values per header; envelopes only
//! have room for one, so the first value observed wins.

use std::collections::BTreeMap;

/// Canonical `Title-Case` form of a header name (`x-test` -> `X-Test`).
pub fn canonical_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    out
}

/// Collapse (name, value) pairs in origin order, keeping the first value
/// seen for each canonical name.
pub fn collapse<I, K, V>(pairs: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut headers = BTreeMap::new();
    for (name, value) in pairs {
        headers
            .entry(canonical_name(name.as_ref()))
            .or_insert_with(|| value.into());
    }
    headers
}
