/// Derives the dispatch identifier for a named handler:
/// `action_id("user", "fetchUser")` is `USER__FETCH-USER`.
pub fn action_id(prefix: &str, name: &str) -> String {
    format!("{}__{}", prefix.to_uppercase(), hyphenate(name))
}

pub(crate) fn lifecycle_ids(base: &str) -> [String; 3] {
    [
        format!("{}_BEGIN", base),
        format!("{}_SUCCESS", base),
        format!("{}_FAILED", base),
    ]
}

// A new token starts at every ASCII uppercase letter.
fn hyphenate(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (index, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() && index != 0 {
            out.push('-');
        }
        out.extend(ch.to_uppercase());
    }
    out
}
