//! Expand path normalization.

use indexmap::IndexSet;

/// Normalize expand paths into a minimal canonical set.
///
/// Whitespace is removed and leading/trailing dots are trimmed; entries that
/// end up empty are dropped. A path is dropped when another path extends it
/// (`a.b` is covered by `a.b.c`), and exact duplicates are kept once, in
/// first occurrence order.
///
/// ```rust
/// use tether_query::expand::normalize_expands;
///
/// let paths = normalize_expands(&["a.b.c", "a.b", "   test  ", "  ", "test"]);
/// assert_eq!(paths, vec!["a.b.c", "test"]);
/// ```
pub fn normalize_expands<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    let cleaned: Vec<String> = paths
        .iter()
        .map(|p| clean_path(p.as_ref()))
        .filter(|p| !p.is_empty())
        .collect();

    cleaned
        .iter()
        .enumerate()
        .filter(|&(i, p1)| {
            !cleaned
                .iter()
                .enumerate()
                .any(|(j, p2)| i != j && is_ancestor(p1, p2))
        })
        .map(|(_, p)| p.clone())
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Split a path into its first segment and the remaining suffix.
pub fn split_head(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, tail)) => (head, Some(tail)),
        None => (path, None),
    }
}

fn clean_path(path: &str) -> String {
    let compact: String = path.chars().filter(|c| !c.is_whitespace()).collect();
    compact.trim_matches('.').to_string()
}

/// `parent` is a strict ancestor of `child` (`a.b` of `a.b.c`, not of `a.bc`).
fn is_ancestor(parent: &str, child: &str) -> bool {
    child.len() > parent.len()
        && child.starts_with(parent)
        && child.as_bytes()[parent.len()] == b'.'
}
