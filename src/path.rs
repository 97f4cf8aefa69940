//! State path parsing and comparison

/// Default separator between state names in a path
pub const DEFAULT_SEPARATOR: char = '.';

/// Split a path into its segments. The empty string is the root and has none.
pub(crate) fn split(path: &str, separator: char) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split(separator).map(str::to_owned).collect()
}

/// Join segments back into a path string.
pub(crate) fn join<S: AsRef<str>>(segments: &[S], separator: char) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        out.push_str(segment.as_ref());
    }
    out
}

/// Length of the longest common prefix of two paths.
pub(crate) fn change_level<S: PartialEq>(current: &[S], target: &[S]) -> usize {
    current
        .iter()
        .zip(target)
        .take_while(|(a, b)| a == b)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        assert!(split("", '.').is_empty());
        assert_eq!(split("a", '.'), vec!["a"]);
        assert_eq!(split("a.b.c", '.'), vec!["a", "b", "c"]);
        assert_eq!(split("a/b", '/'), vec!["a", "b"]);
        // Empty segments are kept so lookups can reject them
        assert_eq!(split("a..b", '.'), vec!["a", "", "b"]);
    }

    #[test]
    fn test_join() {
        assert_eq!(join::<&str>(&[], '.'), "");
        assert_eq!(join(&["a", "b", "c"], '.'), "a.b.c");
    }

    #[test]
    fn test_change_level() {
        assert_eq!(change_level(&["a", "b", "c"], &["a", "b", "d"]), 2);
        assert_eq!(change_level(&["a", "b"], &["a", "c", "d"]), 1);
        assert_eq!(change_level(&["a", "b"], &["a", "b"]), 2);
        assert_eq!(change_level(&["a"], &["x"]), 0);
        assert_eq!(change_level::<&str>(&[], &["a"]), 0);
        assert_eq!(change_level(&["a", "b"], &[]), 0);
        assert_eq!(change_level(&["a"], &["a", "b"]), 1);
    }
}
