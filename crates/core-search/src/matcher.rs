//! Byte substring helpers used by the session.

/// First start of `needle` in `hay` strictly after `after` (or anywhere when `None`).
pub(crate) fn find_after(hay: &[u8], needle: &[u8], after: Option<usize>) -> Option<usize> {
    let from = after.map_or(0, |a| a + 1);
    if needle.is_empty() || from > hay.len() {
        return None;
    }
    hay[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// Last start of `needle` in `hay` strictly before `before`.
pub(crate) fn find_before(hay: &[u8], needle: &[u8], before: usize) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    (0..before.min(hay.len()))
        .rev()
        .find(|&start| hay[start..].starts_with(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn after_is_strict() {
        assert_eq!(find_after(b"aaa", b"a", None), Some(0));
        assert_eq!(find_after(b"aaa", b"a", Some(0)), Some(1));
        assert_eq!(find_after(b"aaa", b"a", Some(2)), None);
        assert_eq!(find_after(b"ab", b"abc", None), None);
    }

    #[test]
    fn before_is_strict() {
        assert_eq!(find_before(b"abab", b"ab", 4), Some(2));
        assert_eq!(find_before(b"abab", b"ab", 2), Some(0));
        assert_eq!(find_before(b"abab", b"ab", 0), None);
        // a partial occurrence at the tail is not a hit
        assert_eq!(find_before(b"xa", b"ab", 2), None);
    }
}
