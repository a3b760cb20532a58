//! Tab expansion (raw text -> display text).

/// Expand every tab in `raw` to spaces up to the next multiple of `tab_stop`.
///
/// A tab always emits at least one space, even when the current display
/// column is already on a stop. All other bytes are copied unchanged.
/// `tab_stop` of zero is treated as one.
pub fn expand_tabs(raw: &[u8], tab_stop: usize) -> Vec<u8> {
    let stop = tab_stop.max(1);
    let tabs = raw.iter().filter(|&&b| b == b'\t').count();
    let mut out = Vec::with_capacity(raw.len() + tabs * (stop - 1));
    for &b in raw {
        if b == b'\t' {
            out.push(b' ');
            while out.len() % stop != 0 {
                out.push(b' ');
            }
        } else {
            out.push(b);
        }
    }
    out
}

/// Display column reached after a tab that starts at display column `col`.
#[inline]
pub fn next_tab_stop(col: usize, tab_stop: usize) -> usize {
    let stop = tab_stop.max(1);
    col + (stop - col % stop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tab_after_one_char_pads_to_eight() {
        assert_eq!(expand_tabs(b"a\tb", 8), b"a       b".to_vec());
    }

    #[test]
    fn aligned_tab_still_emits_full_stop() {
        let out = expand_tabs(b"12345678\tx", 8);
        assert_eq!(out.len(), 17);
        assert_eq!(&out[8..16], b"        ");
        assert_eq!(out[16], b'x');
    }

    #[test]
    fn leading_tabs_and_custom_stop() {
        assert_eq!(expand_tabs(b"\t\tz", 4), b"        z".to_vec());
        assert_eq!(expand_tabs(b"ab\t", 3), b"ab ".to_vec());
    }

    #[test]
    fn non_tab_bytes_are_untouched() {
        let raw = b"fn main() { 42 }".to_vec();
        assert_eq!(expand_tabs(&raw, 8), raw);
        assert!(expand_tabs(b"", 8).is_empty());
    }

    #[test]
    fn next_tab_stop_advances_at_least_one() {
        assert_eq!(next_tab_stop(0, 8), 8);
        assert_eq!(next_tab_stop(1, 8), 8);
        assert_eq!(next_tab_stop(8, 8), 16);
        assert_eq!(next_tab_stop(5, 0), 6);
    }
}
