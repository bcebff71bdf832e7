//! Terminal cell widths of text.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marks text cut short by [`clip`].
pub const ELLIPSIS: char = '…';

/// Cells `s` occupies.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Cells `c` occupies; zero for control and combining characters.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Fit `s` into `max` cells. Text that does not fit loses its tail, and the
/// last cell shows [`ELLIPSIS`].
pub fn clip(s: &str, max: usize) -> Cow<'_, str> {
    if display_width(s) <= max {
        return Cow::Borrowed(s);
    }
    let Some(room) = max.checked_sub(1) else {
        return Cow::Borrowed("");
    };

    let mut used = 0;
    let cut = s
        .char_indices()
        .find(|&(_, c)| {
            used += char_width(c);
            used > room
        })
        .map_or(s.len(), |(at, _)| at);

    let mut clipped = String::with_capacity(cut + ELLIPSIS.len_utf8());
    clipped.push_str(&s[..cut]);
    clipped.push(ELLIPSIS);
    Cow::Owned(clipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitting_text_is_borrowed() {
        assert!(matches!(clip("abc", 5), Cow::Borrowed("abc")));
        assert_eq!(clip("abcde", 5), "abcde");
    }

    #[test]
    fn test_clip_marks_cut() {
        assert_eq!(clip("abcdef", 4), "abc…");
        assert_eq!(clip("abcdef", 1), "…");
        assert_eq!(clip("abcdef", 0), "");
    }

    #[test]
    fn test_wide_char_not_split() {
        // "日" needs two cells; only one is left before the ellipsis.
        assert_eq!(clip("a日本", 3), "a…");
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width("▼"), 1);
    }
}
