use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::types::Align;

/// Number of terminal columns `text` occupies when painted glyph by glyph.
pub fn display_len(text: &str) -> usize {
    text.chars().map(glyph_width).sum()
}

/// Widest entry in `lines`, 0 when empty.
pub fn max_display_len<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .map(|line| display_len(line.as_ref()))
        .max()
        .unwrap_or(0)
}

/// Pad `text` with spaces to `width` columns. Text wider than `width` is
/// returned unchanged. Centering puts `floor(d/2)` spaces before the text and
/// the remainder after it.
pub fn align(text: &str, width: usize, alignment: Align) -> String {
    let d = width.saturating_sub(display_len(text));
    match alignment {
        Align::Left => format!("{text}{}", " ".repeat(d)),
        Align::Right => format!("{}{text}", " ".repeat(d)),
        Align::Center => {
            let lead = d / 2;
            format!("{}{text}{}", " ".repeat(lead), " ".repeat(d - lead))
        }
    }
}

/// Longest prefix of `text` that fits in `width` columns, never splitting a grapheme.
pub(crate) fn truncate_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, grapheme) in text.grapheme_indices(true) {
        let w = display_len(grapheme);
        if used + w > width {
            return &text[..idx];
        }
        used += w;
    }
    text
}

/// Remove the last user-visible grapheme cluster.
pub(crate) fn pop_grapheme(text: &mut String) {
    if let Some((idx, _)) = text.grapheme_indices(true).next_back() {
        text.truncate(idx);
    }
}

/// Column width of a single glyph when painted; control characters take one column.
pub(crate) fn glyph_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_center() {
        assert_eq!(align("12345", 7, Align::Center), " 12345 ");
        assert_eq!(align("12345", 8, Align::Center), " 12345  ");
        assert_eq!(align("12", 8, Align::Center), "   12   ");
    }

    #[test]
    fn test_align_left_right() {
        assert_eq!(align("12", 8, Align::Left), "12      ");
        assert_eq!(align("12", 8, Align::Right), "      12");
    }

    #[test]
    fn test_align_narrow_width_keeps_text() {
        assert_eq!(align("abcdef", 3, Align::Center), "abcdef");
    }

    #[test]
    fn test_max_display_len() {
        assert_eq!(max_display_len(&["1", "12", "123"]), 3);
        assert_eq!(max_display_len(&["1"]), 1);
        assert_eq!(max_display_len(&["1234", "12", "123"]), 4);
        assert_eq!(max_display_len::<&str>(&[]), 0);
    }

    #[test]
    fn test_display_len_matches_painted_columns() {
        assert_eq!(display_len("abc"), 3);
        assert_eq!(display_len("日本"), 4);
        // the variation selector is dropped when painting
        assert_eq!(display_len("❤\u{fe0f}"), 1);
        assert_eq!(display_len("e\u{301}"), 1);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("hi", 10), "hi");
        assert_eq!(truncate_to_width("日本語", 4), "日本");
    }

    #[test]
    fn test_pop_grapheme() {
        let mut s = String::from("ab");
        pop_grapheme(&mut s);
        assert_eq!(s, "a");
        let mut flag = String::from("x🇩🇪");
        pop_grapheme(&mut flag);
        assert_eq!(flag, "x");
        let mut empty = String::new();
        pop_grapheme(&mut empty);
        assert!(empty.is_empty());
    }
}
