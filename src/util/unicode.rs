use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: char = '\u{2026}';

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Clip or right-pad `s` to exactly `cells` terminal cells. A clipped
/// string ends in `…`; graphemes are never split.
pub fn fit_to_width(s: &str, cells: usize) -> String {
    let width = display_width(s);
    if width <= cells {
        return format!("{}{}", s, " ".repeat(cells - width));
    }
    if cells == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for grapheme in s.graphemes(true) {
        let w = display_width(grapheme);
        if used + w >= cells {
            break;
        }
        used += w;
        out.push_str(grapheme);
    }
    out.push(ELLIPSIS);
    // a wide grapheme that didn't fit leaves a one-cell gap
    out.extend(std::iter::repeat_n(' ', cells - used - 1));
    out
}
