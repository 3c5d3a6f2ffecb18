use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis appended to truncated text.
const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Display width of a string in terminal columns (Hangul and other CJK count as 2).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncates a string to fit within `max_width` terminal columns.
///
/// When the text does not fit, it is cut on a character boundary and "..."
/// is appended so the result, ellipsis included, stays within `max_width`.
/// Widths too narrow for any text plus the ellipsis return the longest
/// prefix that fits, without an ellipsis.
///
/// # Examples
///
/// ```
/// use newbie_feed::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("정권 교체", 7), "정권...");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let budget = if max_width > ELLIPSIS_WIDTH {
        max_width - ELLIPSIS_WIDTH
    } else {
        max_width
    };

    let mut used = 0;
    let mut cut = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        cut = idx + c.len_utf8();
    }

    if max_width > ELLIPSIS_WIDTH {
        Cow::Owned(format!("{}{}", &s[..cut], ELLIPSIS))
    } else {
        Cow::Owned(s[..cut].to_string())
    }
}

/// Flattens server text into one printable line.
///
/// Line breaks and tabs become single spaces, runs of whitespace collapse,
/// and control characters (including ESC, so ANSI sequences lose their
/// introducer) are dropped. Returns borrowed input when nothing changes.
pub fn single_line(s: &str) -> Cow<'_, str> {
    let clean = !s.chars().any(|c| c.is_control())
        && !s.contains("  ")
        && s.trim() == s;
    if clean {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else if !c.is_control() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    Cow::Owned(out)
}
