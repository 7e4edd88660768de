use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Terminal columns occupied by `s` (CJK and emoji count as two).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Byte offset of the longest prefix of `s` that fits in `max_width` columns.
fn fitting_prefix(s: &str, max_width: usize) -> usize {
    let mut width = 0;
    for (idx, c) in s.char_indices() {
        let w = char_width(c);
        if width + w > max_width {
            return idx;
        }
        width += w;
    }
    s.len()
}

/// Truncate `s` to at most `max_width` columns, marking the cut with "...".
///
/// Widths of 3 or less have no room for an ellipsis and get a bare prefix.
/// Returns the input borrowed when it already fits.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= ELLIPSIS_WIDTH {
        return Cow::Owned(s[..fitting_prefix(s, max_width)].to_string());
    }
    let cut = fitting_prefix(s, max_width - ELLIPSIS_WIDTH);
    Cow::Owned(format!("{}{}", &s[..cut], ELLIPSIS))
}

/// Greedy word wrap to `max_width` columns, at most `max_lines` lines.
///
/// Words wider than a line are hard-split. If the text does not fit in
/// `max_lines`, the last line is truncated with an ellipsis.
pub fn wrap_to_width(s: &str, max_width: usize, max_lines: usize) -> Vec<String> {
    if max_width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in s.split_whitespace() {
        let mut word = word;
        loop {
            let w = display_width(word);
            let sep = usize::from(!current.is_empty());
            if current_width + sep + w <= max_width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += sep + w;
                break;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
                continue;
            }
            // Word alone is too wide for an empty line
            let cut = fitting_prefix(word, max_width).max(
                word.chars().next().map(char::len_utf8).unwrap_or(word.len()),
            );
            lines.push(word[..cut].to_string());
            word = &word[cut..];
            if word.is_empty() {
                break;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let room = max_width.saturating_sub(ELLIPSIS_WIDTH);
            let cut = fitting_prefix(last, room);
            last.truncate(cut);
            last.push_str(ELLIPSIS);
        }
    }
    lines
}

fn is_stripped_control(b: u8) -> bool {
    b == 0x7f || (b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r'))
}

/// Remove terminal control characters and ANSI escape sequences.
///
/// Feed text is untrusted and is drawn straight into the terminal. Tab,
/// newline and carriage return survive; CSI and OSC sequences are dropped
/// whole; other C0 controls, DEL and bare ESC are dropped.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.bytes().any(|b| b == 0x1b || is_stripped_control(b)) {
        return Cow::Borrowed(s);
    }

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b != 0x1b && !is_stripped_control(b) {
            i += 1;
            continue;
        }

        // Control bytes are ASCII, so slicing here stays on char boundaries
        out.push_str(&s[run_start..i]);
        i += 1;

        if b == 0x1b {
            match bytes.get(i) {
                Some(b'[') => {
                    i += 1;
                    while i < bytes.len() {
                        let c = bytes[i];
                        i += 1;
                        if (0x40..=0x7e).contains(&c) {
                            break;
                        }
                    }
                }
                Some(b']') => {
                    i += 1;
                    while i < bytes.len() {
                        if bytes[i] == 0x07 {
                            i += 1;
                            break;
                        }
                        if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'\\') {
                            i += 2;
                            break;
                        }
                        i += 1;
                    }
                }
                _ => {}
            }
        }
        run_start = i;
    }
    out.push_str(&s[run_start.min(s.len())..]);

    Cow::Owned(out)
}

/// Flatten feed text for single-line display: strip controls, collapse
/// whitespace runs (including newlines) to single spaces.
pub fn sanitize_line(s: &str) -> String {
    strip_control_chars(s)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
        assert_eq!(truncate_to_width("Short", 10), "Short");
        assert_eq!(truncate_to_width("12345", 5), "12345");
    }

    #[test]
    fn test_truncate_fitting_input_is_borrowed() {
        assert!(matches!(truncate_to_width("fits", 10), Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_wide_chars() {
        assert_eq!(truncate_to_width("你好世界", 7), "你好...");
        assert_eq!(truncate_to_width("你好世界", 5), "你...");
        assert_eq!(truncate_to_width("你好", 3), "你");
        assert_eq!(truncate_to_width("你好", 1), "");
    }

    #[test]
    fn test_truncate_narrow_widths_have_no_ellipsis() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Testing", 2), "Te");
        assert_eq!(truncate_to_width("Testing", 3), "Tes");
        assert_eq!(truncate_to_width("Testing", 4), "T...");
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let lines = wrap_to_width("the quick brown fox jumps", 10, 5);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
        assert!(lines.iter().all(|l| display_width(l) <= 10));
    }

    #[test]
    fn test_wrap_hard_splits_long_words() {
        let lines = wrap_to_width("abcdefghij", 4, 5);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_truncates_overflow_with_ellipsis() {
        let lines = wrap_to_width("one two three four five six", 9, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "one two");
        assert!(lines[1].ends_with("..."));
        assert!(display_width(&lines[1]) <= 9);
    }

    #[test]
    fn test_wrap_degenerate_inputs() {
        assert!(wrap_to_width("", 10, 3).is_empty());
        assert!(wrap_to_width("text", 0, 3).is_empty());
        assert!(wrap_to_width("text", 10, 0).is_empty());
    }

    #[test]
    fn test_strip_clean_text_is_borrowed() {
        let input = "line1\nline2\ttabbed\r\n";
        let result = strip_control_chars(input);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, input);
    }

    #[test]
    fn test_strip_removes_c0_and_del() {
        assert_eq!(strip_control_chars("he\x00ll\x07o\x7f!"), "hello!");
    }

    #[test]
    fn test_strip_ansi_sequences() {
        assert_eq!(strip_control_chars("\x1b[31mRed\x1b[0m"), "Red");
        assert_eq!(strip_control_chars("\x1b]0;title\x07safe"), "safe");
        assert_eq!(strip_control_chars("\x1b]0;title\x1b\\safe"), "safe");
        assert_eq!(strip_control_chars("a\x1bb"), "ab");
    }

    #[test]
    fn test_strip_keeps_unicode() {
        assert_eq!(strip_control_chars("日本 \x1b[1m語\x1b[0m"), "日本 語");
    }

    #[test]
    fn test_strip_unterminated_sequence_at_end() {
        assert_eq!(strip_control_chars("tail\x1b[12"), "tail");
    }

    #[test]
    fn test_sanitize_line_collapses_whitespace() {
        assert_eq!(sanitize_line("  Big\n\tnews \x1b[1m today "), "Big news today");
    }
}
