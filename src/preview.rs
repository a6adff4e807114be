//! Terminal rendering for the reading view.
//!
//! Only `==highlight==` spans are transformed. They are drawn in reverse video
//! by default, or underlined when `highlightAsUnderline` is on. Without
//! colour support the markers are dropped and the text is left plain.

use console::Style;

const HIGHLIGHT_MARKER: &str = "==";

/// Renders `note` for display.
pub fn render(note: &str, highlight_as_underline: bool, use_color: bool) -> String {
    let style = if highlight_as_underline {
        Style::new().underlined()
    } else {
        Style::new().reverse()
    }
    .force_styling(use_color);

    note.split_inclusive('\n')
        .map(|line| render_line(line, &style))
        .collect()
}

fn render_line(line: &str, style: &Style) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(start) = rest.find(HIGHLIGHT_MARKER) {
        let after_open = &rest[start + HIGHLIGHT_MARKER.len()..];
        let Some(end) = after_open.find(HIGHLIGHT_MARKER) else {
            break;
        };
        let text = &after_open[..end];
        if text.is_empty() || text.starts_with(' ') || text.ends_with(' ') {
            // Not a highlight; keep the opening marker and look further on.
            out.push_str(&rest[..start + HIGHLIGHT_MARKER.len()]);
            rest = after_open;
            continue;
        }

        out.push_str(&rest[..start]);
        out.push_str(&style.apply_to(text).to_string());
        rest = &after_open[end + HIGHLIGHT_MARKER.len()..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rendering_drops_markers() {
        assert_eq!(
            render("Some ==important== words\nnext line\n", false, false),
            "Some important words\nnext line\n"
        );
    }

    #[test]
    fn test_reverse_is_default_highlight() {
        let rendered = render("==hi==", false, true);
        let expected = Style::new().reverse().force_styling(true).apply_to("hi");
        assert_eq!(rendered, expected.to_string());
        assert!(rendered.starts_with('\u{1b}'));
    }

    #[test]
    fn test_underline_highlight() {
        let rendered = render("a ==hi== b", true, true);
        assert_eq!(rendered, "a \u{1b}[4mhi\u{1b}[0m b");
        assert_ne!(rendered, render("a ==hi== b", false, true));
    }

    #[test]
    fn test_non_highlights_left_alone() {
        assert_eq!(render("x == y", false, false), "x == y");
        assert_eq!(render("a ==== b", false, false), "a ==== b");
        assert_eq!(render("1 == 2 == 3", false, false), "1 == 2 == 3");
        assert_eq!(render("==open\nclose==\n", false, false), "==open\nclose==\n");
    }
}
