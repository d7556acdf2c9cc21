use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthChar;

/// A simple single-line text input renderer.
///
/// Renders the prompt + text content, with a cursor indicator at the end.
pub struct TextInput<'a> {
    pub prompt: &'a str,
    pub text: &'a str,
    pub style: Style,
}

impl<'a> TextInput<'a> {
    pub fn new(prompt: &'a str, text: &'a str) -> Self {
        Self {
            prompt,
            text,
            style: Style::default().fg(Color::White),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let display = format!("{}{}\u{2588}", self.prompt, self.text);
        let visible = tail_fitting(&display, area.width as usize);
        buf.set_string(area.x, area.y, visible, self.style);
    }
}

/// The longest suffix of `s` that fits in `max_width` terminal columns, so the
/// cursor end of a long input stays visible.
fn tail_fitting(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = s.len();
    for (idx, ch) in s.char_indices().rev() {
        width += ch.width().unwrap_or(0);
        if width > max_width {
            break;
        }
        start = idx;
    }
    &s[start..]
}

#[cfg(test)]
mod tests {
    use super::tail_fitting;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(tail_fitting("abc", 10), "abc");
    }

    #[test]
    fn keeps_rightmost_columns() {
        assert_eq!(tail_fitting("username", 4), "name");
    }

    #[test]
    fn never_splits_wide_characters() {
        // Each CJK character is two columns wide.
        assert_eq!(tail_fitting("名前名前", 5), "名前");
        assert_eq!(tail_fitting("名前", 1), "");
    }
}
