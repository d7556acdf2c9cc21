use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

/// Centered error indicator shown in place of the dashboard sections.
pub struct ErrorPopup<'a> {
    text: &'a str,
}

impl<'a> ErrorPopup<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl Widget for ErrorPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let max_width = 70u16.min(area.width.saturating_sub(4));
        // Inner width available for text (subtract 2 for border)
        let inner_width = max_width.saturating_sub(2) as usize;

        let text_lines = if inner_width == 0 {
            1
        } else {
            self.text.chars().count().div_ceil(inner_width).max(1)
        };

        // +2 for border top/bottom, +2 for hint line + blank line above hint
        let content_height = (text_lines as u16) + 4;
        let height = content_height.min(area.height);

        let x = area.x + (area.width.saturating_sub(max_width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let panel = Rect::new(x, y, max_width, height);

        Clear.render(panel, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Error ")
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::Red));

        let inner = block.inner(panel);
        block.render(panel, buf);

        if inner.height == 0 {
            return;
        }
        if inner.height == 1 {
            Paragraph::new(self.text).render(inner, buf);
            return;
        }

        // Reserve the last line of inner area for the hint
        let text_area = Rect::new(inner.x, inner.y, inner.width, inner.height - 1);
        let hint_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);

        Paragraph::new(self.text)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .render(text_area, buf);

        let hint = Line::from(Span::styled(
            " Press r to retry or i to change the username ",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
        Paragraph::new(hint).render(hint_area, buf);
    }
}
