use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

/// Help overlay showing keybindings.
#[derive(Default)]
pub struct HelpView;

impl HelpView {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for HelpView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Center a panel that's 56 wide, 20 tall (or fit to area)
        let width = 56u16.min(area.width.saturating_sub(4));
        let height = 20u16.min(area.height.saturating_sub(2));
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let panel = Rect::new(x, y, width, height);

        Clear.render(panel, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Help - Keybindings ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(panel);
        block.render(panel, buf);

        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(Color::White);
        let section_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let bindings: Vec<Line<'_>> = vec![
            Line::from(Span::styled("Dashboard", section_style)),
            binding_line("i / @", "Edit username", key_style, desc_style),
            binding_line("Enter/r", "Fetch / refresh", key_style, desc_style),
            binding_line("j/Down", "Scroll down", key_style, desc_style),
            binding_line("k/Up", "Scroll up", key_style, desc_style),
            binding_line("PgDn/PgUp", "Scroll a page", key_style, desc_style),
            binding_line("g", "Back to top", key_style, desc_style),
            binding_line("o", "Open daily question", key_style, desc_style),
            Line::from(""),
            Line::from(Span::styled("Commands", section_style)),
            binding_line(":user NAME", "Fetch another user", key_style, desc_style),
            binding_line(":refresh", "Fetch again", key_style, desc_style),
            binding_line(":open", "Open daily question", key_style, desc_style),
            Line::from(""),
            binding_line("?", "Toggle this help", key_style, desc_style),
            binding_line("q/Esc", "Quit", key_style, desc_style),
            binding_line("Ctrl-C", "Quit", key_style, desc_style),
        ];

        Paragraph::new(bindings).render(inner, buf);
    }
}

fn binding_line<'a>(key: &'a str, desc: &'a str, key_style: Style, desc_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {key:<12}"), key_style),
        Span::styled(desc, desc_style),
    ])
}
