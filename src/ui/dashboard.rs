use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::dashboard::{DashboardView, Row, Section};
use crate::ui::error_popup::ErrorPopup;

/// The main dashboard area: every present section stacked in one scrollable
/// column, or the error indicator when the last batch failed.
pub struct DashboardPanel<'a> {
    pub view: &'a DashboardView,
    pub username: Option<&'a str>,
    pub loading: bool,
    pub scroll: u16,
}

impl<'a> DashboardPanel<'a> {
    pub fn new(view: &'a DashboardView) -> Self {
        Self {
            view,
            username: None,
            loading: false,
            scroll: 0,
        }
    }

    pub fn username(mut self, username: Option<&'a str>) -> Self {
        self.username = username;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for DashboardPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.username {
            Some(name) => format!(" @{name} "),
            None => " leetdash ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        match self.view {
            DashboardView::Empty => {
                let msg = if self.loading {
                    "Loading..."
                } else {
                    "Enter a username to load stats"
                };
                buf.set_string(
                    inner.x + 1,
                    inner.y,
                    msg,
                    Style::default().fg(Color::DarkGray),
                );
            }
            DashboardView::Error(message) => {
                ErrorPopup::new(message).render(inner, buf);
            }
            DashboardView::Sections(sections) if sections.is_empty() => {
                buf.set_string(
                    inner.x + 1,
                    inner.y,
                    "No stats to display",
                    Style::default().fg(Color::DarkGray),
                );
            }
            DashboardView::Sections(sections) => {
                let mut lines = Vec::new();
                for (idx, section) in sections.iter().enumerate() {
                    if idx > 0 {
                        lines.push(Line::from(""));
                    }
                    lines.extend(section_lines(section));
                }

                let max_scroll = u16::try_from(lines.len())
                    .unwrap_or(u16::MAX)
                    .saturating_sub(inner.height);
                Paragraph::new(lines)
                    .scroll((self.scroll.min(max_scroll), 0))
                    .render(inner, buf);
            }
        }
    }
}

/// Section heading followed by its rows. List items are numbered, restarting
/// after each sub-heading.
pub fn section_lines(section: &Section) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("\u{258c} ", Style::default().fg(Color::Cyan)),
        Span::styled(
            section.title(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ])];

    let mut item_no = 0;
    for row in &section.rows {
        let line = match row {
            Row::Field { label, value } => Line::from(vec![
                Span::styled(format!("  {label}: "), Style::default().fg(Color::DarkGray)),
                Span::styled(value.clone(), Style::default().fg(Color::White)),
            ]),
            Row::Item(text) => {
                item_no += 1;
                Line::from(vec![
                    Span::styled(
                        format!("  {item_no:>2}. "),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(text.clone()),
                ])
            }
            Row::Heading(text) => {
                item_no = 0;
                Line::from(Span::styled(
                    format!("  {text}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            }
            Row::Link(url) => Line::from(Span::styled(
                format!("  {url}"),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            )),
        };
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{FAILURE_MESSAGE, SectionKind};

    fn render_text(view: &DashboardView, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        DashboardPanel::new(view)
            .username(Some("alice"))
            .render(area, &mut buf);

        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn solved_section() -> Section {
        Section {
            kind: SectionKind::Solved,
            rows: vec![
                Row::Field {
                    label: "Easy",
                    value: "10".into(),
                },
                Row::Field {
                    label: "Medium",
                    value: "5".into(),
                },
                Row::Field {
                    label: "Hard",
                    value: "1".into(),
                },
            ],
        }
    }

    #[test]
    fn renders_section_rows() {
        let view = DashboardView::Sections(vec![solved_section()]);
        let text = render_text(&view, 60, 12);
        assert!(text.contains("@alice"));
        assert!(text.contains("Solved Stats"));
        assert!(text.contains("Easy: 10"));
        assert!(text.contains("Medium: 5"));
        assert!(text.contains("Hard: 1"));
    }

    #[test]
    fn error_view_hides_sections() {
        let view = DashboardView::Error(FAILURE_MESSAGE);
        let text = render_text(&view, 80, 20);
        assert!(text.contains(FAILURE_MESSAGE));
        assert!(!text.contains("Solved Stats"));
    }

    #[test]
    fn items_are_numbered_per_tier() {
        let section = Section {
            kind: SectionKind::Skills,
            rows: vec![
                Row::Heading("INTERMEDIATE"),
                Row::Item("INTERMEDIATE - Hash Table: 4".into()),
                Row::Heading("ADVANCED"),
                Row::Item("ADVANCED - Backtracking: 3".into()),
            ],
        };
        let text: Vec<String> = section_lines(&section)
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text[2], "   1. INTERMEDIATE - Hash Table: 4");
        assert_eq!(text[4], "   1. ADVANCED - Backtracking: 3");
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let view = DashboardView::Sections(vec![solved_section()]);
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        DashboardPanel::new(&view).scroll(500).render(area, &mut buf);

        // Two inner rows; the last two lines of content stay visible.
        let row: String = (1..39).map(|x| buf[(x, 2)].symbol().to_string()).collect();
        assert!(row.contains("Hard: 1"), "{row}");
    }
}
