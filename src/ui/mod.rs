pub mod command_bar;
pub mod dashboard;
pub mod error_popup;
pub mod help;
pub mod input;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, AppMode};

use command_bar::CommandBar;
use dashboard::DashboardPanel;
use help::HelpView;
use input::TextInput;
use status_bar::StatusBar;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Layout: username line + dashboard + status bar + optional command bar
    let bottom_height = if app.mode == AppMode::Command { 2 } else { 1 };

    let [header_area, main_area, bottom_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(bottom_height),
    ])
    .areas(area);

    draw_header(frame, app, header_area);

    if app.mode == AppMode::Command {
        let [status_area, cmd_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(bottom_area);
        frame.render_widget(StatusBar::new(app), status_area);
        frame.render_widget(CommandBar::new(app), cmd_area);
    } else {
        frame.render_widget(StatusBar::new(app), bottom_area);
    }

    let view = app.view();
    frame.render_widget(
        DashboardPanel::new(&view)
            .username(app.dashboard.username())
            .loading(app.dashboard.is_fetching())
            .scroll(app.scroll),
        main_area,
    );

    if app.show_help {
        frame.render_widget(HelpView::new(), main_area);
    }
}

/// Username prompt: editable in input mode, a plain label otherwise.
fn draw_header(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    if app.mode == AppMode::Input {
        frame.render_widget(
            TextInput::new(" Username: ", &app.username_input)
                .style(Style::default().fg(Color::Yellow)),
            area,
        );
        return;
    }

    let label_style = Style::default().fg(Color::DarkGray);
    let line = if app.username_input.is_empty() {
        Line::from(Span::styled(" Username: (press i to enter)", label_style))
    } else {
        Line::from(vec![
            Span::styled(" Username: ", label_style),
            Span::styled(
                app.username_input.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (Enter to fetch, i to edit)", label_style),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}
