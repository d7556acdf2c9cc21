use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::api::StatsClient;
use crate::api::batch::{FetchOutcome, fetch_for_user};
use crate::command::{self, Command};
use crate::config::AppConfig;
use crate::dashboard::{DashboardView, RenderOptions, daily_question_url, derive_view};
use crate::event::{AppEvent, Event, EventHandler};
use crate::state::DashboardState;
use crate::ui;

/// Lines moved by PageUp / PageDown.
const PAGE_SCROLL: u16 = 10;

// ---------------------------------------------------------------------------
// App mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// Editing the username.
    Input,
    Command,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub running: bool,
    pub events: EventHandler,
    pub render_options: RenderOptions,
    client: StatsClient,

    pub mode: AppMode,
    pub show_help: bool,

    // Data state
    pub dashboard: DashboardState,
    pub scroll: u16,
    pub spinner_frame: usize,

    // Input state
    pub username_input: String,
    pub command_input: String,

    // Status
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, client: StatsClient) -> Self {
        let render_options = RenderOptions {
            problem_base_url: config.problem_base_url.clone(),
        };

        Self {
            running: true,
            events: EventHandler::new(config.tick_rate_fps),
            render_options,
            client,
            mode: AppMode::Normal,
            show_help: false,
            dashboard: DashboardState::new(),
            scroll: 0,
            spinner_frame: 0,
            username_input: String::new(),
            command_input: String::new(),
            status_message: None,
        }
    }

    // -- Main event loop ----------------------------------------------------

    pub async fn run(
        mut self,
        mut terminal: DefaultTerminal,
        initial_username: Option<String>,
    ) -> color_eyre::Result<()> {
        match initial_username {
            Some(username) => {
                self.username_input = username.clone();
                self.events.send(AppEvent::FetchDashboard { username });
            }
            None => self.mode = AppMode::Input,
        }

        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            match self.events.next().await? {
                Event::Tick => self.tick(),
                Event::Crossterm(event) => {
                    if let crossterm::event::Event::Key(key) = event
                        && key.kind == crossterm::event::KeyEventKind::Press
                    {
                        self.handle_key_event(key);
                    }
                }
                Event::App(app_event) => self.handle_app_event(*app_event),
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        ui::draw(frame, self);
    }

    fn tick(&mut self) {
        if self.dashboard.is_fetching() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// The dashboard area's content for the current outcome.
    pub fn view(&self) -> DashboardView {
        derive_view(self.dashboard.current_outcome(), &self.render_options)
    }

    // -- Key event routing --------------------------------------------------

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl-C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'C'))
        {
            self.events.send(AppEvent::Quit);
            return;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Input => self.handle_input_key(key),
            AppMode::Command => self.handle_command_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q' | '?')) {
                self.events.send(AppEvent::ToggleHelp);
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.events.send(AppEvent::Quit);
            }
            KeyCode::Char('i' | '/' | '@') => {
                self.mode = AppMode::Input;
            }
            KeyCode::Char(':') => {
                self.mode = AppMode::Command;
                self.command_input.clear();
            }
            KeyCode::Enter | KeyCode::Char('r') => {
                self.events.send(AppEvent::Refresh);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(PAGE_SCROLL);
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(PAGE_SCROLL);
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.scroll = 0;
            }
            KeyCode::Char('o') => {
                self.events.send(AppEvent::OpenDailyQuestion);
            }
            KeyCode::Char('?') => {
                self.events.send(AppEvent::ToggleHelp);
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // The header keeps naming the user a refresh would fetch.
                self.username_input = self.dashboard.username().unwrap_or_default().to_string();
                self.mode = AppMode::Normal;
            }
            KeyCode::Enter => {
                let username = command::strip_at(&self.username_input).to_string();
                self.events.send(AppEvent::FetchDashboard { username });
                self.mode = AppMode::Normal;
            }
            KeyCode::Backspace => {
                self.username_input.pop();
            }
            KeyCode::Char(c) => {
                self.username_input.push(c);
            }
            _ => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.command_input.clear();
            }
            KeyCode::Enter => {
                self.execute_command();
                self.mode = AppMode::Normal;
            }
            KeyCode::Backspace => {
                self.command_input.pop();
            }
            KeyCode::Char(c) => {
                self.command_input.push(c);
            }
            _ => {}
        }
    }

    // -- Command execution --------------------------------------------------

    fn execute_command(&mut self) {
        let input = self.command_input.clone();
        match command::parse_command(&input) {
            Some(Command::User(username)) => {
                self.username_input = username.clone();
                self.events.send(AppEvent::FetchDashboard { username });
            }
            Some(Command::Refresh) => {
                self.events.send(AppEvent::Refresh);
            }
            Some(Command::Open) => {
                self.events.send(AppEvent::OpenDailyQuestion);
            }
            Some(Command::Help) => {
                self.events.send(AppEvent::ToggleHelp);
            }
            Some(Command::Quit) => {
                self.events.send(AppEvent::Quit);
            }
            None => {
                self.status_message = Some(format!("Unknown command: {input}"));
            }
        }
        self.command_input.clear();
    }

    // -- App event handling -------------------------------------------------

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => {
                self.running = false;
            }
            AppEvent::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            AppEvent::FetchDashboard { username } => match self.dashboard.start_fetch(&username) {
                Ok(cycle) => {
                    self.status_message = None;
                    self.dispatch_fetch(cycle, username);
                }
                Err(e) => {
                    self.status_message = Some(format!("Cannot fetch: {e}"));
                }
            },
            AppEvent::Refresh => match self.dashboard.username() {
                Some(username) => {
                    let username = username.to_string();
                    self.events.send(AppEvent::FetchDashboard { username });
                }
                None => {
                    self.status_message = Some("Enter a username first (press i)".to_string());
                }
            },
            AppEvent::DashboardLoaded { cycle, outcome } => {
                if self.dashboard.on_outcome(cycle, outcome) {
                    self.scroll = 0;
                }
            }
            AppEvent::OpenDailyQuestion => self.open_daily_question(),
        }
    }

    // -- Fetch dispatch -----------------------------------------------------

    /// Run one batch on a background task and report back with its cycle.
    fn dispatch_fetch(&self, cycle: u64, username: String) {
        let client = self.client.clone();
        let sender = self.events.sender();

        tokio::spawn(async move {
            let outcome = fetch_for_user(&client, &username)
                .await
                .unwrap_or_else(|e| FetchOutcome::Failure(e.to_string()));
            let _ = sender.send(Event::App(Box::new(AppEvent::DashboardLoaded {
                cycle,
                outcome,
            })));
        });
    }

    // -- Helpers ------------------------------------------------------------

    fn open_daily_question(&mut self) {
        let url = self
            .dashboard
            .current_outcome()
            .and_then(FetchOutcome::bag)
            .and_then(|bag| daily_question_url(bag, &self.render_options));

        match url {
            Some(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::warn!(%url, "failed to open browser: {e}");
                    self.status_message = Some(format!("Could not open {url}"));
                }
            }
            None => {
                self.status_message = Some("No daily question loaded".to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn test_app() -> App {
        let client = StatsClient::new("http://127.0.0.1:9", None).unwrap();
        App::new(AppConfig::default(), client)
    }

    #[tokio::test]
    async fn esc_discards_username_edit() {
        let mut app = test_app();
        app.dashboard.start_fetch("alice").unwrap();
        app.username_input = "alice".to_string();

        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.mode, AppMode::Input);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.username_input, "alicex");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.username_input, "alice");
        assert_eq!(app.dashboard.username(), Some("alice"));
    }

    #[tokio::test]
    async fn esc_before_any_fetch_clears_input() {
        let mut app = test_app();
        app.mode = AppMode::Input;
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Esc);
        assert!(app.username_input.is_empty());
    }

    #[tokio::test]
    async fn enter_keeps_the_typed_username() {
        let mut app = test_app();
        app.mode = AppMode::Input;
        for c in "bob".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.username_input, "bob");
    }
}
