/// Things that can happen to the app
mod action;
pub use action::Action;

/// Side effects the app asks the shell to run
mod effect;
pub use effect::{Effect, EffectContext};

/// The blocking alert modal
mod alert;
use alert::Alert;

/// The email/password form
mod login_form;
use login_form::LoginForm;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use login_core::{Client, Page, Reaction};
use ratatui::{
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
    widgets::Paragraph,
    Frame,
};
use std::process::ExitCode;

/// The "functional core" of the app.
pub struct App {
    /// Used to resolve the pages we navigate to
    client: Client,

    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// Which page we're on
    state: AppState,

    /// Shown on top of the current page until dismissed
    alert: Option<Alert>,
}

impl App {
    /// Create a new instance of the app, starting on the login form
    pub fn new(client: Client) -> Self {
        Self {
            client,
            status_line: None,
            state: AppState::Form(LoginForm::default()),
            alert: None,
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        match &self.state {
            AppState::Form(form) => form.render(body_area, frame),
            AppState::MainPage(url) => frame.render_widget(
                Paragraph::new(vec![
                    Line::from("Logged in!").bold(),
                    Line::from(format!("Now at {url}")),
                    Line::from("q: quit").dark_gray(),
                ])
                .centered(),
                body_area,
            ),
            AppState::Exiting(_) => frame.render_widget(Paragraph::new("Exiting…"), body_area),
        }

        if let Some(alert) = &self.alert {
            alert.render(frame, body_area);
        }

        let status = Paragraph::new(match &self.status_line {
            Some(line) => line.as_str(),
            None => self.client.server.as_str(),
        });

        frame.render_widget(status, status_area);
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => self.handle_key(key),
            Action::LoginResponded(result) => {
                // Once we've left the form, answers to its submissions have
                // nowhere to go.
                if matches!(self.state, AppState::Form(_)) {
                    Reaction::from_result(result).apply(self);
                } else {
                    tracing::debug!(?result, "ignoring login response after leaving the form");
                }

                vec![]
            }
            Action::Problem(problem) => {
                self.status_line = Some(problem);

                vec![]
            }
        }
    }

    /// Handle a key press. Alerts take every key until they're dismissed.
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return vec![];
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.state = AppState::Exiting(ExitCode::SUCCESS);
            return vec![];
        }

        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }

            return vec![];
        }

        let exit = match &mut self.state {
            AppState::Form(form) => match key.code {
                // No in-flight guard: every press sends another request.
                KeyCode::Enter => return vec![Effect::LogIn(form.credentials())],
                KeyCode::Esc => true,
                _ => {
                    form.handle_event(key);

                    false
                }
            },
            AppState::MainPage(_) => matches!(key.code, KeyCode::Char('q') | KeyCode::Esc),
            AppState::Exiting(_) => false,
        };

        if exit {
            self.state = AppState::Exiting(ExitCode::SUCCESS);
        }

        vec![]
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        if let AppState::Exiting(code) = &self.state {
            Some(*code)
        } else {
            None
        }
    }
}

impl Page for App {
    fn navigate(&mut self, path: &str) {
        match self.client.page_url(path) {
            Ok(url) => {
                tracing::info!(%url, "navigating");

                self.status_line = Some(format!("Navigated to {url}"));
                self.state = AppState::MainPage(url.to_string());
            }
            Err(err) => tracing::error!(?err, path, "could not resolve page"),
        }
    }

    fn alert(&mut self, message: &str) {
        self.alert = Some(Alert {
            message: message.to_owned(),
        });
    }
}

/// App lifecycle
#[derive(Debug)]
enum AppState {
    /// Waiting for credentials
    Form(LoginForm),

    /// We logged in and navigated away from the form
    MainPage(String),

    /// We're done and want the following exit code
    Exiting(ExitCode),
}
