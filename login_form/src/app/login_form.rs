use crossterm::event::{Event, KeyCode, KeyEvent};
use login_core::Credentials;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

/// The email/password form
#[derive(Debug)]
pub struct LoginForm {
    /// Which field we're editing
    active: Field,

    /// Who are you?
    email: Input,

    /// What's your password? (Will be masked)
    password: Input,
}

/// Fields in the form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The `email` input
    Email,

    /// The `password` input
    Password,
}

impl Field {
    /// Every field, in tab order
    const FIELDS: &'static [Field] = &[Field::Email, Field::Password];

    /// Position in `FIELDS`
    fn index(self) -> usize {
        self as usize
    }

    /// Rotate through the fields (e.g. with tab)
    fn next(self) -> Self {
        Self::FIELDS[(self.index() + 1) % Self::FIELDS.len()]
    }

    /// Rotate through the fields in reverse (e.g. with shift-tab)
    fn prev(self) -> Self {
        Self::FIELDS[(self.index() + Self::FIELDS.len() - 1) % Self::FIELDS.len()]
    }

    /// Title shown on the field's border
    fn title(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Password => "Password",
        }
    }
}

impl LoginForm {
    /// Render the form centered in `body_area`
    #[expect(clippy::cast_possible_truncation)]
    pub fn render(&self, body_area: Rect, frame: &mut Frame<'_>) {
        let popup_vert = Layout::vertical([Constraint::Length(7)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        frame.render_widget(Clear, popup_area);

        let width = popup_area.width.saturating_sub(2 + 1); // -2 for the border, -1 for the cursor

        let [email_area, password_area, hint_area] =
            Layout::vertical(Constraint::from_lengths([3, 3, 1])).areas(popup_area);

        let masked = "*".repeat(self.password.value().chars().count());

        for (field, input, shown, area) in [
            (Field::Email, &self.email, self.email.value(), email_area),
            (Field::Password, &self.password, masked.as_str(), password_area),
        ] {
            let scroll = input.visual_scroll(width as usize);

            let border_style = if self.active == field {
                Style::default().fg(Color::Blue)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let widget = Paragraph::new(shown).scroll((0, scroll as u16)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(field.title())
                    .border_style(border_style),
            );

            frame.render_widget(widget, area);

            if self.active == field {
                frame.set_cursor_position((
                    area.x
                        + (input.visual_cursor().max(scroll) - scroll) as u16 // current end of text
                        + 1, // just past the end of the text
                    area.y + 1, // +1 row for the border/title
                ));
            }
        }

        frame.render_widget(
            Paragraph::new("tab: switch field · enter: log in · esc: quit").dark_gray(),
            hint_area,
        );
    }

    /// Handle a key press that isn't submit or quit
    pub fn handle_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.active = self.active.next();
            }
            KeyCode::BackTab => {
                self.active = self.active.prev();
            }
            _ => {
                let event = Event::Key(key);

                match self.active {
                    Field::Email => self.email.handle_event(&event),
                    Field::Password => self.password.handle_event(&event),
                };
            }
        }
    }

    /// Read the fields as they are right now.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.value(), self.password.value())
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            active: Field::Email,
            email: Input::default(),
            password: Input::default(),
        }
    }
}
