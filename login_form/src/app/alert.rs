use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

/// A message the user has to dismiss before doing anything else.
#[derive(Debug, PartialEq, Eq)]
pub struct Alert {
    /// What to say
    pub message: String,
}

impl Alert {
    /// Render the alert on top of everything in `body_area`
    pub fn render(&self, frame: &mut Frame<'_>, body_area: Rect) {
        let popup_vert = Layout::vertical([Constraint::Length(5)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(40)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);

        let popup = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Alert")
                    .title_bottom("enter: OK")
                    .padding(Padding::horizontal(1))
                    .border_style(Style::new().red()),
            );

        frame.render_widget(Clear, popup_area);
        frame.render_widget(popup, popup_area);
    }
}
