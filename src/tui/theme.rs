use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub header_style: Style,
    pub footer_style: Style,
    pub notice_style: Style,
    pub text_style: Style,
    pub muted_style: Style,
    pub input_style: Style,
    pub focus_border_style: Style,
    pub completion_style: Style,
    pub completion_selected_style: Style,
    pub star_style: Style,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            header_style: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            footer_style: Style::default().fg(Color::Cyan),
            notice_style: Style::default().fg(Color::Yellow),
            text_style: Style::default().fg(Color::White),
            muted_style: Style::default().fg(Color::DarkGray),
            input_style: Style::default().fg(Color::White),
            focus_border_style: Style::default().fg(Color::LightCyan),
            completion_style: Style::default().fg(Color::Gray),
            completion_selected_style: Style::default().bg(Color::DarkGray).fg(Color::White),
            star_style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn light() -> Self {
        Self {
            header_style: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            footer_style: Style::default().fg(Color::Blue),
            notice_style: Style::default().fg(Color::Magenta),
            text_style: Style::default().fg(Color::Black),
            muted_style: Style::default().fg(Color::Gray),
            input_style: Style::default().fg(Color::Black),
            focus_border_style: Style::default().fg(Color::Blue),
            completion_style: Style::default().fg(Color::DarkGray),
            completion_selected_style: Style::default().bg(Color::Gray).fg(Color::Black),
            star_style: Style::default().fg(Color::Rgb(200, 140, 0)),
        }
    }

    /// Unknown names fall back to the dark theme.
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}
