use egx_ratatui_extra::thematize::Thematize;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use std::fmt::Formatter;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ThemeName {
    #[default]
    Monochrome,
    Dark,
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::str::FromStr for ThemeName {
    type Err = crate::Error;

    fn from_str(theme_name: &str) -> crate::Result<Self> {
        Self::iter()
            .find(|theme| theme.to_string() == theme_name)
            .ok_or_else(|| crate::Error::UnknownTheme(theme_name.to_string()))
    }
}

impl ThemeName {
    pub fn list() -> Vec<String> {
        Self::iter().map(|theme| theme.to_string()).collect()
    }
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub text: Option<Color>,
    pub bg: Option<Color>,
    pub dim: Color,
    pub reversed: bool,
    pub popup_reversed: bool,
    pub popup_bg: Option<Color>,
    pub error_popup_bg: Option<Color>,
    pub border_type: BorderType,
}

impl Theme {
    pub fn new(theme_name: ThemeName) -> Theme {
        match theme_name {
            ThemeName::Monochrome => Theme {
                text: None,
                bg: None,
                dim: Color::DarkGray,
                reversed: false,
                popup_reversed: true,
                popup_bg: None,
                error_popup_bg: None,
                border_type: BorderType::Plain,
            },
            ThemeName::Dark => Theme {
                text: Some(Color::White),
                bg: Some(Color::Black),
                dim: Color::Gray,
                reversed: false,
                popup_reversed: false,
                popup_bg: Some(Color::Blue),
                error_popup_bg: Some(Color::Red),
                border_type: BorderType::Rounded,
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::new(ThemeName::default())
    }
}

impl Thematize for Theme {
    fn popup(&self) -> Theme {
        Theme {
            bg: self.popup_bg,
            reversed: self.popup_reversed,
            ..self.clone()
        }
    }

    fn error_popup(&self) -> Theme {
        let s = self.popup();
        Theme {
            bg: s.error_popup_bg,
            ..s
        }
    }

    fn style(&self) -> Style {
        let mut style = Style::default();
        if let Some(text_color) = self.text {
            style = style.fg(text_color);
        }
        if let Some(bg_color) = self.bg {
            style = style.bg(bg_color);
        }
        if self.reversed {
            style = style.add_modifier(Modifier::REVERSED);
        } else {
            style = style.remove_modifier(Modifier::REVERSED);
        }
        style
    }

    fn style_dim(&self) -> Style {
        self.style().fg(self.dim)
    }

    fn border_type(&self) -> BorderType {
        self.border_type
    }

    fn button_focused(&self) -> Style {
        if self.reversed {
            Style::default()
                .add_modifier(Modifier::BOLD)
                .remove_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        }
    }

    fn button_notfocused(&self) -> Style {
        self.style()
    }

    fn cursor(&self) -> Style {
        if self.reversed {
            Style::default().remove_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        }
    }

    fn boxed(&self) -> bool {
        true
    }
}
