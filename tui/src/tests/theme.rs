use std::str::FromStr;

use egx_ratatui_extra::thematize::Thematize;
use ratatui::style::{Color, Modifier};

use crate::theme::{Theme, ThemeName};

#[test]
fn names_round_trip() {
    for name in ThemeName::list() {
        assert_eq!(ThemeName::from_str(&name).unwrap().to_string(), name);
    }
    assert_eq!(ThemeName::list(), vec!["Monochrome", "Dark"]);
}

#[test]
fn unknown_name_is_an_error() {
    let error = ThemeName::from_str("Solarized").unwrap_err();

    assert!(matches!(error, crate::Error::UnknownTheme(ref name) if name == "Solarized"));
}

#[test]
fn monochrome_popup_is_reversed() {
    let theme = Theme::new(ThemeName::Monochrome);

    assert!(!theme.style().add_modifier.contains(Modifier::REVERSED));
    assert!(theme
        .popup()
        .style()
        .add_modifier
        .contains(Modifier::REVERSED));
}

#[test]
fn dark_error_popup_is_red() {
    let theme = Theme::new(ThemeName::Dark);

    assert_eq!(theme.popup().style().bg, Some(Color::Blue));
    assert_eq!(theme.error_popup().style().bg, Some(Color::Red));
    assert_eq!(theme.style().fg, Some(Color::White));
}

#[test]
fn default_config_theme_parses() {
    let config = egx_utils::config::Config::default();

    assert_eq!(
        ThemeName::from_str(config.get_theme_name()).unwrap(),
        ThemeName::default()
    );
}
