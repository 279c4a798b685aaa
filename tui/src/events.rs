use egx_utils::prices::PricesResponse;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug)]
pub enum AppEvent {
    Input(Event),
    Tick,

    PricesUpdate {
        request_id: u64,
        symbol: String,
        response: PricesResponse,
    },
    PricesUpdateError {
        request_id: u64,
        symbol: String,
        error: egx_utils::Error,
    },
}

impl AppEvent {
    pub fn is_input(&self) -> bool {
        matches!(self, AppEvent::Input(_))
    }

    pub fn input_event(&self) -> Option<&Event> {
        if let AppEvent::Input(event) = self {
            Some(event)
        } else {
            None
        }
    }

    pub fn key_event(&self) -> Option<&KeyEvent> {
        if let AppEvent::Input(Event::Key(key_event)) = self {
            Some(key_event)
        } else {
            None
        }
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        matches!(
            self.key_event(),
            Some(KeyEvent {
                kind: KeyEventKind::Press,
                code,
                modifiers: KeyModifiers::NONE,
                ..
            }) if *code == key
        )
    }

    pub fn is_ctrl_pressed(&self, char: char) -> bool {
        matches!(
            self.key_event(),
            Some(KeyEvent {
                kind: KeyEventKind::Press,
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::CONTROL,
                ..
            }) if *c == char
        )
    }
}
