use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use stockpulse_core::domain::symbol::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextSymbol,
    PrevSymbol,
    Select(Symbol),
    RefreshPrediction,
}

pub fn action_for(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Some(Action::NextSymbol),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => Some(Action::PrevSymbol),
        KeyCode::Char('r') => Some(Action::RefreshPrediction),
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c.to_digit(10)? as usize;
            Symbol::ALL.get(idx - 1).copied().map(Action::Select)
        }
        _ => None,
    }
}
