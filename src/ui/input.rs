//! Key-event to input-action mapping
//!
//! Pure so the Enter / Shift+Enter contract is unit-testable: Enter submits
//! the active form, Shift+Enter inserts a literal newline into the draft.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Submit the active form (upload the selection, or send the draft).
    Submit,
    /// Insert a newline into the draft without submitting.
    InsertNewline,
    InsertChar(char),
    Backspace,
    Quit,
    /// Nothing to do (releases, unmapped keys).
    Ignore,
}

pub fn action_for(key: KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::Ignore;
    }
    match key.code {
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => InputAction::InsertNewline,
        KeyCode::Enter => InputAction::Submit,
        KeyCode::Backspace => InputAction::Backspace,
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        KeyCode::Char(c) => InputAction::InsertChar(c),
        _ => InputAction::Ignore,
    }
}
