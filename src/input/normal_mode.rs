use crossterm::event::KeyCode;

use crate::app::{AppState, DayRequest};

/// Work the event loop has to do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    LoadDay(DayRequest),
    RefreshMonth,
}

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Action {
    if state.show_help {
        return handle_help_key(key, state);
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('h') | KeyCode::Left => move_cursor(state, -1),
        KeyCode::Char('l') | KeyCode::Right => move_cursor(state, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(state, -7),
        KeyCode::Char('j') | KeyCode::Down => move_cursor(state, 7),
        KeyCode::Char('H') | KeyCode::Char('{') | KeyCode::PageUp => {
            state.go_to_previous_month();
            Action::RefreshMonth
        }
        KeyCode::Char('L') | KeyCode::Char('}') | KeyCode::PageDown => {
            state.go_to_next_month();
            Action::RefreshMonth
        }
        KeyCode::Char('t') => {
            state.go_to_today();
            Action::RefreshMonth
        }
        KeyCode::Char('r') => Action::RefreshMonth,
        KeyCode::Enter => state.select_cursor().map_or(Action::None, Action::LoadDay),
        KeyCode::Char('?') => {
            state.show_help = true;
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_help_key(key: KeyCode, state: &mut AppState) -> Action {
    if matches!(key, KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc) {
        state.show_help = false;
    }
    Action::None
}

fn move_cursor(state: &mut AppState, days: i64) -> Action {
    let month = state.current_month;
    state.move_cursor_days(days);

    if state.current_month != month {
        Action::RefreshMonth
    } else {
        Action::None
    }
}
