// Keyboard input handling.
//
// Translates crossterm key events into ViewState mutations (statistic
// selection, cutoff month) and tells the event loop whether to re-run the
// aggregation or quit.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use batview_core::engine::{MAX_CUTOFF_MONTH, MIN_CUTOFF_MONTH};
use batview_core::stats::StatisticKind;

use super::ViewState;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Selection or cutoff changed; recompute the ranking.
    Requery,
    Quit,
}

/// Handle a keyboard event.
///
/// Returns `None` when the key did nothing (including moves that hit the end
/// of a range).
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events; crossterm on Windows also emits releases.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UserCommand::Quit),

        // Statistic selection
        KeyCode::Up | KeyCode::Char('k') => select_stat(view_state, prev_index(view_state.selected)),
        KeyCode::Down | KeyCode::Char('j') => {
            select_stat(view_state, next_index(view_state.selected))
        }
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            select_stat(view_state, index)
        }

        // Cutoff month
        KeyCode::Left | KeyCode::Char('h') => {
            set_month(view_state, view_state.cutoff_month.saturating_sub(1))
        }
        KeyCode::Right | KeyCode::Char('l') => set_month(view_state, view_state.cutoff_month + 1),
        KeyCode::Home => set_month(view_state, MIN_CUTOFF_MONTH),
        KeyCode::End => set_month(view_state, MAX_CUTOFF_MONTH),

        _ => None,
    }
}

fn prev_index(current: usize) -> usize {
    let len = StatisticKind::ALL.len();
    (current + len - 1) % len
}

fn next_index(current: usize) -> usize {
    (current + 1) % StatisticKind::ALL.len()
}

fn select_stat(view_state: &mut ViewState, index: usize) -> Option<UserCommand> {
    if index >= StatisticKind::ALL.len() || index == view_state.selected {
        return None;
    }
    view_state.selected = index;
    Some(UserCommand::Requery)
}

/// Move the cutoff, saturating at the ends of the selectable range.
fn set_month(view_state: &mut ViewState, month: u32) -> Option<UserCommand> {
    let month = month.clamp(MIN_CUTOFF_MONTH, MAX_CUTOFF_MONTH);
    if month == view_state.cutoff_month {
        return None;
    }
    view_state.cutoff_month = month;
    Some(UserCommand::Requery)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
