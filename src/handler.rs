use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, InputMode};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => {
            app.tick_animation();
            app.poll_pending().await;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Edit the thought
        KeyCode::Char('i') | KeyCode::Char('e') | KeyCode::Enter => {
            app.input_mode = InputMode::Editing;
        }

        // Transport toggle, developer panel, journal save
        KeyCode::Char('m') => app.toggle_mock(),
        KeyCode::Char('d') => app.show_dev_panel = !app.show_dev_panel,
        KeyCode::Char('s') => app.save_to_journal(),

        // Belief rating
        KeyCode::Left | KeyCode::Char('h') => app.rating_down(),
        KeyCode::Right | KeyCode::Char('l') => app.rating_up(),

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.submit();
        }
        KeyCode::Backspace => {
            if app.input_cursor > 0 {
                app.input_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.thought_input, app.input_cursor);
                app.thought_input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.thought_input.chars().count();
            if app.input_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.thought_input, app.input_cursor);
                app.thought_input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.input_cursor = app.input_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.thought_input.chars().count();
            app.input_cursor = (app.input_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.input_cursor = 0;
        }
        KeyCode::End => {
            app.input_cursor = app.thought_input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.thought_input, app.input_cursor);
            app.thought_input.insert(byte_pos, c);
            app.input_cursor += 1;
        }
        _ => {}
    }
}
