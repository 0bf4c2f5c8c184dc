//! Key bindings. Keys go to whichever layer is on top: the form, then the
//! delete confirmation, then the search box, then the list.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tasklist_core::{ApiCall, Filter, TodoApp};

/// Everything the UI loop draws from.
#[derive(Debug, Default)]
pub struct Screen {
    pub app: TodoApp,
    /// Keystrokes edit the search term.
    pub searching: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Dispatch(ApiCall),
}

pub fn handle_key(screen: &mut Screen, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if screen.app.is_form_open() {
        return form_key(&mut screen.app, key);
    }
    if screen.app.list.confirming().is_some() {
        return confirm_key(&mut screen.app, key);
    }
    if screen.searching {
        search_key(screen, key);
        return None;
    }
    list_key(screen, key)
}

fn form_key(app: &mut TodoApp, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => return app.submit_form().map(Action::Dispatch),
        _ if app.is_submitting() => {}
        KeyCode::Tab | KeyCode::Down => app.form_mut()?.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form_mut()?.previous_field(),
        KeyCode::Left => app.form_mut()?.move_cursor_left(),
        KeyCode::Right => app.form_mut()?.move_cursor_right(),
        KeyCode::Backspace => app.form_mut()?.backspace(),
        KeyCode::Char(ch) => app.form_mut()?.input(ch),
        _ => {}
    }
    None
}

fn confirm_key(app: &mut TodoApp, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete().map(Action::Dispatch),
        KeyCode::Char('n') | KeyCode::Esc => {
            app.cancel_delete();
            None
        }
        _ => None,
    }
}

fn search_key(screen: &mut Screen, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            screen.app.clear_search();
            screen.searching = false;
        }
        KeyCode::Enter => screen.searching = false,
        KeyCode::Backspace => screen.app.pop_search_char(),
        KeyCode::Char(ch) => screen.app.push_search_char(ch),
        _ => {}
    }
}

fn list_key(screen: &mut Screen, key: KeyEvent) -> Option<Action> {
    let app = &mut screen.app;
    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Left => app.list.unselect(),
        KeyCode::Char('a') => app.open_create_form(),
        KeyCode::Char('e') => {
            if let Some(id) = app.selected().map(|t| t.id) {
                app.open_edit_form(id);
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => return app.toggle_selected().map(Action::Dispatch),
        KeyCode::Char('x') | KeyCode::Delete => app.request_delete_selected(),
        KeyCode::Char('/') => screen.searching = true,
        KeyCode::Esc => app.clear_search(),
        KeyCode::Tab => app.set_filter(app.filter().next()),
        KeyCode::Char('1') => app.set_filter(Filter::All),
        KeyCode::Char('2') => app.set_filter(Filter::Pending),
        KeyCode::Char('3') => app.set_filter(Filter::Completed),
        KeyCode::Char('r') => return Some(Action::Dispatch(app.load())),
        _ => {}
    }
    None
}
