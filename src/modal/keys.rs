//! Key bindings for the list modal.
//!
//! - **Rows**: `↑/k` up, `↓/j` down, `→/l/pgdn` next page, `←/h/pgup` previous page
//! - **Search**: `/` or `tab` to focus the search box; `tab`, `enter`, `↓` or
//!   `esc` to return to the rows
//! - **Dialog**: `a` for the title button (when configured), `esc/q` to close

use crate::key;
use crossterm::event::KeyCode;

/// Key bindings for the list modal.
#[derive(Debug, Clone)]
pub struct ModalKeyMap {
    /// Move the selection up.
    pub cursor_up: key::Binding,
    /// Move the selection down.
    pub cursor_down: key::Binding,
    /// Load the next page.
    pub next_page: key::Binding,
    /// Load the previous page.
    pub prev_page: key::Binding,
    /// Move focus to the search box.
    pub focus_search: key::Binding,
    /// Move focus from the search box back to the rows.
    pub leave_search: key::Binding,
    /// Trigger the title button.
    pub title_action: key::Binding,
    /// Hide the modal.
    pub close: key::Binding,
}

impl Default for ModalKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            next_page: key::new_binding(vec![
                key::with_keys_str(&["right", "l", "pgdown"]),
                key::with_help("→/l", "next"),
            ]),
            prev_page: key::new_binding(vec![
                key::with_keys_str(&["left", "h", "pgup"]),
                key::with_help("←/h", "previous"),
            ]),
            focus_search: key::Binding::new(vec![KeyCode::Char('/'), KeyCode::Tab])
                .with_help("/", "search"),
            leave_search: key::Binding::new(vec![
                KeyCode::Tab,
                KeyCode::Enter,
                KeyCode::Down,
                KeyCode::Esc,
            ])
            .with_help("enter", "results"),
            title_action: key::Binding::new(vec![KeyCode::Char('a')]),
            close: key::Binding::new(vec![KeyCode::Esc, KeyCode::Char('q')])
                .with_help("esc", "close"),
        }
    }
}

impl key::KeyMap for ModalKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.cursor_up,
            &self.cursor_down,
            &self.next_page,
            &self.prev_page,
            &self.focus_search,
            &self.close,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.next_page,
                &self.prev_page,
            ],
            vec![&self.focus_search, &self.leave_search],
            vec![&self.title_action, &self.close],
        ]
    }
}
