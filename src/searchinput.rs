//! Single-line search box used in the modal header.
//!
//! A reduced text input: it edits a value, tracks a cursor, shows a
//! placeholder while empty, and reports whether a key changed the value so the
//! owner can schedule a search. It has no clipboard, suggestions or echo modes.

use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthChar;

/// Search box state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Text before the value, e.g. `"/ "`.
    pub prompt: String,
    /// Prompt style.
    pub prompt_style: Style,
    /// Value style.
    pub text_style: Style,
    /// Shown while the value is empty.
    pub placeholder: String,
    /// Placeholder style.
    pub placeholder_style: Style,
    /// Style of the character under the cursor when focused.
    pub cursor_style: Style,
    /// Maximum number of characters; zero means unlimited.
    pub char_limit: usize,
    /// Display width of the value area; zero means unbounded.
    pub width: usize,

    value: Vec<char>,
    pos: usize,
    focus: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates an empty, unfocused search box.
    pub fn new() -> Self {
        Self {
            prompt: "> ".to_string(),
            prompt_style: Style::new(),
            text_style: Style::new(),
            placeholder: String::new(),
            placeholder_style: Style::new().foreground(Color::from("240")),
            cursor_style: Style::new()
                .foreground(Color::from("0"))
                .background(Color::from("212")),
            char_limit: 0,
            width: 0,
            value: Vec::new(),
            pos: 0,
            focus: false,
        }
    }

    /// Current value.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the value and moves the cursor to the end.
    pub fn set_value(&mut self, s: &str) {
        self.value = s.chars().collect();
        if self.char_limit > 0 {
            self.value.truncate(self.char_limit);
        }
        self.pos = self.value.len();
    }

    /// Cursor position in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamped to the value.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    /// Handles an editing key. Returns true when the value changed.
    ///
    /// Keys are ignored while blurred.
    pub fn update(&mut self, msg: &KeyMsg) -> bool {
        if !self.focus {
            return false;
        }

        let ctrl = msg.modifiers.contains(KeyModifiers::CONTROL);
        let before = self.value.len();
        let snapshot = if ctrl || matches!(msg.key, KeyCode::Backspace | KeyCode::Delete) {
            Some(self.value.clone())
        } else {
            None
        };

        match msg.key {
            KeyCode::Char('a') if ctrl => self.pos = 0,
            KeyCode::Char('e') if ctrl => self.pos = self.value.len(),
            KeyCode::Char('u') if ctrl => {
                self.value.drain(..self.pos);
                self.pos = 0;
            }
            KeyCode::Char('k') if ctrl => self.value.truncate(self.pos),
            KeyCode::Char('w') if ctrl => self.delete_word_backward(),
            KeyCode::Char(c) if !ctrl && !msg.modifiers.contains(KeyModifiers::ALT) => {
                if self.char_limit == 0 || self.value.len() < self.char_limit {
                    self.value.insert(self.pos, c);
                    self.pos += 1;
                }
            }
            KeyCode::Backspace if self.pos > 0 => {
                self.pos -= 1;
                self.value.remove(self.pos);
            }
            KeyCode::Delete if self.pos < self.value.len() => {
                self.value.remove(self.pos);
            }
            KeyCode::Left => self.pos = self.pos.saturating_sub(1),
            KeyCode::Right => self.pos = (self.pos + 1).min(self.value.len()),
            KeyCode::Home => self.pos = 0,
            KeyCode::End => self.pos = self.value.len(),
            _ => {}
        }

        match snapshot {
            Some(old) => old != self.value,
            None => self.value.len() != before,
        }
    }

    fn delete_word_backward(&mut self) {
        let end = self.pos;
        let mut start = end;
        while start > 0 && self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        self.value.drain(start..end);
        self.pos = start;
    }

    /// Renders the prompt and value, scrolled so the cursor stays visible.
    pub fn view(&self) -> String {
        let prompt = self.prompt_style.render(&self.prompt);

        if self.value.is_empty() {
            if self.placeholder.is_empty() {
                let cursor = if self.focus {
                    self.cursor_style.render(" ")
                } else {
                    String::new()
                };
                return format!("{}{}", prompt, cursor);
            }
            let mut chars = self.placeholder.chars();
            let first = chars.next().map(String::from).unwrap_or_default();
            let rest: String = chars.collect();
            let head = if self.focus {
                self.cursor_style.render(&first)
            } else {
                self.placeholder_style.render(&first)
            };
            return format!("{}{}{}", prompt, head, self.placeholder_style.render(&rest));
        }

        let start = self.scroll_offset();
        let before: String = self.value[start..self.pos].iter().collect();
        let mut out = format!("{}{}", prompt, self.text_style.render(&before));

        if self.pos < self.value.len() {
            let under = self.value[self.pos].to_string();
            if self.focus {
                out.push_str(&self.cursor_style.render(&under));
            } else {
                out.push_str(&self.text_style.render(&under));
            }
            let after: String = self.value[self.pos + 1..].iter().collect();
            out.push_str(&self.text_style.render(&self.clip(&after, start)));
        } else if self.focus {
            out.push_str(&self.cursor_style.render(" "));
        }
        out
    }

    // First visible character so the text before the cursor fits `width`.
    fn scroll_offset(&self) -> usize {
        if self.width == 0 {
            return 0;
        }
        let mut used = 1; // cursor cell
        let mut start = self.pos;
        while start > 0 {
            let w = self.value[start - 1].width().unwrap_or(0);
            if used + w > self.width {
                break;
            }
            used += w;
            start -= 1;
        }
        start
    }

    fn clip(&self, after: &str, start: usize) -> String {
        if self.width == 0 {
            return after.to_string();
        }
        let used: usize = self.value[start..=self.pos]
            .iter()
            .map(|c| c.width().unwrap_or(0))
            .sum();
        let mut remaining = self.width.saturating_sub(used);
        let mut out = String::new();
        for c in after.chars() {
            let w = c.width().unwrap_or(0);
            if w > remaining {
                break;
            }
            remaining -= w;
            out.push(c);
        }
        out
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipgloss_extras::lipgloss;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn ctrl(c: char) -> KeyMsg {
        KeyMsg {
            key: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    fn typed(s: &str) -> Model {
        let mut input = Model::new();
        input.focus();
        for c in s.chars() {
            input.update(&key(KeyCode::Char(c)));
        }
        input
    }

    #[test]
    fn test_typing_reports_changes() {
        let mut input = Model::new();
        input.focus();
        assert!(input.update(&key(KeyCode::Char('a'))));
        assert!(input.update(&key(KeyCode::Char('b'))));
        assert!(!input.update(&key(KeyCode::Left)));
        assert!(input.update(&key(KeyCode::Backspace)));
        assert_eq!(input.value(), "b");
        assert_eq!(input.position(), 0);
    }

    #[test]
    fn test_blurred_input_ignores_keys() {
        let mut input = Model::new();
        assert!(!input.update(&key(KeyCode::Char('a'))));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_backspace_at_start_is_not_a_change() {
        let mut input = typed("ab");
        input.set_cursor(0);
        assert!(!input.update(&key(KeyCode::Backspace)));
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn test_ctrl_editing() {
        let mut input = typed("red team");
        assert!(input.update(&ctrl('w')));
        assert_eq!(input.value(), "red ");
        assert!(!input.update(&ctrl('a')));
        assert_eq!(input.position(), 0);
        assert!(input.update(&ctrl('k')));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_char_limit() {
        let mut input = Model::new();
        input.char_limit = 2;
        input.focus();
        for c in "abc".chars() {
            input.update(&key(KeyCode::Char(c)));
        }
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn test_placeholder_view() {
        let mut input = Model::new();
        input.placeholder = "Search groups".to_string();
        assert_eq!(lipgloss::strip_ansi(&input.view()), "> Search groups");
    }

    #[test]
    fn test_view_scrolls_to_cursor() {
        let mut input = typed("abcdefgh");
        input.width = 4;
        assert_eq!(lipgloss::strip_ansi(&input.view()), "> fgh ");
    }
}
