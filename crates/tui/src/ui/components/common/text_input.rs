//! Reusable UTF-8 safe text input state with cursor management.
//!
//! Shared by the add-week form and the upload path prompt. The location
//! field keeps its own draft inside the engine state machine and only uses
//! [`display_width`] from here.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, Default)]
pub struct TextInputState {
    /// The underlying text buffer
    input: String,
    /// Cursor byte index into `input` (always on a UTF-8 boundary)
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
        }
    }

    // ----- Getters -----
    pub fn input(&self) -> &str {
        &self.input
    }
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn is_empty(&self) -> bool {
        self.input.trim().is_empty()
    }

    /// Terminal columns occupied by the text before the cursor.
    pub fn cursor_columns(&self) -> u16 {
        display_width(&self.input[..self.cursor])
    }

    // ----- Setters -----

    /// Replaces the buffer and places the cursor at the end.
    pub fn set_input<S: Into<String>>(&mut self, s: S) {
        self.input = s.into();
        self.cursor = self.input.len();
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        let mut cursor = cursor.min(self.input.len());
        while !self.input.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    // ----- Editing primitives (UTF-8 safe) -----

    /// Move cursor one Unicode scalar to the left.
    pub fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev_len = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        self.cursor = self.cursor.saturating_sub(prev_len);
    }

    /// Move cursor one Unicode scalar to the right.
    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    /// Insert a char at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Backspace the char immediately before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        let start = self.cursor - prev;
        self.input.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.input.drain(self.cursor..self.cursor + next.len_utf8());
        }
    }

    /// Applies a cursor or editing key. Returns `false` when the key is not an edit.
    pub fn handle_edit_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }
}

/// Display width in terminal columns, saturating at `u16::MAX`.
pub fn display_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_move_insert_backspace() {
        let mut st = TextInputState::new();
        st.set_input("h🙂llo"); // emoji is 4 bytes
        st.set_cursor(1); // between h and 🙂
        st.insert_char('e');
        assert_eq!(st.input(), "he🙂llo");
        st.move_right(); // step over 🙂
        st.backspace(); // delete 🙂
        assert_eq!(st.input(), "hello");
        st.move_left();
        st.backspace();
        assert_eq!(st.input(), "ello");
    }

    #[test]
    fn delete_home_end_and_clear() {
        let mut st = TextInputState::new();
        st.set_input("2024-01-15");
        assert_eq!(st.cursor(), 10);
        st.move_home();
        st.delete();
        assert_eq!(st.input(), "024-01-15");
        st.move_end();
        st.delete();
        assert_eq!(st.input(), "024-01-15");
        st.clear();
        assert!(st.is_empty());
        assert_eq!(st.cursor(), 0);
    }

    #[test]
    fn set_cursor_snaps_to_char_boundary() {
        let mut st = TextInputState::new();
        st.set_input("é1");
        st.set_cursor(1);
        assert_eq!(st.cursor(), 0);
    }

    #[test]
    fn cursor_columns_count_wide_chars() {
        let mut st = TextInputState::new();
        st.set_input("日本");
        assert_eq!(st.cursor_columns(), 4);
    }

    #[test]
    fn edit_keys_ignore_control_chords() {
        let mut st = TextInputState::new();
        assert!(st.handle_edit_key(KeyEvent::new(KeyCode::Char('4'), KeyModifiers::NONE)));
        assert!(st.handle_edit_key(KeyEvent::new(KeyCode::Char('0'), KeyModifiers::SHIFT)));
        assert!(!st.handle_edit_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL)));
        assert!(!st.handle_edit_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert_eq!(st.input(), "40");
    }
}
