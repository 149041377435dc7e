use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line text field. The cursor is a char index into `text`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LineEditor {
    pub text: String,
    pub cursor_col: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an editing key. Returns false for keys the field does not
    /// handle so the caller can route them elsewhere.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('a') if ctrl => self.move_home(),
            KeyCode::Char('e') if ctrl => self.move_end(),
            KeyCode::Char('u') if ctrl => self.clear_before_cursor(),
            KeyCode::Char('w') if ctrl => self.delete_word_before_cursor(),
            KeyCode::Char(_) if ctrl => return false,
            KeyCode::Char(ch) => self.insert_char(ch),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.clamp_cursor();
        let byte_index = char_to_byte_index(&self.text, self.cursor_col);
        self.text.insert(byte_index, ch);
        self.cursor_col += 1;
    }

    /// Inserts pasted text. Line breaks and tabs become spaces.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            let ch = if matches!(ch, '\n' | '\r' | '\t') { ' ' } else { ch };
            self.insert_char(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.clamp_cursor();
        if self.cursor_col == 0 {
            return;
        }
        let byte_index = char_to_byte_index(&self.text, self.cursor_col - 1);
        self.text.remove(byte_index);
        self.cursor_col -= 1;
    }

    pub fn delete_forward(&mut self) {
        self.clamp_cursor();
        if self.cursor_col >= self.text.chars().count() {
            return;
        }
        let byte_index = char_to_byte_index(&self.text, self.cursor_col);
        self.text.remove(byte_index);
    }

    pub fn clear_before_cursor(&mut self) {
        self.clamp_cursor();
        let byte_index = char_to_byte_index(&self.text, self.cursor_col);
        self.text.replace_range(..byte_index, "");
        self.cursor_col = 0;
    }

    /// Deletes back to the previous space or path separator.
    pub fn delete_word_before_cursor(&mut self) {
        self.clamp_cursor();
        let chars: Vec<char> = self.text.chars().collect();
        let mut start = self.cursor_col;
        while start > 0 && matches!(chars[start - 1], ' ' | '/') {
            start -= 1;
        }
        while start > 0 && !matches!(chars[start - 1], ' ' | '/') {
            start -= 1;
        }
        let from = char_to_byte_index(&self.text, start);
        let to = char_to_byte_index(&self.text, self.cursor_col);
        self.text.replace_range(from..to, "");
        self.cursor_col = start;
    }

    pub fn move_left(&mut self) {
        self.clamp_cursor();
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.clamp_cursor();
        self.cursor_col = (self.cursor_col + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_col = self.text.chars().count();
    }

    pub fn value(&self) -> &str {
        self.text.trim()
    }

    fn clamp_cursor(&mut self) {
        self.cursor_col = self.cursor_col.min(self.text.chars().count());
    }
}

fn char_to_byte_index(text: &str, char_index: usize) -> usize {
    match text.char_indices().nth(char_index) {
        Some((idx, _)) => idx,
        None => text.len(),
    }
}
