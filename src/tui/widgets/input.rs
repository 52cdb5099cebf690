use std::cmp;

/// Single-line text input with a cursor, used by the task form and the list
/// name prompt. Cursor positions are character offsets, not byte offsets.
#[derive(Debug, Clone, Default)]
pub struct Input {
    value: String,
    cursor: usize,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: String) -> Self {
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut chars: Vec<char> = self.value.chars().collect();
        let col = cmp::min(self.cursor, chars.len());
        chars.insert(col, ch);
        self.value = chars.into_iter().collect();
        self.cursor = col + 1;
    }

    /// Delete the character before the cursor (Backspace)
    pub fn delete_char(&mut self) {
        let mut chars: Vec<char> = self.value.chars().collect();
        let col = cmp::min(self.cursor, chars.len());
        if col == 0 {
            return;
        }
        chars.remove(col - 1);
        self.value = chars.into_iter().collect();
        self.cursor = col - 1;
    }

    /// Delete the character under the cursor (Delete)
    pub fn delete_forward(&mut self) {
        let mut chars: Vec<char> = self.value.chars().collect();
        if self.cursor >= chars.len() {
            return;
        }
        chars.remove(self.cursor);
        self.value = chars.into_iter().collect();
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = cmp::min(self.cursor + 1, self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_is_char_based_not_byte_based() {
        let mut input = Input::with_value("café".to_string());
        assert_eq!(input.cursor(), 4);
        input.delete_char();
        assert_eq!(input.value(), "caf");

        input.insert_char('é');
        input.move_left();
        input.insert_char('x');
        assert_eq!(input.value(), "cafxé");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = Input::new();
        input.move_left();
        input.move_right();
        assert_eq!(input.cursor(), 0);
        input.insert_char('a');
        input.move_right();
        assert_eq!(input.cursor(), 1);
        input.move_home();
        input.delete_forward();
        assert_eq!(input.value(), "");
    }
}
